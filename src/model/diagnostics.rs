//! Climate diagnostics: heat risk, airflow paths and daylight quality
//!
//! Room references are free-text labels produced by the design service.
//! Optional room ids are requested as well; when present they take priority
//! over the label during resolution (see `render::resolve`).

use serde::{Deserialize, Serialize};

/// Three-tier intensity used for risk, strength and quality
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[serde(alias = "Low", alias = "LOW")]
    #[display(fmt = "low")]
    Low,
    #[serde(alias = "Medium", alias = "MEDIUM", alias = "moderate")]
    #[display(fmt = "medium")]
    Medium,
    #[serde(alias = "High", alias = "HIGH")]
    #[display(fmt = "high")]
    High,
}

impl Level {
    /// Zero-based tier index (low = 0, high = 2)
    pub fn index(self) -> usize {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatRisk {
    pub room: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    pub risk: Level,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Airflow {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_id: Option<String>,
    pub strength: Level,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Daylight {
    pub room: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    pub quality: Level,
}

/// Diagnostics bundle attached to a floor plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClimateDiagnostics {
    #[serde(default)]
    pub heat_risks: Vec<HeatRisk>,
    #[serde(default)]
    pub airflow: Vec<Airflow>,
    #[serde(default)]
    pub daylight: Vec<Daylight>,
}

impl ClimateDiagnostics {
    pub fn is_empty(&self) -> bool {
        self.heat_risks.is_empty() && self.airflow.is_empty() && self.daylight.is_empty()
    }

    pub fn entry_count(&self) -> usize {
        self.heat_risks.len() + self.airflow.len() + self.daylight.len()
    }
}
