//! Refinement results and optimization verdicts

use crate::model::plan::FloorPlan;
use serde::{Deserialize, Serialize};

/// Expected quantitative gains from a refinement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementDeltas {
    #[serde(default)]
    pub thermal_explanation: String,
    #[serde(default)]
    pub daylight_explanation: String,
    #[serde(default)]
    pub thermal_gain_percent: f64,
    #[serde(default)]
    pub daylight_gain_percent: f64,
}

/// A revised plan plus what changed and why
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinementResult {
    pub plan: FloorPlan,
    #[serde(default)]
    pub changes: Vec<String>,
    #[serde(default)]
    pub improvements: ImprovementDeltas,
}

/// Judgment on whether another refinement pass is worthwhile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationEvaluation {
    pub further_iteration: bool,
    #[serde(default)]
    pub adjustments: Vec<String>,
    #[serde(default)]
    pub expected_benefit: String,
}
