//! Rendering configuration with documented constants
//!
//! All drawing constants are collected here with explanations of their purpose
//! and how they interact with each other. Values can be overridden from a TOML
//! file; any key left out keeps its default.

use crate::core::error::{ArchitectError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the floor plan and report renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    // === PROJECTION ===
    /// Pixels per meter when projecting room rectangles
    ///
    /// At 40 px/m a 12 m wide plan becomes a 480 px drawing before padding.
    pub scale: f64,

    /// Margin around the plan on every side (pixels)
    ///
    /// Applied twice per axis, so canvas width is
    /// `(max_x - min_x) * scale + 2 * padding`.
    pub padding: f64,

    // === HEAT OVERLAY ===
    /// Red tint opacity for rooms with low heat risk
    pub heat_opacity_low: f64,
    /// Red tint opacity for rooms with medium heat risk
    pub heat_opacity_medium: f64,
    /// Red tint opacity for rooms with high heat risk
    ///
    /// Must stay above the medium value so risk tiers remain distinguishable.
    pub heat_opacity_high: f64,

    // === DAYLIGHT OVERLAY ===
    /// Yellow tint opacity for poorly lit rooms
    pub daylight_opacity_low: f64,
    /// Yellow tint opacity for moderately lit rooms
    pub daylight_opacity_medium: f64,
    /// Yellow tint opacity for well lit rooms
    pub daylight_opacity_high: f64,

    // === AIRFLOW OVERLAY ===
    /// Stroke width of a weak airflow line (pixels)
    ///
    /// Medium and strong flows use 2x and 3x this width.
    pub airflow_base_width: f64,
    /// Line opacity for low, medium and high strength flows
    pub airflow_opacity: [f64; 3],

    // === REPORT ===
    /// Side length of the square performance radar (pixels)
    pub radar_size: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: 40.0,
            padding: 40.0,

            heat_opacity_low: 0.15,
            heat_opacity_medium: 0.3,
            heat_opacity_high: 0.5,

            daylight_opacity_low: 0.1,
            daylight_opacity_medium: 0.25,
            daylight_opacity_high: 0.45,

            airflow_base_width: 2.0,
            airflow_opacity: [0.4, 0.6, 0.85],

            radar_size: 240.0,
        }
    }
}

impl RenderConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file and validate it
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: RenderConfig = toml::from_str(&contents)?;
        config.validate().map_err(ArchitectError::ConfigError)?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.scale <= 0.0 {
            return Err(format!("scale ({}) must be positive", self.scale));
        }

        if self.padding < 0.0 {
            return Err(format!("padding ({}) must not be negative", self.padding));
        }

        // Tiers should be ordered
        if !(self.heat_opacity_low < self.heat_opacity_medium
            && self.heat_opacity_medium < self.heat_opacity_high)
        {
            return Err(format!(
                "heat opacities must increase with risk (got {}, {}, {})",
                self.heat_opacity_low, self.heat_opacity_medium, self.heat_opacity_high
            ));
        }

        if !(self.daylight_opacity_low < self.daylight_opacity_medium
            && self.daylight_opacity_medium < self.daylight_opacity_high)
        {
            return Err(format!(
                "daylight opacities must increase with quality (got {}, {}, {})",
                self.daylight_opacity_low,
                self.daylight_opacity_medium,
                self.daylight_opacity_high
            ));
        }

        let opacities = [
            self.heat_opacity_low,
            self.heat_opacity_medium,
            self.heat_opacity_high,
            self.daylight_opacity_low,
            self.daylight_opacity_medium,
            self.daylight_opacity_high,
        ];
        if opacities
            .iter()
            .chain(self.airflow_opacity.iter())
            .any(|o| !(0.0..=1.0).contains(o))
        {
            return Err("Opacities must be within 0.0..=1.0".into());
        }

        if self.airflow_base_width <= 0.0 || self.radar_size <= 0.0 {
            return Err("Stroke width and radar size must be positive".into());
        }

        Ok(())
    }
}
