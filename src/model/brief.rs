//! User-supplied site brief

use serde::{Deserialize, Serialize};

/// What the design should optimize for
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Passive cooling (shading, cross ventilation, night flushing)
    #[default]
    Cooling,
    /// Passive heating (solar gain, thermal mass, compact form)
    Heating,
    /// Natural daylight distribution
    Daylight,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cooling => "cooling",
            Self::Heating => "heating",
            Self::Daylight => "daylight",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Site location, plot, priority and free-text requirements
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteBrief {
    pub location: String,
    /// Free text, e.g. "20m x 15m"
    pub plot_dimensions: String,
    pub priority: Priority,
    pub requirements: String,
}

impl SiteBrief {
    pub fn new(location: impl Into<String>, plot_dimensions: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            plot_dimensions: plot_dimensions.into(),
            ..Self::default()
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_requirements(mut self, requirements: impl Into<String>) -> Self {
        self.requirements = requirements.into();
        self
    }

    /// Generation needs a location; everything else may be blank
    pub fn has_location(&self) -> bool {
        !self.location.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_location_is_missing() {
        assert!(!SiteBrief::new("   ", "20x15").has_location());
        assert!(SiteBrief::new("Phoenix", "").has_location());
    }

    #[test]
    fn test_builder_sets_fields() {
        let brief = SiteBrief::new("Oslo", "12m x 10m")
            .with_priority(Priority::Heating)
            .with_requirements("Two bedrooms");
        assert_eq!(brief.priority, Priority::Heating);
        assert_eq!(brief.requirements, "Two bedrooms");
        assert_eq!(brief.priority.to_string(), "heating");
    }
}
