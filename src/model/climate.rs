//! Climate profile of a site

use serde::{Deserialize, Serialize};

/// Structured summary of a location's climate and recommended passive strategies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClimateData {
    pub location: String,
    pub climate_zone: String,
    pub avg_temp_range: String,
    pub solar_potential: String,
    pub prevailing_winds: String,
    #[serde(default)]
    pub challenges: Vec<String>,
    #[serde(default)]
    pub strategies: Vec<String>,
    #[serde(default)]
    pub orientation_guidance: String,
    #[serde(default)]
    pub window_guidance: String,
    #[serde(default)]
    pub zoning_guidance: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_climate_deserialization() {
        let json = r#"{
            "location": "Phoenix, AZ",
            "climateZone": "Hot desert (BWh)",
            "avgTempRange": "8-41 C",
            "solarPotential": "Very high",
            "prevailingWinds": "West-southwest",
            "challenges": ["Extreme summer heat"],
            "strategies": ["Thermal mass", "Deep overhangs"],
            "orientationGuidance": "Long axis east-west",
            "windowGuidance": "Minimize west glazing",
            "zoningGuidance": "Buffer west wall"
        }"#;
        let climate: ClimateData = serde_json::from_str(json).unwrap();
        assert_eq!(climate.climate_zone, "Hot desert (BWh)");
        assert_eq!(climate.strategies.len(), 2);
    }

    #[test]
    fn test_missing_required_field_fails() {
        let json = r#"{"location": "Phoenix"}"#;
        assert!(serde_json::from_str::<ClimateData>(json).is_err());
    }
}
