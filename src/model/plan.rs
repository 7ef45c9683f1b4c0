//! Floor plan, rooms and window placements as returned by the design service

use crate::core::types::{Point, Rect};
use crate::model::diagnostics::ClimateDiagnostics;
use serde::{Deserialize, Serialize};

/// Functional category of a room
///
/// Parsed leniently: case and surrounding whitespace are ignored, and any
/// label outside the known set is kept as `Other` so it still renders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RoomCategory {
    Living,
    Bedroom,
    Kitchen,
    Bathroom,
    Utility,
    /// Thermal buffer spaces (sunrooms, vestibules, deep porches)
    Buffer,
    Circulation,
    Other(String),
}

impl RoomCategory {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Living => "living",
            Self::Bedroom => "bedroom",
            Self::Kitchen => "kitchen",
            Self::Bathroom => "bathroom",
            Self::Utility => "utility",
            Self::Buffer => "buffer",
            Self::Circulation => "circulation",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for RoomCategory {
    fn from(label: String) -> Self {
        match label.trim().to_lowercase().as_str() {
            "living" => Self::Living,
            "bedroom" => Self::Bedroom,
            "kitchen" => Self::Kitchen,
            "bathroom" => Self::Bathroom,
            "utility" => Self::Utility,
            "buffer" => Self::Buffer,
            "circulation" => Self::Circulation,
            _ => Self::Other(label),
        }
    }
}

impl From<RoomCategory> for String {
    fn from(category: RoomCategory) -> Self {
        category.as_str().to_string()
    }
}

impl std::fmt::Display for RoomCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compass side of a room wall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[serde(alias = "North", alias = "NORTH", alias = "n")]
    #[display(fmt = "north")]
    North,
    #[serde(alias = "South", alias = "SOUTH", alias = "s")]
    #[display(fmt = "south")]
    South,
    #[serde(alias = "East", alias = "EAST", alias = "e")]
    #[display(fmt = "east")]
    East,
    #[serde(alias = "West", alias = "WEST", alias = "w")]
    #[display(fmt = "west")]
    West,
}

/// A window on one wall of a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowPlacement {
    pub side: Side,
    /// Center of the window along the wall (0.0 = start, 1.0 = end)
    pub position: f64,
    /// Window width in meters
    pub width: f64,
    /// Whether the opening has external shading
    #[serde(default)]
    pub shaded: bool,
}

/// A positioned, dimensioned room (all lengths in meters)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub category: RoomCategory,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub windows: Vec<WindowPlacement>,
    #[serde(default)]
    pub rationale: String,
}

impl Room {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn centroid(&self) -> Point {
        self.rect().center()
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Check the extent invariant (positive width and height)
    pub fn validate(&self) -> Result<(), String> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(format!(
                "room '{}' has non-positive extent {}x{}",
                self.name, self.width, self.height
            ));
        }
        Ok(())
    }
}

/// Four normalized performance scores (each expected in 0.0..=1.0)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub daylight: f64,
    pub ventilation: f64,
    pub thermal_mass: f64,
    pub solar_control: f64,
}

impl PerformanceMetrics {
    /// Labelled values in radar order
    pub fn entries(&self) -> [(&'static str, f64); 4] {
        [
            ("Daylight", self.daylight),
            ("Ventilation", self.ventilation),
            ("Thermal mass", self.thermal_mass),
            ("Solar control", self.solar_control),
        ]
    }

    pub fn average(&self) -> f64 {
        (self.daylight + self.ventilation + self.thermal_mass + self.solar_control) / 4.0
    }

    /// Mean of the four scores as a rounded percentage
    pub fn overall_score(&self) -> u32 {
        (self.average() * 100.0).round().max(0.0) as u32
    }

    /// Copy with every score clamped into 0.0..=1.0
    pub fn clamped(&self) -> Self {
        Self {
            daylight: self.daylight.clamp(0.0, 1.0),
            ventilation: self.ventilation.clamp(0.0, 1.0),
            thermal_mass: self.thermal_mass.clamp(0.0, 1.0),
            solar_control: self.solar_control.clamp(0.0, 1.0),
        }
    }

    /// Names of scores that fall outside 0.0..=1.0
    pub fn out_of_range(&self) -> Vec<&'static str> {
        self.entries()
            .into_iter()
            .filter(|(_, v)| !(0.0..=1.0).contains(v))
            .map(|(name, _)| name)
            .collect()
    }
}

/// A design option the service considered and discarded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedAlternative {
    pub option: String,
    pub reason: String,
}

/// A complete floor plan proposal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorPlan {
    pub title: String,
    /// Rotation of plan north from true north (degrees, clockwise)
    #[serde(default)]
    pub orientation: f64,
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub total_area: f64,
    pub metrics: PerformanceMetrics,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub rejected_alternatives: Vec<RejectedAlternative>,
    #[serde(default)]
    pub diagnostics: ClimateDiagnostics,
}

impl FloorPlan {
    /// Copy of this plan with only the diagnostics replaced
    pub fn with_diagnostics(&self, diagnostics: ClimateDiagnostics) -> Self {
        Self {
            diagnostics,
            ..self.clone()
        }
    }

    /// Sum of room areas, used when the service omits `totalArea`
    pub fn room_area(&self) -> f64 {
        self.rooms.iter().map(Room::area).sum()
    }

    /// Problems worth logging; the remote service is trusted, so these are
    /// never fatal
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings: Vec<String> = self
            .rooms
            .iter()
            .filter_map(|room| room.validate().err())
            .collect();

        for name in self.metrics.out_of_range() {
            warnings.push(format!("metric '{}' is outside 0..1", name));
        }

        if self.rooms.is_empty() {
            warnings.push("plan has no rooms".into());
        }

        warnings
    }
}
