//! Color definitions for room categories and diagnostic overlays

use crate::core::config::RenderConfig;
use crate::model::{Level, RoomCategory};

/// RGBA color (0.0 to 1.0 per channel)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Darken color by a factor (0.0 = black, 1.0 = unchanged)
    pub fn darken(&self, factor: f32) -> Self {
        Self {
            r: self.r * factor,
            g: self.g * factor,
            b: self.b * factor,
            a: self.a,
        }
    }

    /// `#rrggbb` form for SVG fill/stroke attributes (alpha is separate)
    pub fn to_hex(&self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

/// Background color for the drawing
pub const BACKGROUND: Color = Color::new(0.98, 0.98, 0.96, 1.0);

/// Fill for categories outside the known set
pub const DEFAULT_ROOM: Color = Color::new(0.88, 0.88, 0.88, 1.0);

/// Wall and label ink
pub const INK: Color = Color::new(0.2, 0.22, 0.25, 1.0);

/// Heat-risk tint
pub const HEAT: Color = Color::new(0.86, 0.15, 0.15, 1.0);

/// Daylight tint
pub const DAYLIGHT: Color = Color::new(0.98, 0.8, 0.08, 1.0);

/// Airflow arrows
pub const AIRFLOW: Color = Color::new(0.15, 0.45, 0.85, 1.0);

/// Unshaded and shaded window strokes
pub const WINDOW: Color = Color::new(0.35, 0.75, 0.95, 1.0);
pub const WINDOW_SHADED: Color = Color::new(0.25, 0.4, 0.55, 1.0);

/// Get the base fill for a room category
pub fn category_color(category: &RoomCategory) -> Color {
    match category {
        RoomCategory::Living => Color::new(0.99, 0.9, 0.7, 1.0), // Warm sand
        RoomCategory::Bedroom => Color::new(0.78, 0.85, 0.98, 1.0), // Soft blue
        RoomCategory::Kitchen => Color::new(0.99, 0.8, 0.75, 1.0), // Terracotta
        RoomCategory::Bathroom => Color::new(0.75, 0.93, 0.93, 1.0), // Aqua
        RoomCategory::Utility => Color::new(0.85, 0.82, 0.78, 1.0), // Concrete
        RoomCategory::Buffer => Color::new(0.8, 0.92, 0.78, 1.0), // Sage
        RoomCategory::Circulation => Color::new(0.93, 0.93, 0.9, 1.0), // Off-white
        RoomCategory::Other(_) => DEFAULT_ROOM,
    }
}

/// Heat tint opacity for a risk tier (high > medium > low)
pub fn heat_opacity(risk: Level, config: &RenderConfig) -> f64 {
    match risk {
        Level::Low => config.heat_opacity_low,
        Level::Medium => config.heat_opacity_medium,
        Level::High => config.heat_opacity_high,
    }
}

/// Daylight tint opacity for a quality tier
pub fn daylight_opacity(quality: Level, config: &RenderConfig) -> f64 {
    match quality {
        Level::Low => config.daylight_opacity_low,
        Level::Medium => config.daylight_opacity_medium,
        Level::High => config.daylight_opacity_high,
    }
}

/// Stroke (width, opacity) for an airflow of the given strength
pub fn airflow_stroke(strength: Level, config: &RenderConfig) -> (f64, f64) {
    let tier = strength.index();
    (
        config.airflow_base_width * (tier + 1) as f64,
        config.airflow_opacity[tier],
    )
}
