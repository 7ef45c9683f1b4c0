//! Floor plan renderer and summary views
//!
//! Pure functions of model/state values to SVG or text.
//! This module is READ-ONLY - it never modifies session state.

pub mod colors;
pub mod layout;
pub mod radar;
pub mod report;
pub mod resolve;
pub mod svg;

pub use layout::{Bounds, Projection};
pub use radar::render_radar;
pub use resolve::{MatchReason, RoomIndex, RoomMatch};
pub use svg::{render_floor_plan, Drawing, Overlays};
