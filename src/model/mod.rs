//! Domain model shared between the service client, controller and renderers
//!
//! Every type here is an immutable snapshot created wholesale from one parsed
//! response. Wire names are camelCase to match the declared JSON schemas.

pub mod brief;
pub mod climate;
pub mod diagnostics;
pub mod plan;
pub mod refinement;

pub use brief::{Priority, SiteBrief};
pub use climate::ClimateData;
pub use diagnostics::{Airflow, ClimateDiagnostics, Daylight, HeatRisk, Level};
pub use plan::{
    FloorPlan, PerformanceMetrics, RejectedAlternative, Room, RoomCategory, Side,
    WindowPlacement,
};
pub use refinement::{ImprovementDeltas, OptimizationEvaluation, RefinementResult};
