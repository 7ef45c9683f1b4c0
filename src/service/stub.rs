//! Deterministic in-process design service
//!
//! Answers every request with canned data (a hot-arid site and a five-room
//! courtyard house), records the order of calls, and can be told to fail a
//! chosen operation.

use crate::core::error::{ArchitectError, Result};
use crate::model::{
    Airflow, ClimateData, ClimateDiagnostics, Daylight, FloorPlan, HeatRisk, ImprovementDeltas,
    Level, OptimizationEvaluation, PerformanceMetrics, Priority, RefinementResult,
    RejectedAlternative, Room, RoomCategory, Side, WindowPlacement,
};
use crate::service::DesignService;
use ahash::AHashSet;
use std::sync::Mutex;

/// Operation names used for call recording and failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    FetchClimate,
    GenerateDesign,
    Refine,
    RunDiagnostics,
    Evaluate,
}

/// Design service with canned responses
#[derive(Debug)]
pub struct StubDesignService {
    climate: ClimateData,
    plan: FloorPlan,
    diagnostics: ClimateDiagnostics,
    evaluation: OptimizationEvaluation,
    failing: AHashSet<Operation>,
    calls: Mutex<Vec<Operation>>,
}

impl Default for StubDesignService {
    fn default() -> Self {
        Self::new()
    }
}

impl StubDesignService {
    pub fn new() -> Self {
        Self {
            climate: hot_arid_climate(),
            plan: courtyard_plan(),
            diagnostics: audit_diagnostics(),
            evaluation: OptimizationEvaluation {
                further_iteration: false,
                adjustments: vec!["Add operable clerestories over the living room".into()],
                expected_benefit: "Marginal; scores are within 5% of the practical optimum"
                    .into(),
            },
            failing: AHashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_plan(mut self, plan: FloorPlan) -> Self {
        self.plan = plan;
        self
    }

    pub fn with_climate(mut self, climate: ClimateData) -> Self {
        self.climate = climate;
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: ClimateDiagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn with_evaluation(mut self, evaluation: OptimizationEvaluation) -> Self {
        self.evaluation = evaluation;
        self
    }

    /// Make `operation` fail every time it is called
    pub fn failing(mut self, operation: Operation) -> Self {
        self.failing.insert(operation);
        self
    }

    /// Operations called so far, in order
    pub fn calls(&self) -> Vec<Operation> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, operation: Operation) -> Result<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(operation);
        }
        if self.failing.contains(&operation) {
            return Err(ArchitectError::LlmError(format!(
                "stubbed failure for {:?}",
                operation
            )));
        }
        Ok(())
    }
}

impl DesignService for StubDesignService {
    async fn fetch_climate(
        &self,
        location: &str,
        _plot_dimensions: &str,
        _priority: Priority,
    ) -> Result<ClimateData> {
        self.record(Operation::FetchClimate)?;
        Ok(ClimateData {
            location: location.trim().to_string(),
            ..self.climate.clone()
        })
    }

    async fn generate_design(
        &self,
        _climate: &ClimateData,
        _plot_dimensions: &str,
        _requirements: &str,
    ) -> Result<FloorPlan> {
        self.record(Operation::GenerateDesign)?;
        Ok(self.plan.clone())
    }

    async fn refine(&self, plan: &FloorPlan, _climate: &ClimateData) -> Result<RefinementResult> {
        self.record(Operation::Refine)?;
        Ok(refined(plan))
    }

    async fn run_diagnostics(&self, _plan: &FloorPlan) -> Result<ClimateDiagnostics> {
        self.record(Operation::RunDiagnostics)?;
        Ok(self.diagnostics.clone())
    }

    async fn evaluate(&self, _metrics: &PerformanceMetrics) -> Result<OptimizationEvaluation> {
        self.record(Operation::Evaluate)?;
        Ok(self.evaluation.clone())
    }
}

/// Same rooms with shading added to every west window and a small score bump
fn refined(plan: &FloorPlan) -> RefinementResult {
    let rooms = plan
        .rooms
        .iter()
        .map(|room| Room {
            windows: room
                .windows
                .iter()
                .map(|w| WindowPlacement {
                    shaded: w.shaded || w.side == Side::West,
                    ..w.clone()
                })
                .collect(),
            ..room.clone()
        })
        .collect();

    let bump = |v: f64| (v + 0.05).min(1.0);
    let metrics = PerformanceMetrics {
        daylight: bump(plan.metrics.daylight),
        ventilation: bump(plan.metrics.ventilation),
        thermal_mass: plan.metrics.thermal_mass,
        solar_control: bump(plan.metrics.solar_control),
    };

    RefinementResult {
        plan: FloorPlan {
            title: format!("{} (refined)", plan.title),
            rooms,
            metrics,
            ..plan.clone()
        },
        changes: vec![
            "Added external shading to all west-facing windows".into(),
            "Widened the courtyard opening for cross ventilation".into(),
        ],
        improvements: ImprovementDeltas {
            thermal_explanation: "Less late-afternoon solar gain on the west facade".into(),
            daylight_explanation: "Courtyard reflects more diffuse light into the core".into(),
            thermal_gain_percent: 8.0,
            daylight_gain_percent: 5.0,
        },
    }
}

fn hot_arid_climate() -> ClimateData {
    ClimateData {
        location: "Phoenix, AZ".into(),
        climate_zone: "Hot desert (Koppen BWh)".into(),
        avg_temp_range: "8 C winter nights to 41 C summer days".into(),
        solar_potential: "Very high (about 6.5 kWh/m2/day)".into(),
        prevailing_winds: "West-southwest afternoon winds, calm nights".into(),
        challenges: vec![
            "Extreme summer heat".into(),
            "Intense low-angle western sun".into(),
            "Large diurnal temperature swing".into(),
        ],
        strategies: vec![
            "High thermal mass with night flushing".into(),
            "Deep overhangs and shaded openings".into(),
            "Inward-facing courtyard".into(),
        ],
        orientation_guidance: "Elongate the plan east-west; keep glazing north and south".into(),
        window_guidance: "Minimize west glazing; shade every south opening".into(),
        zoning_guidance: "Put utility and storage on the west as a thermal buffer".into(),
    }
}

fn window(side: Side, position: f64, width: f64, shaded: bool) -> WindowPlacement {
    WindowPlacement {
        side,
        position,
        width,
        shaded,
    }
}

fn room(
    id: &str,
    name: &str,
    category: RoomCategory,
    (x, y, width, height): (f64, f64, f64, f64),
    windows: Vec<WindowPlacement>,
    rationale: &str,
) -> Room {
    Room {
        id: id.into(),
        name: name.into(),
        category,
        x,
        y,
        width,
        height,
        windows,
        rationale: rationale.into(),
    }
}

fn courtyard_plan() -> FloorPlan {
    FloorPlan {
        title: "Courtyard House".into(),
        orientation: 0.0,
        rooms: vec![
            room(
                "living",
                "Living Room",
                RoomCategory::Living,
                (4.0, 0.0, 7.0, 5.0),
                vec![window(Side::North, 0.5, 2.4, false)],
                "North light without direct gain",
            ),
            room(
                "kitchen",
                "Kitchen",
                RoomCategory::Kitchen,
                (11.0, 0.0, 4.0, 5.0),
                vec![window(Side::East, 0.5, 1.2, true)],
                "Morning sun only",
            ),
            room(
                "bed1",
                "Master Bedroom",
                RoomCategory::Bedroom,
                (4.0, 9.0, 6.0, 4.0),
                vec![window(Side::South, 0.4, 1.5, true)],
                "Shaded south window for winter gain",
            ),
            room(
                "bath",
                "Bathroom",
                RoomCategory::Bathroom,
                (10.0, 9.0, 3.0, 4.0),
                vec![],
                "Internal wet core",
            ),
            room(
                "store",
                "West Storage Buffer",
                RoomCategory::Buffer,
                (0.0, 0.0, 4.0, 13.0),
                vec![window(Side::West, 0.5, 0.6, false)],
                "Absorbs western heat before it reaches living spaces",
            ),
        ],
        total_area: 143.0,
        metrics: PerformanceMetrics {
            daylight: 0.72,
            ventilation: 0.68,
            thermal_mass: 0.85,
            solar_control: 0.8,
        },
        reasoning: "A buffer strip shields the west; living spaces face a shaded courtyard."
            .into(),
        rejected_alternatives: vec![RejectedAlternative {
            option: "Open-plan glass pavilion".into(),
            reason: "Unmanageable solar gain in summer".into(),
        }],
        diagnostics: ClimateDiagnostics {
            heat_risks: vec![HeatRisk {
                room: "storage".into(),
                room_id: None,
                risk: Level::High,
            }],
            airflow: vec![],
            daylight: vec![],
        },
    }
}

/// Deliberately uses loose labels ("living", "bedroom") so the renderer's
/// fuzzy resolution is exercised
fn audit_diagnostics() -> ClimateDiagnostics {
    ClimateDiagnostics {
        heat_risks: vec![
            HeatRisk {
                room: "West Storage Buffer".into(),
                room_id: Some("store".into()),
                risk: Level::High,
            },
            HeatRisk {
                room: "kitchen".into(),
                room_id: None,
                risk: Level::Medium,
            },
            HeatRisk {
                room: "bedroom".into(),
                room_id: None,
                risk: Level::Low,
            },
        ],
        airflow: vec![
            Airflow {
                from: "Master Bedroom".into(),
                to: "living".into(),
                from_id: Some("bed1".into()),
                to_id: None,
                strength: Level::High,
            },
            Airflow {
                from: "Kitchen".into(),
                to: "Garage".into(),
                from_id: None,
                to_id: None,
                strength: Level::Low,
            },
        ],
        daylight: vec![
            Daylight {
                room: "Living".into(),
                room_id: None,
                quality: Level::High,
            },
            Daylight {
                room: "Bathroom".into(),
                room_id: Some("bath".into()),
                quality: Level::Low,
            },
        ],
    }
}
