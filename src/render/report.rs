//! Read-only text panels for the terminal
//!
//! Each function renders one panel; `session_report` stitches together the
//! ones that apply to the current state.

use crate::controller::state::{AppState, HistoryEntry};
use crate::model::{
    ClimateData, FloorPlan, OptimizationEvaluation, PerformanceMetrics, RefinementResult,
    RejectedAlternative,
};
use std::fmt::Write;

/// Width of the metric bars in characters
const BAR_WIDTH: usize = 20;

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "== {} ==", title);
}

fn bullets(out: &mut String, items: &[String]) {
    for item in items {
        let _ = writeln!(out, "  - {}", item);
    }
}

fn bar(value: f64) -> String {
    let filled = (value.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

pub fn climate_panel(climate: &ClimateData) -> String {
    let mut out = String::new();
    heading(&mut out, &format!("Climate: {}", climate.location));
    let _ = writeln!(out, "Zone:        {}", climate.climate_zone);
    let _ = writeln!(out, "Temperature: {}", climate.avg_temp_range);
    let _ = writeln!(out, "Solar:       {}", climate.solar_potential);
    let _ = writeln!(out, "Winds:       {}", climate.prevailing_winds);
    if !climate.challenges.is_empty() {
        let _ = writeln!(out, "Challenges:");
        bullets(&mut out, &climate.challenges);
    }
    if !climate.strategies.is_empty() {
        let _ = writeln!(out, "Strategies:");
        bullets(&mut out, &climate.strategies);
    }
    let _ = writeln!(out, "Orientation: {}", climate.orientation_guidance);
    let _ = writeln!(out, "Windows:     {}", climate.window_guidance);
    let _ = writeln!(out, "Zoning:      {}", climate.zoning_guidance);
    out
}

pub fn metrics_panel(metrics: &PerformanceMetrics) -> String {
    let mut out = String::new();
    heading(&mut out, "Performance");
    for (label, value) in metrics.entries() {
        let _ = writeln!(
            out,
            "{:<14}{} {:>3}%",
            label,
            bar(value),
            (value * 100.0).round() as i64
        );
    }
    let _ = writeln!(out, "Overall score: {}", metrics.overall_score());
    out
}

pub fn plan_panel(plan: &FloorPlan) -> String {
    let mut out = String::new();
    heading(&mut out, &plan.title);
    let area = if plan.total_area > 0.0 {
        plan.total_area
    } else {
        plan.room_area()
    };
    let _ = writeln!(
        out,
        "{} rooms, {:.1} m², oriented {:.0}°",
        plan.rooms.len(),
        area,
        plan.orientation
    );
    for room in &plan.rooms {
        let _ = writeln!(
            out,
            "  {:<22} {:<12} {:>5.1} m²  {}",
            room.name,
            room.category.to_string(),
            room.area(),
            room.rationale
        );
    }
    out
}

pub fn reasoning_panel(plan: &FloorPlan) -> String {
    let mut out = String::new();
    heading(&mut out, "Architect's reasoning");
    let _ = writeln!(out, "{}", plan.reasoning);
    out
}

pub fn alternatives_panel(alternatives: &[RejectedAlternative]) -> String {
    let mut out = String::new();
    heading(&mut out, "Rejected alternatives");
    if alternatives.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for alt in alternatives {
        let _ = writeln!(out, "  x {}: {}", alt.option, alt.reason);
    }
    out
}

pub fn refinement_panel(result: &RefinementResult) -> String {
    let mut out = String::new();
    heading(&mut out, "Refinement");
    bullets(&mut out, &result.changes);
    let deltas = &result.improvements;
    let _ = writeln!(
        out,
        "Thermal:  {:+.0}%  {}",
        deltas.thermal_gain_percent, deltas.thermal_explanation
    );
    let _ = writeln!(
        out,
        "Daylight: {:+.0}%  {}",
        deltas.daylight_gain_percent, deltas.daylight_explanation
    );
    out
}

pub fn evaluation_panel(evaluation: &OptimizationEvaluation) -> String {
    let mut out = String::new();
    heading(&mut out, "Optimization verdict");
    let _ = writeln!(
        out,
        "{}",
        if evaluation.further_iteration {
            "Further iteration is justified"
        } else {
            "Design has converged"
        }
    );
    bullets(&mut out, &evaluation.adjustments);
    let _ = writeln!(out, "Expected benefit: {}", evaluation.expected_benefit);
    out
}

pub fn history_panel(history: &[HistoryEntry]) -> String {
    let mut out = String::new();
    heading(&mut out, "History");
    for entry in history {
        let _ = writeln!(out, "  {:>2}. {}", entry.seq, entry.message);
    }
    out
}

/// Persistent banner for the most recent error, if any
pub fn error_banner(error: Option<&str>) -> Option<String> {
    error.map(|e| format!("!! {}", e))
}

/// All panels that apply to `state`, in display order
pub fn session_report(state: &AppState) -> String {
    let mut sections = Vec::new();

    if let Some(banner) = error_banner(state.error.as_deref()) {
        sections.push(banner + "\n");
    }
    if let Some(climate) = &state.climate {
        sections.push(climate_panel(climate));
    }
    if let Some(plan) = &state.plan {
        sections.push(plan_panel(plan));
        sections.push(metrics_panel(&plan.metrics));
        sections.push(reasoning_panel(plan));
        sections.push(alternatives_panel(&plan.rejected_alternatives));
    }
    if let Some(refinement) = &state.refinement {
        sections.push(refinement_panel(refinement));
    }
    if let Some(evaluation) = &state.evaluation {
        sections.push(evaluation_panel(evaluation));
    }
    if !state.history.is_empty() {
        sections.push(history_panel(&state.history));
    }

    sections.join("\n")
}
