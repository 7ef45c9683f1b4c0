//! Application state for the design session

use crate::model::{ClimateData, FloorPlan, OptimizationEvaluation, RefinementResult};
use serde::Serialize;

/// Fixed banner text for a failed refine or its follow-up evaluation
pub const REFINE_ERROR: &str = "Refinement failed. Please try again.";

/// Fixed banner text for a failed diagnostics audit
pub const DIAGNOSE_ERROR: &str = "Diagnostics audit failed. Please try again.";

/// One line of the append-only action history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// 1-based position in the history
    pub seq: usize,
    pub message: String,
}

/// Everything the renderers need, as one value
///
/// Sub-objects are replaced wholesale by `update`; nothing mutates a plan in
/// place. `plan_revision` increments whenever Generate or Refine replaces the
/// current plan, so late results computed against an older plan can be told
/// apart from current ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppState {
    pub generating: bool,
    pub refining: bool,
    pub evaluating: bool,
    pub diagnosing: bool,

    pub climate: Option<ClimateData>,
    pub plan: Option<FloorPlan>,
    pub previous_plan: Option<FloorPlan>,
    pub refinement: Option<RefinementResult>,
    pub evaluation: Option<OptimizationEvaluation>,
    pub error: Option<String>,
    pub history: Vec<HistoryEntry>,

    pub plan_revision: u64,
}

/// Which actions are currently available (the enabled state of the controls)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub can_generate: bool,
    /// Offered once per design, before any refinement exists
    pub can_refine: bool,
    pub can_diagnose: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.generating || self.refining || self.evaluating || self.diagnosing
    }

    pub fn controls(&self) -> Controls {
        let has_plan = self.plan.is_some();
        Controls {
            can_generate: !self.generating,
            can_refine: has_plan
                && self.climate.is_some()
                && self.refinement.is_none()
                && !self.refining
                && !self.evaluating,
            can_diagnose: has_plan && !self.diagnosing,
        }
    }

    pub(crate) fn log(&mut self, message: impl Into<String>) {
        let seq = self.history.len() + 1;
        self.history.push(HistoryEntry {
            seq,
            message: message.into(),
        });
    }
}
