//! Pure state transitions: old state + event -> new state

use crate::controller::state::{AppState, DIAGNOSE_ERROR, REFINE_ERROR};
use crate::model::{
    ClimateData, ClimateDiagnostics, FloorPlan, OptimizationEvaluation, RefinementResult,
};

/// Everything that can happen to the session state
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    GenerateStarted,
    /// Climate and plan are committed together or not at all
    GenerateSucceeded {
        climate: ClimateData,
        plan: FloorPlan,
    },
    GenerateFailed {
        message: String,
    },

    RefineStarted,
    /// `revision` is the plan revision the refinement was computed from
    RefineSucceeded {
        revision: u64,
        result: RefinementResult,
    },
    EvaluateStarted,
    /// `revision` is the refined plan's revision
    EvaluateSucceeded {
        revision: u64,
        evaluation: OptimizationEvaluation,
    },
    /// Either the refine call or its evaluation failed
    RefineFailed,

    DiagnoseStarted,
    DiagnoseSucceeded {
        revision: u64,
        diagnostics: ClimateDiagnostics,
    },
    DiagnoseFailed,

    ErrorCleared,
}

/// Apply one event
///
/// Results tagged with a revision other than the current `plan_revision`
/// are dropped: the busy flag is cleared and a history line records the
/// discard, but the plan is left alone.
pub fn update(mut state: AppState, event: Event) -> AppState {
    match event {
        Event::GenerateStarted => {
            state.generating = true;
            state.error = None;
            state.refinement = None;
            state.evaluation = None;
            state.previous_plan = None;
        }
        Event::GenerateSucceeded { climate, plan } => {
            state.generating = false;
            state.log(format!(
                "Generated '{}' for {} ({} rooms)",
                plan.title,
                climate.location,
                plan.rooms.len()
            ));
            state.climate = Some(climate);
            state.plan = Some(plan);
            // A refinement that landed while this design was in flight
            // belongs to the plan just replaced
            state.refinement = None;
            state.evaluation = None;
            state.previous_plan = None;
            state.plan_revision += 1;
        }
        Event::GenerateFailed { message } => {
            state.generating = false;
            state.error = Some(message);
        }

        Event::RefineStarted => {
            state.refining = true;
            state.error = None;
        }
        Event::RefineSucceeded { revision, result } => {
            state.refining = false;
            if revision != state.plan_revision || state.plan.is_none() {
                tracing::warn!(
                    revision,
                    current = state.plan_revision,
                    "discarding refinement computed for a superseded plan"
                );
                state.log("Discarded refinement of a superseded plan");
                return state;
            }
            state.log(format!(
                "Refined design: {} change(s), thermal +{:.0}%, daylight +{:.0}%",
                result.changes.len(),
                result.improvements.thermal_gain_percent,
                result.improvements.daylight_gain_percent
            ));
            state.previous_plan = state.plan.take();
            state.plan = Some(result.plan.clone());
            state.refinement = Some(result);
            state.plan_revision += 1;
        }
        Event::EvaluateStarted => {
            state.evaluating = true;
        }
        Event::EvaluateSucceeded {
            revision,
            evaluation,
        } => {
            state.evaluating = false;
            if revision != state.plan_revision {
                tracing::warn!(
                    revision,
                    current = state.plan_revision,
                    "discarding evaluation of a superseded plan"
                );
                state.log("Discarded evaluation of a superseded plan");
                return state;
            }
            state.log(if evaluation.further_iteration {
                "Optimization verdict: further iteration recommended"
            } else {
                "Optimization verdict: design has converged"
            });
            state.evaluation = Some(evaluation);
        }
        Event::RefineFailed => {
            state.refining = false;
            state.evaluating = false;
            state.error = Some(REFINE_ERROR.to_string());
        }

        Event::DiagnoseStarted => {
            state.diagnosing = true;
            state.error = None;
        }
        Event::DiagnoseSucceeded {
            revision,
            diagnostics,
        } => {
            state.diagnosing = false;
            if revision != state.plan_revision || state.plan.is_none() {
                tracing::warn!(
                    revision,
                    current = state.plan_revision,
                    "discarding diagnostics computed for a superseded plan"
                );
                state.log("Discarded diagnostics of a superseded plan");
                return state;
            }
            let count = diagnostics.entry_count();
            state.plan = state
                .plan
                .take()
                .map(|plan| plan.with_diagnostics(diagnostics));
            state.log(format!("Diagnostics refreshed ({} entries)", count));
        }
        Event::DiagnoseFailed => {
            state.diagnosing = false;
            state.error = Some(DIAGNOSE_ERROR.to_string());
        }

        Event::ErrorCleared => {
            state.error = None;
        }
    }
    state
}
