//! Generate / Refine / Diagnose workflows
//!
//! Each workflow is a fixed sequence of service calls with busy-flag
//! bookkeeping. Every state change goes through `update`. The state lock is
//! only held while an event is applied, never across a service call, so two
//! different workflows may be in flight at once (e.g. via `tokio::join!`).

use crate::controller::state::AppState;
use crate::controller::update::{update, Event};
use crate::core::error::{ArchitectError, Result};
use crate::model::SiteBrief;
use crate::service::DesignService;
use std::sync::{Mutex, MutexGuard};
use tracing::Instrument;
use uuid::Uuid;

/// How a workflow ended (remote failures are recorded in state, not returned)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Results were stored
    Applied,
    /// The service answered, but the plan had changed in the meantime
    Stale,
    /// A service call failed; the error banner is set
    Failed,
}

/// Owns the session state and sequences calls to a design service
pub struct Controller<S> {
    service: S,
    state: Mutex<AppState>,
}

impl<S: DesignService> Controller<S> {
    pub fn new(service: S) -> Self {
        Self::with_state(service, AppState::new())
    }

    pub fn with_state(service: S, state: AppState) -> Self {
        Self {
            service,
            state: Mutex::new(state),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Snapshot of the current state
    pub fn state(&self) -> AppState {
        self.lock().clone()
    }

    pub fn into_state(self) -> AppState {
        self.state
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn clear_error(&self) {
        self.apply(Event::ErrorCleared);
    }

    fn lock(&self) -> MutexGuard<'_, AppState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn apply(&self, event: Event) {
        transition(&mut *self.lock(), event);
    }

    /// Run `ready` and, if it passes, apply `event` under the same lock
    ///
    /// Two callers can never both pass a busy-flag check this way.
    fn start<T>(&self, event: Event, ready: impl FnOnce(&AppState) -> Result<T>) -> Result<T> {
        let mut guard = self.lock();
        let taken = ready(&*guard)?;
        transition(&mut *guard, event);
        Ok(taken)
    }

    /// Apply a revision-tagged event; true if `revision` was still current
    fn apply_tagged(&self, revision: u64, event: Event) -> bool {
        let mut guard = self.lock();
        let current = guard.plan_revision == revision;
        transition(&mut *guard, event);
        current
    }

    /// Fetch the climate, then design a plan for it
    ///
    /// Requires a non-blank location. Climate and plan are stored together
    /// only when both calls succeed.
    pub async fn generate(&self, brief: &SiteBrief) -> Result<Outcome> {
        if !brief.has_location() {
            return Err(ArchitectError::Precondition("a site location is required".into()));
        }
        self.start(Event::GenerateStarted, |state| {
            if state.generating {
                Err(ArchitectError::Precondition(
                    "a design is already being generated".into(),
                ))
            } else {
                Ok(())
            }
        })?;

        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("generate", %run_id, location = %brief.location.trim());

        async {
            tracing::info!(priority = %brief.priority, "generating design");

            let result = async {
                let climate = self
                    .service
                    .fetch_climate(&brief.location, &brief.plot_dimensions, brief.priority)
                    .await?;
                tracing::info!(zone = %climate.climate_zone, "climate profile received");
                let plan = self
                    .service
                    .generate_design(&climate, &brief.plot_dimensions, &brief.requirements)
                    .await?;
                Ok::<_, ArchitectError>((climate, plan))
            }
            .await;

            match result {
                Ok((climate, plan)) => {
                    for warning in plan.warnings() {
                        tracing::warn!(%warning, "plan accepted with defects");
                    }
                    tracing::info!(rooms = plan.rooms.len(), title = %plan.title, "design stored");
                    self.apply(Event::GenerateSucceeded { climate, plan });
                    Ok(Outcome::Applied)
                }
                Err(e) => {
                    tracing::error!(error = %e, "design generation failed");
                    self.apply(Event::GenerateFailed {
                        message: format!("Failed to generate design: {}", e),
                    });
                    Ok(Outcome::Failed)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Refine the current plan, then evaluate the refined plan's metrics
    pub async fn refine(&self) -> Result<Outcome> {
        let (plan, climate, revision) = self.start(Event::RefineStarted, |state| {
            if state.refining || state.evaluating {
                return Err(ArchitectError::Precondition(
                    "a refinement is already in progress".into(),
                ));
            }
            match (state.plan.clone(), state.climate.clone()) {
                (Some(plan), Some(climate)) => Ok((plan, climate, state.plan_revision)),
                _ => Err(ArchitectError::Precondition(
                    "refinement needs a generated plan and climate".into(),
                )),
            }
        })?;

        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("refine", %run_id, revision);

        async {
            tracing::info!(title = %plan.title, "refining design");

            let result = match self.service.refine(&plan, &climate).await {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!(error = %e, "refinement failed");
                    self.apply(Event::RefineFailed);
                    return Ok(Outcome::Failed);
                }
            };

            let metrics = result.plan.metrics;
            if !self.apply_tagged(revision, Event::RefineSucceeded { revision, result }) {
                return Ok(Outcome::Stale);
            }

            // The refined plan is now one revision ahead
            let refined_revision = revision + 1;
            self.apply(Event::EvaluateStarted);
            match self.service.evaluate(&metrics).await {
                Ok(evaluation) => {
                    tracing::info!(
                        further_iteration = evaluation.further_iteration,
                        "optimization verdict received"
                    );
                    let applied = self.apply_tagged(
                        refined_revision,
                        Event::EvaluateSucceeded {
                            revision: refined_revision,
                            evaluation,
                        },
                    );
                    Ok(if applied {
                        Outcome::Applied
                    } else {
                        Outcome::Stale
                    })
                }
                Err(e) => {
                    tracing::error!(error = %e, "optimization evaluation failed");
                    self.apply(Event::RefineFailed);
                    Ok(Outcome::Failed)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Re-run diagnostics for the current plan, replacing only its diagnostics
    pub async fn diagnose(&self) -> Result<Outcome> {
        let (plan, revision) = self.start(Event::DiagnoseStarted, |state| {
            if state.diagnosing {
                return Err(ArchitectError::Precondition(
                    "a diagnostics audit is already running".into(),
                ));
            }
            match state.plan.clone() {
                Some(plan) => Ok((plan, state.plan_revision)),
                None => Err(ArchitectError::Precondition(
                    "diagnostics need a generated plan".into(),
                )),
            }
        })?;

        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("diagnose", %run_id, revision);

        async {
            tracing::info!(rooms = plan.rooms.len(), "running diagnostics audit");

            match self.service.run_diagnostics(&plan).await {
                Ok(diagnostics) => {
                    let applied = self.apply_tagged(
                        revision,
                        Event::DiagnoseSucceeded {
                            revision,
                            diagnostics,
                        },
                    );
                    Ok(if applied {
                        Outcome::Applied
                    } else {
                        Outcome::Stale
                    })
                }
                Err(e) => {
                    tracing::error!(error = %e, "diagnostics audit failed");
                    self.apply(Event::DiagnoseFailed);
                    Ok(Outcome::Failed)
                }
            }
        }
        .instrument(span)
        .await
    }
}

fn transition(state: &mut AppState, event: Event) {
    let old = std::mem::take(state);
    *state = update(old, event);
}
