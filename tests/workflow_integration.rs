//! End-to-end session tests against the canned design service

use climate_architect::controller::{AppState, Controller, Outcome, REFINE_ERROR};
use climate_architect::core::error::{ArchitectError, Result};
use climate_architect::model::{
    ClimateData, ClimateDiagnostics, FloorPlan, OptimizationEvaluation, PerformanceMetrics,
    Priority, RefinementResult, SiteBrief,
};
use climate_architect::render::report;
use climate_architect::service::{DesignService, Operation, StubDesignService};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

fn phoenix() -> SiteBrief {
    SiteBrief::new("Phoenix", "20m x 15m").with_priority(Priority::Cooling)
}

async fn generated(stub: StubDesignService) -> Controller<StubDesignService> {
    let controller = Controller::new(stub);
    assert_eq!(controller.generate(&phoenix()).await.unwrap(), Outcome::Applied);
    controller
}

/// Stub that holds back one operation: either a few yields (so a concurrent
/// workflow on the same task can overtake it) or until a gate opens
struct Delayed {
    inner: StubDesignService,
    operation: Operation,
    yields: usize,
    gate: Option<Arc<Semaphore>>,
}

impl Delayed {
    fn yielding(operation: Operation, yields: usize) -> Self {
        Self {
            inner: StubDesignService::new(),
            operation,
            yields,
            gate: None,
        }
    }

    fn gated(operation: Operation, gate: Arc<Semaphore>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::yielding(operation, 0)
        }
    }

    async fn hold(&self, operation: Operation) {
        if operation != self.operation {
            return;
        }
        for _ in 0..self.yields {
            tokio::task::yield_now().await;
        }
        if let Some(gate) = &self.gate {
            let _permit = gate.acquire().await;
        }
    }
}

impl DesignService for Delayed {
    async fn fetch_climate(
        &self,
        location: &str,
        plot_dimensions: &str,
        priority: Priority,
    ) -> Result<ClimateData> {
        self.hold(Operation::FetchClimate).await;
        self.inner
            .fetch_climate(location, plot_dimensions, priority)
            .await
    }

    async fn generate_design(
        &self,
        climate: &ClimateData,
        plot_dimensions: &str,
        requirements: &str,
    ) -> Result<FloorPlan> {
        self.hold(Operation::GenerateDesign).await;
        self.inner
            .generate_design(climate, plot_dimensions, requirements)
            .await
    }

    async fn refine(&self, plan: &FloorPlan, climate: &ClimateData) -> Result<RefinementResult> {
        self.hold(Operation::Refine).await;
        self.inner.refine(plan, climate).await
    }

    async fn run_diagnostics(&self, plan: &FloorPlan) -> Result<ClimateDiagnostics> {
        self.hold(Operation::RunDiagnostics).await;
        self.inner.run_diagnostics(plan).await
    }

    async fn evaluate(&self, metrics: &PerformanceMetrics) -> Result<OptimizationEvaluation> {
        self.hold(Operation::Evaluate).await;
        self.inner.evaluate(metrics).await
    }
}

#[tokio::test]
async fn test_phoenix_cooling_scenario() {
    let controller = generated(StubDesignService::new()).await;
    let state = controller.state();

    let climate = state.climate.as_ref().unwrap();
    assert!(climate.climate_zone.to_lowercase().contains("desert"));

    let plan = state.plan.as_ref().unwrap();
    assert!(!plan.rooms.is_empty());
    for (label, value) in plan.metrics.entries() {
        assert!((0.0..=1.0).contains(&value), "{} out of range", label);
    }

    let m = plan.metrics;
    let mean = (m.daylight + m.ventilation + m.thermal_mass + m.solar_control) / 4.0;
    let expected = (mean * 100.0).round() as u32;
    assert_eq!(plan.metrics.overall_score(), expected);
    assert!(report::session_report(&state).contains(&format!("Overall score: {}", expected)));

    assert_eq!(
        controller.service().calls(),
        vec![Operation::FetchClimate, Operation::GenerateDesign]
    );
    assert!(state.error.is_none());
    assert!(!state.is_busy());
}

#[tokio::test]
async fn test_blank_location_rejected_before_any_call() {
    let controller = Controller::new(StubDesignService::new());
    let result = controller.generate(&SiteBrief::new("   ", "20m x 15m")).await;

    assert!(matches!(result, Err(ArchitectError::Precondition(_))));
    assert!(controller.service().calls().is_empty());
    assert_eq!(controller.state(), AppState::new());
}

#[tokio::test]
async fn test_generate_failure_keeps_previous_design() {
    let first = generated(StubDesignService::new()).await.into_state();

    let controller = Controller::with_state(
        StubDesignService::new().failing(Operation::GenerateDesign),
        first.clone(),
    );
    assert_eq!(controller.generate(&phoenix()).await.unwrap(), Outcome::Failed);

    let state = controller.state();
    assert_eq!(state.climate, first.climate);
    assert_eq!(state.plan, first.plan);
    assert!(state
        .error
        .as_deref()
        .unwrap()
        .starts_with("Failed to generate design:"));
    assert_eq!(
        controller.service().calls(),
        vec![Operation::FetchClimate, Operation::GenerateDesign]
    );
}

#[tokio::test]
async fn test_failed_climate_fetch_skips_design_call() {
    let controller = Controller::new(StubDesignService::new().failing(Operation::FetchClimate));
    assert_eq!(controller.generate(&phoenix()).await.unwrap(), Outcome::Failed);

    assert_eq!(controller.service().calls(), vec![Operation::FetchClimate]);
    let state = controller.state();
    assert!(state.plan.is_none());
    assert!(state.error.is_some());
    assert!(!state.generating);
}

#[tokio::test]
async fn test_refine_then_evaluate() {
    let controller = generated(StubDesignService::new()).await;
    let original = controller.state().plan.unwrap();

    assert_eq!(controller.refine().await.unwrap(), Outcome::Applied);

    let state = controller.state();
    assert_eq!(state.previous_plan.as_ref(), Some(&original));
    assert!(state.plan.as_ref().unwrap().title.ends_with("(refined)"));
    assert!(state.refinement.is_some());
    assert!(state.evaluation.is_some());
    assert!(!state.controls().can_refine);
    assert_eq!(
        &controller.service().calls()[2..],
        &[Operation::Refine, Operation::Evaluate]
    );
}

#[tokio::test]
async fn test_evaluate_failure_keeps_refined_plan() {
    let controller = generated(StubDesignService::new().failing(Operation::Evaluate)).await;

    assert_eq!(controller.refine().await.unwrap(), Outcome::Failed);

    let state = controller.state();
    assert_eq!(state.error.as_deref(), Some(REFINE_ERROR));
    assert!(state.refinement.is_some());
    assert!(state.evaluation.is_none());
    assert!(!state.refining && !state.evaluating);
}

#[tokio::test]
async fn test_refine_failure_leaves_plan_alone() {
    let controller = generated(StubDesignService::new().failing(Operation::Refine)).await;
    let before = controller.state();

    assert_eq!(controller.refine().await.unwrap(), Outcome::Failed);

    let state = controller.state();
    assert_eq!(state.plan, before.plan);
    assert_eq!(state.error.as_deref(), Some(REFINE_ERROR));
    assert!(!controller.service().calls().contains(&Operation::Evaluate));
}

#[tokio::test]
async fn test_diagnose_replaces_only_diagnostics() {
    let controller = generated(StubDesignService::new()).await;
    let before = controller.state().plan.unwrap();

    assert_eq!(controller.diagnose().await.unwrap(), Outcome::Applied);

    let after = controller.state().plan.unwrap();
    assert_ne!(after.diagnostics, before.diagnostics);
    assert_eq!(after, before.with_diagnostics(after.diagnostics.clone()));
}

#[tokio::test]
async fn test_diagnose_is_idempotent() {
    let controller = generated(StubDesignService::new()).await;

    controller.diagnose().await.unwrap();
    let once = controller.state().plan.unwrap();
    controller.diagnose().await.unwrap();
    let twice = controller.state().plan.unwrap();

    assert_eq!(once, twice);
}

#[tokio::test]
async fn test_diagnostics_for_superseded_plan_are_dropped() {
    let controller = Controller::new(Delayed::yielding(Operation::RunDiagnostics, 3));
    controller.generate(&phoenix()).await.unwrap();

    let (diagnosed, refined) = tokio::join!(controller.diagnose(), controller.refine());
    assert_eq!(diagnosed.unwrap(), Outcome::Stale);
    assert_eq!(refined.unwrap(), Outcome::Applied);

    let state = controller.state();
    let plan = state.plan.as_ref().unwrap();
    let refinement = state.refinement.as_ref().unwrap();
    // The refined plan keeps the diagnostics it arrived with
    assert_eq!(plan.diagnostics, refinement.plan.diagnostics);
    assert!(!state.diagnosing);
    assert!(state
        .history
        .iter()
        .any(|entry| entry.message.contains("superseded")));
}

#[tokio::test]
async fn test_overlapping_diagnose_rejected() {
    let controller = Controller::new(Delayed::yielding(Operation::RunDiagnostics, 3));
    controller.generate(&phoenix()).await.unwrap();

    let (first, second) = tokio::join!(controller.diagnose(), controller.diagnose());
    assert_eq!(first.unwrap(), Outcome::Applied);
    assert!(matches!(second, Err(ArchitectError::Precondition(_))));
}

#[tokio::test]
async fn test_new_design_resets_refinement() {
    let controller = generated(StubDesignService::new()).await;
    controller.refine().await.unwrap();
    assert!(!controller.state().controls().can_refine);

    controller.generate(&phoenix()).await.unwrap();

    let state = controller.state();
    assert!(state.refinement.is_none());
    assert!(state.evaluation.is_none());
    assert!(state.previous_plan.is_none());
    assert!(state.controls().can_refine);
}

#[tokio::test]
async fn test_refine_overtaken_by_new_design_is_discarded() {
    let controller = Controller::new(Delayed::yielding(Operation::FetchClimate, 5));
    controller.generate(&phoenix()).await.unwrap();

    // Generate is parked in fetch_climate while the old plan is refined
    let location = phoenix();
    let (generated, refined) = tokio::join!(controller.generate(&location), controller.refine());
    assert_eq!(generated.unwrap(), Outcome::Applied);
    assert_eq!(refined.unwrap(), Outcome::Applied);

    let state = controller.state();
    assert!(!state.plan.as_ref().unwrap().title.ends_with("(refined)"));
    assert!(state.refinement.is_none());
    assert!(state.evaluation.is_none());
    assert!(state.previous_plan.is_none());
    assert!(state.controls().can_refine);
    assert!(!state.is_busy());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_generates_admit_exactly_one() {
    const CALLERS: usize = 8;
    let gate = Arc::new(Semaphore::new(0));
    let controller = Arc::new(Controller::new(Delayed::gated(
        Operation::FetchClimate,
        Arc::clone(&gate),
    )));

    let handles: Vec<_> = (0..CALLERS)
        .map(|_| {
            let controller = Arc::clone(&controller);
            tokio::spawn(async move { controller.generate(&phoenix()).await })
        })
        .collect();

    // Everyone but the admitted caller returns without reaching the gate
    tokio::time::timeout(Duration::from_secs(5), async {
        while handles.iter().filter(|h| h.is_finished()).count() < CALLERS - 1 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("more than one generate got past the busy check");

    gate.add_permits(CALLERS);
    let mut applied = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(Outcome::Applied) => applied += 1,
            Err(ArchitectError::Precondition(_)) => rejected += 1,
            other => panic!("unexpected result: {:?}", other),
        }
    }
    assert_eq!((applied, rejected), (1, CALLERS - 1));
    assert_eq!(
        controller
            .service()
            .inner
            .calls()
            .iter()
            .filter(|op| **op == Operation::FetchClimate)
            .count(),
        1
    );
}
