//! Remote design capability
//!
//! All domain reasoning (climate analysis, plan synthesis, diagnostics,
//! refinement, convergence) happens behind this trait. `LlmDesignService`
//! talks to a text-generation endpoint; `StubDesignService` answers with
//! deterministic canned data for tests and offline runs.

pub mod llm;
pub mod stub;

use crate::core::error::Result;
use crate::model::{
    ClimateData, ClimateDiagnostics, FloorPlan, OptimizationEvaluation, PerformanceMetrics,
    Priority, RefinementResult,
};

pub use llm::LlmDesignService;
pub use stub::{Operation, StubDesignService};

/// Design operations, one outbound request each
///
/// No caching, deduplication or retry happens at this layer; failures
/// propagate to the caller unchanged.
#[trait_variant::make(DesignService: Send)]
pub trait LocalDesignService {
    /// Climate profile for a site
    async fn fetch_climate(
        &self,
        location: &str,
        plot_dimensions: &str,
        priority: Priority,
    ) -> Result<ClimateData>;

    /// Initial floor plan for a climate and brief
    async fn generate_design(
        &self,
        climate: &ClimateData,
        plot_dimensions: &str,
        requirements: &str,
    ) -> Result<FloorPlan>;

    /// Revised plan; the current plan is sent in full
    async fn refine(&self, plan: &FloorPlan, climate: &ClimateData) -> Result<RefinementResult>;

    /// Fresh diagnostics for a plan
    async fn run_diagnostics(&self, plan: &FloorPlan) -> Result<ClimateDiagnostics>;

    /// Verdict on whether another refinement is worthwhile
    async fn evaluate(&self, metrics: &PerformanceMetrics) -> Result<OptimizationEvaluation>;
}
