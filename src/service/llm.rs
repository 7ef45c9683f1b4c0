use crate::core::error::Result;
use crate::llm::client::LlmClient;
use crate::llm::extract::parse_response;
use crate::llm::prompts::{self, Prompt, RequestKind};
use crate::model::{
    ClimateData, ClimateDiagnostics, FloorPlan, OptimizationEvaluation, PerformanceMetrics,
    Priority, RefinementResult,
};
use crate::service::DesignService;
use serde::de::DeserializeOwned;

/// Design service backed by an LLM endpoint
#[derive(Debug, Clone)]
pub struct LlmDesignService {
    client: LlmClient,
}

impl LlmDesignService {
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }

    /// Build the service from `LLM_API_KEY` / `LLM_API_URL` / `LLM_MODEL`
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(LlmClient::from_env()?))
    }

    async fn request<T: DeserializeOwned>(&self, kind: RequestKind, prompt: Prompt) -> Result<T> {
        tracing::debug!(%kind, payload_chars = prompt.user.len(), "design request");
        let response = self.client.complete(&prompt.system, &prompt.user).await?;
        let parsed = parse_response(&response, &kind.to_string())?;
        tracing::debug!(%kind, response_chars = response.len(), "design response parsed");
        Ok(parsed)
    }
}

impl DesignService for LlmDesignService {
    async fn fetch_climate(
        &self,
        location: &str,
        plot_dimensions: &str,
        priority: Priority,
    ) -> Result<ClimateData> {
        let prompt = prompts::climate_prompt(location, plot_dimensions, priority);
        self.request(RequestKind::Climate, prompt).await
    }

    async fn generate_design(
        &self,
        climate: &ClimateData,
        plot_dimensions: &str,
        requirements: &str,
    ) -> Result<FloorPlan> {
        let prompt = prompts::design_prompt(climate, plot_dimensions, requirements)?;
        self.request(RequestKind::Design, prompt).await
    }

    async fn refine(&self, plan: &FloorPlan, climate: &ClimateData) -> Result<RefinementResult> {
        let prompt = prompts::refine_prompt(plan, climate)?;
        self.request(RequestKind::Refinement, prompt).await
    }

    async fn run_diagnostics(&self, plan: &FloorPlan) -> Result<ClimateDiagnostics> {
        let prompt = prompts::diagnostics_prompt(plan)?;
        self.request(RequestKind::Diagnostics, prompt).await
    }

    async fn evaluate(&self, metrics: &PerformanceMetrics) -> Result<OptimizationEvaluation> {
        let prompt = prompts::evaluation_prompt(metrics)?;
        self.request(RequestKind::Evaluation, prompt).await
    }
}
