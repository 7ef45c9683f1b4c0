//! Async LLM client for structured design requests
//!
//! This is a model-agnostic HTTP client for calling LLM APIs.
//! Supports both Anthropic and OpenAI-compatible APIs (DeepSeek, etc).
//! The client only moves text; prompts and schemas live in `llm::prompts`
//! and JSON handling in `llm::extract`.

use crate::core::error::{ArchitectError, Result};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";

/// API format type
#[derive(Debug, Clone, PartialEq)]
pub enum ApiFormat {
    Anthropic,
    OpenAI,
}

/// Async LLM client for making API calls
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    api_url: String,
    model: String,
    api_format: ApiFormat,
    max_tokens: u32,
}

impl std::fmt::Debug for LlmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmClient")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("api_format", &self.api_format)
            .finish_non_exhaustive()
    }
}

impl LlmClient {
    /// Create a new LLM client with explicit configuration
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        let api_format = Self::detect_api_format(&api_url);
        Self {
            client: Client::new(),
            api_key,
            api_url,
            model,
            api_format,
            // Floor plans with rationale per room run long
            max_tokens: 8192,
        }
    }

    /// Detect API format from URL
    fn detect_api_format(url: &str) -> ApiFormat {
        if url.contains("anthropic.com") {
            ApiFormat::Anthropic
        } else {
            // DeepSeek, OpenAI, and other compatible APIs use OpenAI format
            ApiFormat::OpenAI
        }
    }

    /// Create a client from environment variables
    ///
    /// Required: LLM_API_KEY (presence only; validity shows up at first call)
    /// Optional: LLM_API_URL (defaults to Anthropic API)
    /// Optional: LLM_MODEL
    /// Optional: LLM_MAX_TOKENS
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Same as `from_env`, reading variables through `var`
    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = var("LLM_API_KEY")
            .ok_or_else(|| ArchitectError::ConfigError("LLM_API_KEY not set".into()))?;
        let api_url = var("LLM_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into());
        let model = var("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into());

        let client = Self::new(api_key, api_url, model);
        match var("LLM_MAX_TOKENS") {
            Some(raw) => {
                let max_tokens = raw.trim().parse().map_err(|_| {
                    ArchitectError::ConfigError(format!("LLM_MAX_TOKENS is not a number: {}", raw))
                })?;
                Ok(client.with_max_tokens(max_tokens))
            }
            None => Ok(client),
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn api_format(&self) -> &ApiFormat {
        &self.api_format
    }

    /// Send a completion request to the LLM
    ///
    /// # Arguments
    /// * `system` - System prompt carrying instructions and the output schema
    /// * `user` - Request payload
    ///
    /// # Returns
    /// The LLM's text response
    pub async fn complete(&self, system: &str, user: &str) -> Result<String> {
        tracing::debug!(
            model = %self.model,
            system_chars = system.len(),
            user_chars = user.len(),
            "sending completion request"
        );

        match self.api_format {
            ApiFormat::Anthropic => self.complete_anthropic(system, user).await,
            ApiFormat::OpenAI => self.complete_openai(system, user).await,
        }
    }

    async fn complete_anthropic(&self, system: &str, user: &str) -> Result<String> {
        let request = AnthropicRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system,
            messages: vec![Message {
                role: "user",
                content: user,
            }],
        };
        let builder = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01");

        let completion: AnthropicResponse = Self::send(builder, &request).await?;
        completion
            .content
            .into_iter()
            .next()
            .map(|c| c.text)
            .ok_or_else(|| ArchitectError::LlmError("Empty response".into()))
    }

    async fn complete_openai(&self, system: &str, user: &str) -> Result<String> {
        let request = OpenAIRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: vec![
                Message {
                    role: "system",
                    content: system,
                },
                Message {
                    role: "user",
                    content: user,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };
        let builder = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key);

        let completion: OpenAIResponse = Self::send(builder, &request).await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ArchitectError::LlmError("Empty response".into()))
    }

    /// POST a JSON body; non-2xx statuses become `LlmError` with the body text
    async fn send<B, R>(builder: RequestBuilder, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = builder
            .json(body)
            .send()
            .await
            .map_err(|e| ArchitectError::LlmError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "completion endpoint rejected request");
            return Err(ArchitectError::LlmError(format!(
                "API error ({}): {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ArchitectError::LlmError(e.to_string()))
    }
}

// Anthropic API format
#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

// OpenAI-compatible API format (DeepSeek, OpenAI, etc.)
#[derive(Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}
