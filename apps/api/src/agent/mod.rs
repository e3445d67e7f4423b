/// Agent client — the single point of entry for all upstream LLM calls.
///
/// ARCHITECTURAL RULE: no other module may call the Anthropic API directly.
/// Transports implement [`AgentClient`]; retry and deadline policy live in
/// [`retry`] and are applied by the caller, uniformly, whatever the
/// concrete transport.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod retry;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
/// Messages API version header; also reported by `/health` as `sdk_version`.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Upstream failure taxonomy. Everything except [`AgentError::Unknown`] is
/// considered transient and eligible for retry.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("rate limited by upstream API")]
    RateLimited { retry_after: Option<u64> },

    #[error("upstream service unavailable (status {status}): {message}")]
    ServiceUnavailable { status: u16, message: String },

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected agent failure: {0}")]
    Unknown(String),
}

impl AgentError {
    pub fn is_retryable(&self) -> bool {
        !matches!(self, AgentError::Unknown(_))
    }
}

/// A fully assembled prompt: system framing plus the user message.
#[derive(Debug, Clone)]
pub struct AgentPrompt {
    pub system: String,
    pub user: String,
}

/// Abstraction over the upstream analysis call: prompt in, raw text out.
///
/// Carried in `AppState` as `Arc<dyn AgentClient>` so transports can be
/// swapped (or mocked in tests) without touching handler or pipeline code.
#[async_trait]
pub trait AgentClient: Send + Sync {
    async fn analyze(&self, prompt: &AgentPrompt) -> Result<String, AgentError>;
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Direct Messages API transport.
#[derive(Clone)]
pub struct AnthropicAgentClient {
    client: Client,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicAgentClient {
    pub fn new(api_key: String, model: String, max_tokens: u32) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            model,
            max_tokens,
        }
    }
}

#[async_trait]
impl AgentClient for AnthropicAgentClient {
    /// Makes a single call to the Messages API. No retry here: callers wrap
    /// this in `retry::run_with_retry` so policy stays in one place.
    async fn analyze(&self, prompt: &AgentPrompt) -> Result<String, AgentError> {
        let request_body = AnthropicRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system: &prompt.system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: &prompt.user,
            }],
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());
            return Err(AgentError::RateLimited { retry_after });
        }

        if status.is_server_error() {
            let message = response.text().await.unwrap_or_default();
            return Err(AgentError::ServiceUnavailable {
                status: status.as_u16(),
                message,
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(AgentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| AgentError::Unknown(format!("undecodable API response: {e}")))?;

        debug!(
            input_tokens = parsed.usage.input_tokens,
            output_tokens = parsed.usage.output_tokens,
            "agent call succeeded"
        );

        parsed
            .content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.clone())
            .ok_or_else(|| AgentError::Unknown("agent returned no text content".to_string()))
    }
}
