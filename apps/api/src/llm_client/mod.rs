//! Completion Client: the single point of entry for all chat-completion calls.
//!
//! ARCHITECTURAL RULE: no other module talks to the completion provider directly.
//! Evaluators depend on the `ChatCompletion` trait, never on reqwest.
//!
//! One request, one attempt. There is no retry or backoff here; an upstream
//! failure is reported to the caller as-is.
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::config::Config;

pub mod prompts;

/// Sent as `X-Title` alongside the public app URL.
const APP_TITLE: &str = "Recruit AI Evaluator";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Unexpected completion payload: {0}")]
    Decode(String),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("Completion client is closed")]
    Closed,
}

/// A single prompt to send: one system message and one user message.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub system: &'a str,
    pub user: &'a str,
    /// Ask the provider for a strict JSON object response.
    pub json_output: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CompletionOutcome {
    /// Raw text content of the first choice.
    Generated(String),
    /// No API key configured; nothing was sent. Callers substitute a mock result.
    Unconfigured,
}

/// Seam between evaluators and the completion provider.
///
/// Carried in `AppState` as `Arc<dyn ChatCompletion>`.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(
        &self,
        request: CompletionRequest<'_>,
    ) -> Result<CompletionOutcome, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

/// reqwest-backed client for an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Clone)]
pub struct CompletionClient {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
    model: String,
    app_url: Option<String>,
    permits: Arc<Semaphore>,
}

impl CompletionClient {
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.completion_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: config.completion_api_key.clone(),
            endpoint: config.completion_api_url.clone(),
            model: config.completion_model.clone(),
            app_url: config.public_app_url.clone(),
            permits: Arc::new(Semaphore::new(config.max_concurrent_completions)),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl ChatCompletion for CompletionClient {
    async fn complete(
        &self,
        request: CompletionRequest<'_>,
    ) -> Result<CompletionOutcome, LlmError> {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("COMPLETION_API_KEY not set; skipping completion call");
            return Ok(CompletionOutcome::Unconfigured);
        };

        // Bounds in-flight calls to the paid upstream; waits rather than rejects.
        let _permit = self.permits.acquire().await.map_err(|_| LlmError::Closed)?;

        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: request.system,
                },
                ChatMessage {
                    role: "user",
                    content: request.user,
                },
            ],
            response_format: request.json_output.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        let mut builder = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body);
        if let Some(app_url) = &self.app_url {
            builder = builder
                .header("HTTP-Referer", app_url)
                .header("X-Title", APP_TITLE);
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Completion API returned {}: {}", status, body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let raw = response.text().await?;
        let parsed: ChatResponse =
            serde_json::from_str(&raw).map_err(|e| LlmError::Decode(e.to_string()))?;

        if let Some(usage) = &parsed.usage {
            debug!(
                "Completion succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .map(CompletionOutcome::Generated)
            .ok_or(LlmError::EmptyContent)
    }
}
