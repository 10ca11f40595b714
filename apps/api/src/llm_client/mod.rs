/// LLM Client — the single point of entry for all text-generation calls in SkillFit.
///
/// No other module talks to a provider API directly. Pipeline stages depend on
/// the `TextGenerator` trait so tests can swap in deterministic stand-ins.
///
/// Each call is exactly one HTTP attempt bounded by the configured timeout.
/// Callers decide what a failure means; nothing here retries.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::{LlmConfig, LlmProvider};

pub mod prompts;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const COHERE_API_URL: &str = "https://api.cohere.ai/v1/generate";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// One generation call: prompt plus per-call sampling settings.
/// The model identifier belongs to the configured client.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub prompt: &'a str,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Given a prompt, return generated text or an error.
///
/// Carried through the pipeline as `Arc<dyn TextGenerator>`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
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

impl AnthropicResponse {
    /// Text of the first text block.
    fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

#[derive(Debug, Serialize)]
struct CohereRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CohereResponse {
    generations: Vec<CohereGeneration>,
}

#[derive(Debug, Deserialize)]
struct CohereGeneration {
    text: String,
}

#[derive(Debug, Deserialize)]
struct CohereError {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The single LLM client used by all services in SkillFit.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    provider: LlmProvider,
    api_key: String,
    model: String,
    api_url: String,
    timeout: Duration,
}

impl LlmClient {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        let api_url = config.api_url.clone().unwrap_or_else(|| {
            match config.provider {
                LlmProvider::Anthropic => ANTHROPIC_API_URL,
                LlmProvider::Cohere => COHERE_API_URL,
            }
            .to_string()
        });
        Ok(Self {
            client,
            provider: config.provider,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            api_url,
            timeout: config.timeout,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider(&self) -> LlmProvider {
        self.provider
    }

    async fn call_anthropic(&self, request: &GenerationRequest<'_>) -> Result<String, LlmError> {
        let body = AnthropicRequest {
            model: &self.model,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            system: prompts::PLAIN_TEXT_SYSTEM,
            messages: vec![AnthropicMessage {
                role: "user",
                content: request.prompt,
            }],
        };

        let response = self
            .client
            .post(self.api_url.as_str())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.classify(e))?;
        if !status.is_success() {
            return Err(api_error(self.provider, status.as_u16(), text));
        }

        anthropic_text(&text)
    }

    async fn call_cohere(&self, request: &GenerationRequest<'_>) -> Result<String, LlmError> {
        let body = CohereRequest {
            model: &self.model,
            prompt: request.prompt,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(self.api_url.as_str())
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.classify(e))?;
        if !status.is_success() {
            return Err(api_error(self.provider, status.as_u16(), text));
        }

        cohere_text(&text)
    }

    fn classify(&self, error: reqwest::Error) -> LlmError {
        if error.is_timeout() {
            LlmError::Timeout(self.timeout)
        } else {
            LlmError::Http(error)
        }
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, LlmError> {
        let text = match self.provider {
            LlmProvider::Anthropic => self.call_anthropic(request).await?,
            LlmProvider::Cohere => self.call_cohere(request).await?,
        };
        debug!(
            "LLM call succeeded: provider={:?}, model={}, chars={}",
            self.provider,
            self.model,
            text.len()
        );
        Ok(text)
    }
}

/// Builds an `LlmError::Api`, pulling the provider's error message out of the
/// body when it parses.
fn api_error(provider: LlmProvider, status: u16, body: String) -> LlmError {
    let message = match provider {
        LlmProvider::Anthropic => serde_json::from_str::<AnthropicError>(&body)
            .map(|e| e.error.message)
            .ok(),
        LlmProvider::Cohere => serde_json::from_str::<CohereError>(&body)
            .map(|e| e.message)
            .ok(),
    }
    .unwrap_or(body);
    LlmError::Api { status, message }
}

fn anthropic_text(body: &str) -> Result<String, LlmError> {
    let response: AnthropicResponse = serde_json::from_str(body)?;
    debug!(
        "Anthropic usage: input_tokens={}, output_tokens={}",
        response.usage.input_tokens, response.usage.output_tokens
    );
    non_empty(response.text())
}

fn cohere_text(body: &str) -> Result<String, LlmError> {
    let response: CohereResponse = serde_json::from_str(body)?;
    non_empty(response.generations.first().map(|g| g.text.as_str()))
}

fn non_empty(text: Option<&str>) -> Result<String, LlmError> {
    match text.map(str::trim) {
        Some(t) if !t.is_empty() => Ok(t.to_string()),
        _ => Err(LlmError::EmptyContent),
    }
}

/// Deterministic `TextGenerator` stand-ins for unit tests.
#[cfg(test)]
pub mod testing {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Answers every prompt with a closure and counts calls.
    pub struct StubGenerator<F> {
        respond: F,
        calls: AtomicUsize,
    }

    impl<F> StubGenerator<F>
    where
        F: Fn(&str) -> Result<String, LlmError> + Send + Sync,
    {
        pub fn new(respond: F) -> Self {
            Self {
                respond,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl<F> TextGenerator for StubGenerator<F>
    where
        F: Fn(&str) -> Result<String, LlmError> + Send + Sync,
    {
        async fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.respond)(request.prompt)
        }
    }

    pub fn service_down() -> LlmError {
        LlmError::Api {
            status: 503,
            message: "service unavailable".to_string(),
        }
    }
}
