use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::analysis::gap_matcher::DEFAULT_MATCH_THRESHOLD;

const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-5";
const DEFAULT_COHERE_MODEL: &str = "command-r-plus";

/// Which hosted text-generation API backs the `LlmClient`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    Anthropic,
    Cohere,
}

impl LlmProvider {
    fn api_key_var(self) -> &'static str {
        match self {
            LlmProvider::Anthropic => "ANTHROPIC_API_KEY",
            LlmProvider::Cohere => "COHERE_API_KEY",
        }
    }

    fn default_model(self) -> &'static str {
        match self {
            LlmProvider::Anthropic => DEFAULT_ANTHROPIC_MODEL,
            LlmProvider::Cohere => DEFAULT_COHERE_MODEL,
        }
    }
}

impl FromStr for LlmProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anthropic" => Ok(LlmProvider::Anthropic),
            "cohere" => Ok(LlmProvider::Cohere),
            other => bail!("Unknown LLM_PROVIDER '{other}' (expected 'anthropic' or 'cohere')"),
        }
    }
}

/// Credentials and call settings for the text-generation service.
/// Built once at startup and handed to `LlmClient::new`.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
    /// Overrides the provider's endpoint (proxies, gateways).
    pub api_url: Option<String>,
}

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or a value does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,
    pub match_threshold: u8,
    pub roadmap_concurrency: usize,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. `from_env` passes the
    /// process environment; tests pass a fixed table.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider = match lookup("LLM_PROVIDER") {
            Some(raw) => raw.parse::<LlmProvider>()?,
            None => LlmProvider::Anthropic,
        };

        let api_key = lookup(provider.api_key_var())
            .filter(|key| !key.trim().is_empty())
            .with_context(|| {
                format!(
                    "Required environment variable '{}' is not set",
                    provider.api_key_var()
                )
            })?;

        let model = lookup("LLM_MODEL").unwrap_or_else(|| provider.default_model().to_string());

        let timeout_secs: u64 = parse_or(&lookup, "LLM_TIMEOUT_SECS", 60)?;
        if timeout_secs == 0 {
            bail!("LLM_TIMEOUT_SECS must be greater than zero");
        }

        let match_threshold: u8 = parse_or(&lookup, "MATCH_THRESHOLD", DEFAULT_MATCH_THRESHOLD)?;
        if match_threshold > 100 {
            bail!("MATCH_THRESHOLD must be between 0 and 100, got {match_threshold}");
        }

        let roadmap_concurrency: usize = parse_or(&lookup, "ROADMAP_CONCURRENCY", 4)?;
        if roadmap_concurrency == 0 {
            bail!("ROADMAP_CONCURRENCY must be at least 1");
        }

        Ok(Config {
            llm: LlmConfig {
                provider,
                api_key,
                model,
                timeout: Duration::from_secs(timeout_secs),
                api_url: lookup("LLM_API_URL").filter(|url| !url.trim().is_empty()),
            },
            match_threshold,
            roadmap_concurrency,
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
