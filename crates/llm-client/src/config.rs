//! LLM configuration loaded from environment variables.

use anyhow::{Context, Result};
use std::env;

/// Default Groq OpenAI-compatible endpoint.
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default completion model.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// LLM config loaded from environment variables. `GROQ_API_KEY` is required;
/// the rest have defaults.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl EnvLlmConfig {
    /// Load from environment variables. Fails when `GROQ_API_KEY` is absent.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("GROQ_API_KEY").context("GROQ_API_KEY not set")?;
        let base_url =
            env::var("GROQ_BASE_URL").unwrap_or_else(|_| DEFAULT_GROQ_BASE_URL.to_string());
        let model = env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self {
            api_key,
            base_url,
            model,
        })
    }
}
