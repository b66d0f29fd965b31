//! Bot configuration loaded from environment variables.
//!
//! Required values fail fast at startup; everything else has a default.

use anyhow::{Context, Result};
use llm_client::EnvLlmConfig;
use std::env;

/// Default system prompt sent ahead of every conversation.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful AI assistant.";

pub struct BotConfig {
    pub bot_token: String,
    pub llm: EnvLlmConfig,
    pub openweather_api_key: String,
    pub system_prompt: String,
    pub memory_window_pairs: usize,
    /// Externally reachable base URL; required only in webhook mode.
    pub webhook_base_url: Option<String>,
    pub bind_address: String,
    pub port: u16,
    pub log_file: String,
}

impl BotConfig {
    /// Loads configuration from the environment. A token passed on the
    /// command line takes precedence over `BOT_TOKEN`.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => env::var("BOT_TOKEN").context("BOT_TOKEN not set")?,
        };
        let llm = EnvLlmConfig::from_env()?;
        let openweather_api_key =
            env::var("OPENWEATHER_API_KEY").context("OPENWEATHER_API_KEY not set")?;
        let system_prompt =
            env::var("SYSTEM_PROMPT").unwrap_or_else(|_| DEFAULT_SYSTEM_PROMPT.to_string());
        let memory_window_pairs = env::var("MEMORY_WINDOW_PAIRS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(conversation_memory::DEFAULT_WINDOW_PAIRS);
        let webhook_base_url = env::var("WEBHOOK_BASE_URL").ok().filter(|s| !s.is_empty());
        let bind_address = env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/telebot.log".to_string());

        Ok(Self {
            bot_token,
            llm,
            openweather_api_key,
            system_prompt,
            memory_window_pairs,
            webhook_base_url,
            bind_address,
            port,
            log_file,
        })
    }

    /// The webhook base URL, or an error in webhook mode when it is unset.
    pub fn require_webhook_base_url(&self) -> Result<&str> {
        self.webhook_base_url
            .as_deref()
            .context("WEBHOOK_BASE_URL not set (required for webhook mode)")
    }
}
