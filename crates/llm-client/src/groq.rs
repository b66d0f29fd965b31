//! Groq implementation of [`LlmClient`] via async-openai with a custom base URL.

use anyhow::Result;
use async_openai::types::{ChatCompletionRequestMessage, CreateChatCompletionRequestArgs};
use async_openai::Client;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

use super::{chat_message_to_request, mask_token, ChatMessage, LlmClient};
use crate::config::{DEFAULT_GROQ_BASE_URL, DEFAULT_MODEL};

/// Fixed sampling temperature for all completions.
const TEMPERATURE: f32 = 0.7;

/// Fixed cap on completion tokens.
const MAX_TOKENS: u32 = 1024;

/// Groq chat client. Wraps async-openai; holds the API key only for masked logging.
#[derive(Clone)]
pub struct GroqLlmClient {
    client: Arc<Client<async_openai::config::OpenAIConfig>>,
    model: String,
    api_key_for_logging: String,
}

impl GroqLlmClient {
    /// Builds a client using the given API key and the default Groq base URL.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_GROQ_BASE_URL.to_string())
    }

    /// Builds a client with a custom base URL (proxies or other compatible endpoints).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let api_key_for_logging = api_key.clone();
        let config = async_openai::config::OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url);
        Self {
            client: Arc::new(Client::with_config(config)),
            model: DEFAULT_MODEL.to_string(),
            api_key_for_logging,
        }
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }
}

#[async_trait]
impl LlmClient for GroqLlmClient {
    #[instrument(skip(self, messages))]
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let request_messages = messages
            .iter()
            .map(chat_message_to_request)
            .collect::<Result<Vec<ChatCompletionRequestMessage>>>()?;

        tracing::info!(
            model = %self.model,
            message_count = request_messages.len(),
            api_key = %mask_token(&self.api_key_for_logging),
            "Groq chat completion request"
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(request_messages)
            .temperature(TEMPERATURE)
            .max_tokens(MAX_TOKENS)
            .build()?;

        if let Ok(json) = serde_json::to_string(&request) {
            tracing::debug!(request_json = %json, "Groq chat completion request JSON");
        }

        let response = self.client.chat().create(request).await?;

        if let Some(ref u) = response.usage {
            tracing::info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "Groq chat completion usage"
            );
        }

        let choice = response
            .choices
            .first()
            .ok_or_else(|| anyhow::anyhow!("Completion response has no choices"))?;
        Ok(choice.message.content.clone().unwrap_or_default())
    }
}
