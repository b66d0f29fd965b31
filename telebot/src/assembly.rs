//! Assembly: builds the orchestrator and router from config, and the two
//! run modes used by `main`.

use anyhow::Result;
use conversation_memory::{ConversationStore, InMemoryConversationStore};
use intent::{IntentClassifier, OwnerQueryGuard, WeatherIntentClassifier};
use llm_client::{GroqLlmClient, LlmClient};
use std::sync::Arc;
use telebot_core::{init_tracing, Bot as CoreBot, TelegramBotAdapter};
use tracing::info;
use weather_client::{OpenWeatherClient, WeatherProvider};

use crate::config::BotConfig;
use crate::orchestrator::ChatOrchestrator;
use crate::router::MessageRouter;
use crate::{polling, webhook};

/// Wires the concrete clients, classifier, guard, and store into a router.
pub fn build_message_router(config: &BotConfig) -> Arc<MessageRouter> {
    let llm: Arc<dyn LlmClient> = Arc::new(
        GroqLlmClient::with_base_url(config.llm.api_key.clone(), config.llm.base_url.clone())
            .with_model(config.llm.model.clone()),
    );
    let weather: Arc<dyn WeatherProvider> =
        Arc::new(OpenWeatherClient::new(config.openweather_api_key.clone()));
    let classifier: Arc<dyn IntentClassifier> = Arc::new(WeatherIntentClassifier::new());
    let store: Arc<dyn ConversationStore> = Arc::new(InMemoryConversationStore::with_window_pairs(
        config.memory_window_pairs,
    ));

    let orchestrator = ChatOrchestrator::new(
        llm,
        weather.clone(),
        classifier,
        OwnerQueryGuard::new(),
        store.clone(),
        config.system_prompt.clone(),
    );

    Arc::new(MessageRouter::new(orchestrator, weather, store))
}

fn init_logging(config: &BotConfig) -> Result<()> {
    if let Some(parent) = std::path::Path::new(&config.log_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    init_tracing(&config.log_file)
}

/// Polling mode: long-poll Telegram for updates.
pub async fn run_polling_mode(config: BotConfig) -> Result<()> {
    init_logging(&config)?;
    info!(
        model = %config.llm.model,
        memory_window_pairs = config.memory_window_pairs,
        "Starting TeleBot (polling)"
    );

    let bot = teloxide::Bot::new(config.bot_token.clone());
    let router = build_message_router(&config);
    polling::run_polling(bot, router).await
}

/// Webhook mode: register the webhook URL, then serve the HTTP endpoint.
pub async fn run_webhook_mode(config: BotConfig) -> Result<()> {
    init_logging(&config)?;
    let base_url = config.require_webhook_base_url()?.to_string();
    info!(
        model = %config.llm.model,
        memory_window_pairs = config.memory_window_pairs,
        base_url = %base_url,
        "Starting TeleBot (webhook)"
    );

    let bot = teloxide::Bot::new(config.bot_token.clone());
    webhook::register_webhook(&bot, &base_url).await?;

    let router = build_message_router(&config);
    let sender: Arc<dyn CoreBot> = Arc::new(TelegramBotAdapter::new(bot));
    let state = webhook::WebhookState { router, sender };
    webhook::serve(&config.bind_address, config.port, state).await
}
