//! Shared test doubles: capturing LLM/weather/bot implementations.
#![allow(dead_code)]

use async_trait::async_trait;
use conversation_memory::InMemoryConversationStore;
use intent::{OwnerQueryGuard, WeatherIntentClassifier};
use llm_client::{ChatMessage, LlmClient};
use std::sync::{Arc, Mutex};
use telebot_core::{Chat, Message, User};
use telebot::orchestrator::ChatOrchestrator;
use telebot::router::MessageRouter;
use weather_client::{WeatherError, WeatherProvider};

/// LLM double: records every request and returns a fixed reply or fails.
pub struct MockLlmClient {
    reply: Option<String>,
    pub calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockLlmClient {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> Vec<ChatMessage> {
        self.calls.lock().unwrap().last().cloned().expect("no LLM calls recorded")
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, messages: Vec<ChatMessage>) -> anyhow::Result<String> {
        self.calls.lock().unwrap().push(messages);
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(anyhow::anyhow!("simulated LLM failure")),
        }
    }
}

/// Outcome a [`MockWeatherProvider`] produces for every lookup.
pub enum MockWeatherOutcome {
    Report(String),
    NotFound,
    Unavailable,
}

/// Weather double: records requested cities and returns a fixed outcome.
pub struct MockWeatherProvider {
    outcome: MockWeatherOutcome,
    pub calls: Mutex<Vec<String>>,
}

impl MockWeatherProvider {
    pub fn new(outcome: MockWeatherOutcome) -> Self {
        Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn requested_cities(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherProvider for MockWeatherProvider {
    async fn fetch_weather(&self, city: &str) -> Result<String, WeatherError> {
        self.calls.lock().unwrap().push(city.to_string());
        match &self.outcome {
            MockWeatherOutcome::Report(report) => Ok(report.clone()),
            MockWeatherOutcome::NotFound => Err(WeatherError::CityNotFound),
            MockWeatherOutcome::Unavailable => {
                Err(WeatherError::Unavailable("mock outage".to_string()))
            }
        }
    }
}

/// Bot double: captures outbound (chat id, text) pairs.
#[derive(Default)]
pub struct CapturingBot {
    pub sent: Mutex<Vec<(i64, String)>>,
}

#[async_trait]
impl telebot_core::Bot for CapturingBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> telebot_core::Result<()> {
        self.sent.lock().unwrap().push((chat.id, text.to_string()));
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> telebot_core::Result<()> {
        self.send_message(&message.chat, text).await
    }
}

pub fn make_orchestrator(
    llm: Arc<MockLlmClient>,
    weather: Arc<MockWeatherProvider>,
    store: Arc<InMemoryConversationStore>,
) -> ChatOrchestrator {
    ChatOrchestrator::new(
        llm,
        weather,
        Arc::new(WeatherIntentClassifier::new()),
        OwnerQueryGuard::new(),
        store,
        "You are a helpful AI assistant.".to_string(),
    )
}

pub fn make_router(
    llm: Arc<MockLlmClient>,
    weather: Arc<MockWeatherProvider>,
    store: Arc<InMemoryConversationStore>,
) -> MessageRouter {
    let orchestrator = make_orchestrator(llm, weather.clone(), store.clone());
    MessageRouter::new(orchestrator, weather, store)
}

pub fn message_from(user_id: i64, text: &str) -> Message {
    Message {
        id: "1".to_string(),
        user: User {
            id: user_id,
            username: Some("tester".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat { id: user_id },
        content: text.to_string(),
        created_at: chrono::Utc::now(),
    }
}
