//! Chat orchestrator: owner guard, weather injection, memory window, one
//! model completion per message.

use conversation_memory::{ConversationStore, Turn, TurnRole};
use intent::{Intent, IntentClassifier, OwnerQueryGuard};
use llm_client::{ChatMessage, LlmClient};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{error, info, warn};
use weather_client::WeatherProvider;

/// Fixed refusal for owner/creator questions.
pub const OWNER_REFUSAL: &str = "Sorry, I can't share details about who created me.";

/// Fixed user-facing string for any model-call failure.
pub const GENERATION_FAILED: &str = "Error while generating response.";

/// Upper bound on one completion call; the weather call has its own 5 s
/// timeout inside the client.
const LLM_TIMEOUT: Duration = Duration::from_secs(60);

/// Composes system prompt, optional weather context, and the user's recent
/// history into one completion request, then stores the exchange.
pub struct ChatOrchestrator {
    llm: Arc<dyn LlmClient>,
    weather: Arc<dyn WeatherProvider>,
    classifier: Arc<dyn IntentClassifier>,
    guard: OwnerQueryGuard,
    store: Arc<dyn ConversationStore>,
    system_prompt: String,
}

impl ChatOrchestrator {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        weather: Arc<dyn WeatherProvider>,
        classifier: Arc<dyn IntentClassifier>,
        guard: OwnerQueryGuard,
        store: Arc<dyn ConversationStore>,
        system_prompt: String,
    ) -> Self {
        Self {
            llm,
            weather,
            classifier,
            guard,
            store,
            system_prompt,
        }
    }

    /// Handles one free-text message and returns the reply text. All
    /// failures come back as pre-written strings, never raw errors.
    pub async fn handle_message(&self, user_id: i64, text: &str) -> String {
        if self.guard.is_owner_query(text) {
            info!(user_id, "Owner query refused without model call");
            return OWNER_REFUSAL.to_string();
        }

        let mut messages = vec![ChatMessage::system(self.system_prompt.clone())];

        // Weather context goes in only when the intent matched, a city was
        // extracted, and the lookup succeeded.
        if let Some(Intent::Weather { city: Some(city) }) = self.classifier.classify(text) {
            match self.weather.fetch_weather(&city).await {
                Ok(report) => {
                    info!(user_id, city = %city, "Injecting weather context");
                    messages.push(ChatMessage::system(format!(
                        "Current weather data:\n{report}"
                    )));
                }
                Err(e) => {
                    warn!(user_id, city = %city, error = %e, "Weather injection skipped");
                }
            }
        }

        let history = match self.store.history(user_id).await {
            Ok(history) => history,
            Err(e) => {
                warn!(user_id, error = %e, "Failed to read conversation history");
                Vec::new()
            }
        };
        for turn in &history {
            messages.push(turn_to_chat_message(turn));
        }
        messages.push(ChatMessage::user(text));

        // The exchange is persisted only after a successful completion, so
        // a failed call leaves memory exactly as it was.
        let reply = match timeout(LLM_TIMEOUT, self.llm.complete(messages)).await {
            Ok(Ok(reply)) => reply,
            Ok(Err(e)) => {
                error!(user_id, error = %e, "LLM completion failed");
                return GENERATION_FAILED.to_string();
            }
            Err(_) => {
                error!(
                    user_id,
                    timeout_secs = LLM_TIMEOUT.as_secs(),
                    "LLM completion timed out"
                );
                return GENERATION_FAILED.to_string();
            }
        };

        if let Err(e) = self.store.append(user_id, Turn::user(text)).await {
            warn!(user_id, error = %e, "Failed to store user turn");
        }
        if let Err(e) = self
            .store
            .append(user_id, Turn::assistant(reply.clone()))
            .await
        {
            warn!(user_id, error = %e, "Failed to store assistant turn");
        }

        reply
    }
}

fn turn_to_chat_message(turn: &Turn) -> ChatMessage {
    match turn.role {
        TurnRole::System => ChatMessage::system(turn.content.clone()),
        TurnRole::User => ChatMessage::user(turn.content.clone()),
        TurnRole::Assistant => ChatMessage::assistant(turn.content.clone()),
    }
}
