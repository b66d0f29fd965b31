//! Message routing shared by both transports: commands are dispatched by
//! literal name, anything else goes to the chat orchestrator.

use conversation_memory::ConversationStore;
use std::sync::Arc;
use telebot_core::Message;
use tracing::{info, warn};
use weather_client::WeatherProvider;

use crate::orchestrator::ChatOrchestrator;

pub const GREETING: &str =
    "Hello! I'm TeleBot.\nAsk me anything, or send /help to see what I can do.";

pub const HELP_TEXT: &str = "/start - Start the bot\n\
/help - Show this help menu\n\
/content - About TeleBot\n\
/weather <city> - Current weather for a city\n\
/reset - Clear your conversation history\n\n\
Just send any message to chat with AI.";

pub const ABOUT_TEXT: &str =
    "TeleBot uses Groq's LLaMA 3.3 70B Versatile model to answer your questions.";

pub const WEATHER_USAGE: &str = "Usage: /weather <city>";

pub const RESET_DONE: &str = "Your conversation history has been cleared.";

pub const RESET_FAILED: &str = "Could not clear your conversation history. Please try again.";

/// Bot command surface, dispatched by literal name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Content,
    Weather(Option<String>),
    Reset,
    Unknown,
}

/// Parses a leading slash-command. Returns `None` for free text. A
/// `@botname` suffix on the command is ignored, as Telegram appends it in
/// group chats.
pub fn parse_command(text: &str) -> Option<Command> {
    let text = text.trim();
    if !text.starts_with('/') {
        return None;
    }
    let mut parts = text.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default();
    let name = name.split('@').next().unwrap_or(name);
    let argument = parts
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from);

    let command = match name {
        "/start" => Command::Start,
        "/help" => Command::Help,
        "/content" => Command::Content,
        "/weather" => Command::Weather(argument),
        "/reset" => Command::Reset,
        _ => Command::Unknown,
    };
    Some(command)
}

/// Maps inbound messages to the command table or the orchestrator and
/// returns the reply text for the transport to send.
pub struct MessageRouter {
    orchestrator: ChatOrchestrator,
    weather: Arc<dyn WeatherProvider>,
    store: Arc<dyn ConversationStore>,
}

impl MessageRouter {
    pub fn new(
        orchestrator: ChatOrchestrator,
        weather: Arc<dyn WeatherProvider>,
        store: Arc<dyn ConversationStore>,
    ) -> Self {
        Self {
            orchestrator,
            weather,
            store,
        }
    }

    /// Returns the reply text for the transport to send, or `None` when the
    /// message should be ignored (unrecognized commands get no reply).
    pub async fn dispatch(&self, message: &Message) -> Option<String> {
        let text = message.content.trim();
        let user_id = message.user.id;

        match parse_command(text) {
            Some(Command::Start) => Some(GREETING.to_string()),
            Some(Command::Help) => Some(HELP_TEXT.to_string()),
            Some(Command::Content) => Some(ABOUT_TEXT.to_string()),
            Some(Command::Weather(None)) => Some(WEATHER_USAGE.to_string()),
            Some(Command::Weather(Some(city))) => {
                info!(user_id, city = %city, "Direct weather lookup");
                Some(
                    self.weather
                        .fetch_weather(&city)
                        .await
                        .unwrap_or_else(|e| e.user_message().to_string()),
                )
            }
            Some(Command::Reset) => match self.store.reset(user_id).await {
                Ok(()) => {
                    info!(user_id, "Conversation reset");
                    Some(RESET_DONE.to_string())
                }
                Err(e) => {
                    warn!(user_id, error = %e, "Conversation reset failed");
                    Some(RESET_FAILED.to_string())
                }
            },
            Some(Command::Unknown) => {
                info!(user_id, command = %text, "Ignoring unrecognized command");
                None
            }
            None => Some(self.orchestrator.handle_message(user_id, text).await),
        }
    }
}
