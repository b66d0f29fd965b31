//! # telebot
//!
//! A conversational Telegram bot that relays user messages to Groq's
//! OpenAI-compatible LLM API and injects live OpenWeather data when a
//! message looks like a weather question. Two delivery modes share one
//! routing layer: long polling and an inbound webhook endpoint.

pub mod assembly;
pub mod config;
pub mod orchestrator;
pub mod polling;
pub mod router;
pub mod webhook;

pub use assembly::build_message_router;
pub use config::BotConfig;
pub use orchestrator::ChatOrchestrator;
pub use router::MessageRouter;
