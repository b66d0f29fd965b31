//! # telebot-core
//!
//! Transport-agnostic core for the bot: message/user/chat types, error
//! taxonomy, tracing initialization, and the [`Bot`] send abstraction with
//! its teloxide-backed implementation.

pub mod adapters;
pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot::{Bot, TelegramBotAdapter};
pub use error::{BotError, Result};
pub use logger::init_tracing;
pub use types::{Chat, Message, ToCoreMessage, ToCoreUser, User};
