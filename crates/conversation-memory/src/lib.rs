//! # Conversation memory
//!
//! Bounded per-user history of role-tagged turns, used to build the prompt
//! context for each model call. The [`ConversationStore`] trait is the seam
//! between the orchestrator and the storage backend; the in-memory
//! implementation lives for the process lifetime only (no persistence, no
//! TTL).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

mod inmemory;

pub use inmemory::InMemoryConversationStore;

/// Default window size in exchange pairs (one user + one assistant turn).
pub const DEFAULT_WINDOW_PAIRS: usize = 5;

/// Role of one conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnRole {
    System,
    User,
    Assistant,
}

/// One role-tagged message unit in a conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
        }
    }
}

/// Trait for storing and retrieving per-user conversation turns.
///
/// Mutation is atomic per user id; keys are disjoint so no cross-user
/// coordination is required. Entries are created lazily on first append.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Returns the stored turns for a user, oldest first. Empty for unknown users.
    async fn history(&self, user_id: i64) -> Result<Vec<Turn>, anyhow::Error>;

    /// Appends a turn; when the window is full the oldest turn is evicted.
    async fn append(&self, user_id: i64, turn: Turn) -> Result<(), anyhow::Error>;

    /// Discards the user's entry entirely; the next append starts fresh.
    async fn reset(&self, user_id: i64) -> Result<(), anyhow::Error>;
}
