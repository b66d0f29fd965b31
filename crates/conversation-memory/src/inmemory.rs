//! In-memory implementation of [`ConversationStore`].
//!
//! Thread safety: the user map sits behind `Arc<RwLock<_>>`; append locks
//! the map for the whole single-key mutation, so eviction and push are one
//! atomic step per user id.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::{ConversationStore, Turn, DEFAULT_WINDOW_PAIRS};

/// Bounded per-user conversation store. Capacity is `2 * window_pairs`
/// turns; the oldest turns are dropped first (FIFO).
#[derive(Debug, Clone)]
pub struct InMemoryConversationStore {
    conversations: Arc<RwLock<HashMap<i64, VecDeque<Turn>>>>,
    capacity: usize,
}

impl InMemoryConversationStore {
    /// Creates a store with the default window of [`DEFAULT_WINDOW_PAIRS`] pairs.
    pub fn new() -> Self {
        Self::with_window_pairs(DEFAULT_WINDOW_PAIRS)
    }

    /// Creates a store keeping at most `window_pairs` exchange pairs per user.
    pub fn with_window_pairs(window_pairs: usize) -> Self {
        Self {
            conversations: Arc::new(RwLock::new(HashMap::new())),
            capacity: window_pairs * 2,
        }
    }

    /// Number of turns currently stored for a user.
    pub async fn len(&self, user_id: i64) -> usize {
        let conversations = self.conversations.read().await;
        conversations.get(&user_id).map_or(0, VecDeque::len)
    }
}

impl Default for InMemoryConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn history(&self, user_id: i64) -> Result<Vec<Turn>, anyhow::Error> {
        let conversations = self.conversations.read().await;
        Ok(conversations
            .get(&user_id)
            .map(|turns| turns.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn append(&self, user_id: i64, turn: Turn) -> Result<(), anyhow::Error> {
        let mut conversations = self.conversations.write().await;
        let turns = conversations.entry(user_id).or_default();
        turns.push_back(turn);
        while turns.len() > self.capacity {
            turns.pop_front();
        }
        debug!(user_id, turn_count = turns.len(), "Appended conversation turn");
        Ok(())
    }

    async fn reset(&self, user_id: i64) -> Result<(), anyhow::Error> {
        let mut conversations = self.conversations.write().await;
        let existed = conversations.remove(&user_id).is_some();
        debug!(user_id, existed, "Reset conversation");
        Ok(())
    }
}
