//! # Intent classification
//!
//! Decides whether a free-text message should trigger a weather lookup and
//! which city it refers to, plus the owner-query guard. The classifier is a
//! trait so the keyword heuristic can be swapped for a better NLU step
//! without touching the orchestrator.

mod owner;
mod weather;

pub use owner::OwnerQueryGuard;
pub use weather::WeatherIntentClassifier;

/// A recognized intent behind a free-text message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// The message asks about the weather; `city` is the extracted
    /// candidate, if the heuristic found one.
    Weather { city: Option<String> },
}

/// Pluggable intent classification seam.
pub trait IntentClassifier: Send + Sync {
    /// Returns the recognized intent, or `None` for plain conversation.
    fn classify(&self, text: &str) -> Option<Intent>;
}
