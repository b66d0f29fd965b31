//! Guard for "who made you" style questions.

use regex::Regex;

/// Matches a fixed set of owner/creator phrasings, case-insensitively.
/// A match short-circuits normal handling with a canned refusal and must
/// cause no memory mutation and no model call.
pub struct OwnerQueryGuard {
    pattern: Regex,
}

impl OwnerQueryGuard {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(
                r"(?i)who created you|who is your owner|who owns you|your creator|your developer",
            )
            .expect("valid owner pattern"),
        }
    }

    pub fn is_owner_query(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

impl Default for OwnerQueryGuard {
    fn default() -> Self {
        Self::new()
    }
}
