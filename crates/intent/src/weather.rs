//! Keyword-based weather intent detection and heuristic city extraction.

use regex::Regex;

use super::{Intent, IntentClassifier};

/// Any of these as a case-insensitive substring marks a weather query.
const WEATHER_KEYWORDS: &[&str] = &[
    "weather",
    "rain",
    "raining",
    "umbrella",
    "temperature",
    "hot",
    "cold",
    "cloudy",
    "forecast",
    "storm",
    "wind",
    "humidity",
];

/// Tokens removed from a city candidate before it is accepted.
const STOP_WORDS: &[&str] = &[
    "in", "today", "tomorrow", "now", "tonight", "please", "will", "it", "is", "the", "a", "an",
    "should", "i", "carry", "need", "do", "does", "rain", "weather",
];

/// Minimum accepted length of a joined city candidate.
const MIN_CITY_LEN: usize = 3;

/// Weather intent classifier: keyword match plus "in <city>" extraction with
/// a last-three-tokens fallback. The fallback is a heuristic and can produce
/// wrong or empty candidates for natural phrasing; that behavior is kept
/// deliberately (no gazetteer validation).
pub struct WeatherIntentClassifier {
    city_pattern: Regex,
}

impl WeatherIntentClassifier {
    pub fn new() -> Self {
        Self {
            city_pattern: Regex::new(r"\bin\s+([a-z ]+)").expect("valid city pattern"),
        }
    }

    /// True iff any weather keyword occurs as a case-insensitive substring.
    pub fn is_weather_query(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        WEATHER_KEYWORDS.iter().any(|k| lower.contains(k))
    }

    /// Extracts a candidate city name, or `None` when nothing survives the
    /// stop-word filter. Candidate source: the "in <words>" capture when
    /// present, else the last three whitespace tokens.
    pub fn extract_city(&self, text: &str) -> Option<String> {
        let lower = text.to_lowercase();

        let candidate = match self.city_pattern.captures(&lower) {
            Some(caps) => caps[1].to_string(),
            None => {
                let tokens: Vec<&str> = lower.split_whitespace().collect();
                let start = tokens.len().saturating_sub(3);
                tokens[start..].join(" ")
            }
        };

        let cleaned: String = candidate
            .chars()
            .filter(|c| !c.is_ascii_punctuation())
            .collect();

        let remaining: Vec<&str> = cleaned
            .split_whitespace()
            .filter(|t| !STOP_WORDS.contains(t))
            .collect();
        if remaining.is_empty() {
            return None;
        }

        let joined = remaining.join(" ");
        if joined.len() < MIN_CITY_LEN {
            return None;
        }
        Some(title_case(&joined))
    }
}

impl Default for WeatherIntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier for WeatherIntentClassifier {
    fn classify(&self, text: &str) -> Option<Intent> {
        if !self.is_weather_query(text) {
            return None;
        }
        Some(Intent::Weather {
            city: self.extract_city(text),
        })
    }
}

/// Upper-cases the first letter of each whitespace-separated word.
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_weather_query_positive() {
        let c = WeatherIntentClassifier::new();
        assert!(c.is_weather_query("Will it rain tomorrow?"));
        assert!(c.is_weather_query("What's the WEATHER like?"));
        assert!(c.is_weather_query("Should I carry an umbrella?"));
        assert!(c.is_weather_query("forecast for Paris"));
    }

    #[test]
    fn test_is_weather_query_negative() {
        let c = WeatherIntentClassifier::new();
        assert!(!c.is_weather_query("What is 2+2?"));
        assert!(!c.is_weather_query("Tell me a joke"));
    }

    #[test]
    fn test_extract_city_in_pattern() {
        let c = WeatherIntentClassifier::new();
        assert_eq!(
            c.extract_city("What's the weather in New York today?"),
            Some("New York".to_string())
        );
        assert_eq!(
            c.extract_city("Should I carry an umbrella in Mumbai?"),
            Some("Mumbai".to_string())
        );
    }

    #[test]
    fn test_extract_city_fallback_last_tokens() {
        let c = WeatherIntentClassifier::new();
        // No "in <city>" pattern: the last three tokens survive filtering.
        assert_eq!(
            c.extract_city("forecast for London"),
            Some("Forecast For London".to_string())
        );
    }

    #[test]
    fn test_extract_city_all_stop_words() {
        let c = WeatherIntentClassifier::new();
        assert_eq!(c.extract_city("Will it rain tomorrow?"), None);
    }

    #[test]
    fn test_extract_city_hot_fixed_point() {
        // "hot" is not a stop word and is exactly 3 chars, so it titles to "Hot".
        let c = WeatherIntentClassifier::new();
        assert_eq!(c.extract_city("hot"), Some("Hot".to_string()));
    }

    #[test]
    fn test_classify() {
        let c = WeatherIntentClassifier::new();
        assert_eq!(
            c.classify("What's the weather in New York today?"),
            Some(Intent::Weather {
                city: Some("New York".to_string())
            })
        );
        assert_eq!(
            c.classify("Will it rain tomorrow?"),
            Some(Intent::Weather { city: None })
        );
        assert_eq!(c.classify("What is 2+2?"), None);
    }
}
