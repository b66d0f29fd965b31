//! # Weather provider abstraction
//!
//! Defines the [`WeatherProvider`] trait, the [`WeatherReport`] model with
//! its rain-expectation rule, and an OpenWeather implementation built on
//! reqwest. Failures never surface raw errors: callers map
//! [`WeatherError`] to fixed user-facing strings via
//! [`WeatherError::user_message`].

use async_trait::async_trait;
use thiserror::Error;

mod openweather;

pub use openweather::OpenWeatherClient;

/// Fixed user-facing string for an unresolvable city.
pub const CITY_NOT_FOUND_MESSAGE: &str = "City not found. Please check the city name.";

/// Fixed user-facing string for any other provider failure.
pub const SERVICE_UNAVAILABLE_MESSAGE: &str = "Weather service temporarily unavailable.";

/// Humidity threshold above which rain is expected even without "rain" in
/// the condition text.
const RAIN_HUMIDITY_THRESHOLD: u8 = 75;

#[derive(Error, Debug)]
pub enum WeatherError {
    /// The provider could not resolve the city name.
    #[error("city not found")]
    CityNotFound,

    /// Network, timeout, non-success status, or malformed response.
    #[error("weather service unavailable: {0}")]
    Unavailable(String),
}

impl WeatherError {
    /// The canned string shown to end users for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::CityNotFound => CITY_NOT_FOUND_MESSAGE,
            WeatherError::Unavailable(_) => SERVICE_UNAVAILABLE_MESSAGE,
        }
    }
}

/// Weather for one city, derived fresh per request. Never stored.
#[derive(Debug, Clone)]
pub struct WeatherReport {
    /// City name as the caller passed it.
    pub city: String,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    /// Lower-cased condition description from the provider.
    pub condition: String,
}

impl WeatherReport {
    /// Rain is expected iff the condition text contains "rain" or
    /// humidity exceeds 75%.
    pub fn rain_expected(&self) -> bool {
        self.condition.contains("rain") || self.humidity_pct > RAIN_HUMIDITY_THRESHOLD
    }

    /// Formats the fixed five-line report shown to users.
    pub fn format(&self) -> String {
        format!(
            "City: {}\nTemperature: {}°C\nHumidity: {}%\nCondition: {}\nRain expected: {}",
            self.city,
            self.temperature_c,
            self.humidity_pct,
            self.condition,
            if self.rain_expected() { "Yes" } else { "No" },
        )
    }
}

/// Interface for fetching a formatted weather report for a city.
///
/// `Ok` carries the five-line report text; `Err` distinguishes
/// city-not-found from provider-unavailable so callers can decide whether
/// the lookup succeeded (the orchestrator only injects weather context on
/// success).
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch_weather(&self, city: &str) -> Result<String, WeatherError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(condition: &str, humidity: u8) -> WeatherReport {
        WeatherReport {
            city: "London".to_string(),
            temperature_c: 18.5,
            humidity_pct: humidity,
            condition: condition.to_string(),
        }
    }

    #[test]
    fn test_rain_expected_from_condition() {
        assert!(report("light rain", 40).rain_expected());
        assert!(!report("clear sky", 40).rain_expected());
    }

    #[test]
    fn test_rain_expected_from_humidity() {
        assert!(report("clear sky", 76).rain_expected());
        assert!(!report("clear sky", 75).rain_expected());
    }

    #[test]
    fn test_format_has_five_labeled_lines_in_order() {
        let text = report("scattered clouds", 60).format();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "City: London");
        assert_eq!(lines[1], "Temperature: 18.5°C");
        assert_eq!(lines[2], "Humidity: 60%");
        assert_eq!(lines[3], "Condition: scattered clouds");
        assert_eq!(lines[4], "Rain expected: No");
    }

    #[test]
    fn test_format_rain_expected_yes() {
        let text = report("moderate rain", 50).format();
        assert!(text.ends_with("Rain expected: Yes"));
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            WeatherError::CityNotFound.user_message(),
            CITY_NOT_FOUND_MESSAGE
        );
        assert_eq!(
            WeatherError::Unavailable("timeout".to_string()).user_message(),
            SERVICE_UNAVAILABLE_MESSAGE
        );
    }
}
