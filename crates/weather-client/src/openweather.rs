//! OpenWeather implementation of [`WeatherProvider`].

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

use super::{WeatherError, WeatherProvider, WeatherReport};

const OPENWEATHER_API_BASE: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Per-request timeout for the provider call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// OpenWeather client. One GET per lookup, metric units, fixed timeout.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    main: MainSection,
    weather: Vec<ConditionSection>,
}

#[derive(Debug, Deserialize)]
struct MainSection {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct ConditionSection {
    description: String,
}

impl OpenWeatherClient {
    /// Creates a client for the production OpenWeather endpoint.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, OPENWEATHER_API_BASE.to_string())
    }

    /// Creates a client against a custom endpoint (used by tests with a mock server).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");
        Self {
            client,
            api_key,
            base_url,
        }
    }

    /// Fetches and parses the provider response for one city.
    async fn fetch_report(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", city), ("appid", &self.api_key), ("units", "metric")])
            .send()
            .await
            .map_err(|e| WeatherError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status.is_client_error() {
            return Err(WeatherError::CityNotFound);
        }
        if !status.is_success() {
            return Err(WeatherError::Unavailable(format!(
                "provider returned status {}",
                status
            )));
        }

        let body: WeatherResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Unavailable(e.to_string()))?;
        let condition = body
            .weather
            .first()
            .ok_or_else(|| WeatherError::Unavailable("empty weather array".to_string()))?;

        Ok(WeatherReport {
            city: city.to_string(),
            temperature_c: body.main.temp,
            humidity_pct: body.main.humidity,
            condition: condition.description.to_lowercase(),
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn fetch_weather(&self, city: &str) -> Result<String, WeatherError> {
        match self.fetch_report(city).await {
            Ok(report) => Ok(report.format()),
            Err(e) => {
                warn!(city = %city, error = %e, "Weather lookup failed");
                Err(e)
            }
        }
    }
}
