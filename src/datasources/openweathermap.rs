use super::WeatherProvider;
use crate::config::OpenWeatherMapConfig;
use crate::error::WeatherError;
use crate::models::{CurrentWeather, WeatherObservation};
use chrono::{DateTime, Utc};
use serde::Deserialize;

pub const API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
}

// OpenWeatherMap current weather response
#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    #[serde(default)]
    name: Option<String>,
    main: OwmMain,
    #[serde(default)]
    rain: Option<OwmRain>,
    #[serde(default)]
    dt: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwmRain {
    #[serde(rename = "1h", default)]
    one_hour: f64,
}

#[derive(Debug, Deserialize)]
struct OwmErrorResponse {
    #[serde(default)]
    message: Option<String>,
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Fetch current conditions for a city name, in metric units
    pub async fn fetch_current(&self, location: &str) -> WeatherObservation {
        let url = reqwest::Url::parse_with_params(
            &format!("{}/weather", self.config.base_url.trim_end_matches('/')),
            &[
                ("q", location),
                ("appid", self.config.api_key.as_str()),
                ("units", "metric"),
            ],
        )
        .map_err(|e| WeatherError::Connection(format!("invalid OpenWeatherMap URL: {}", e)))?;

        tracing::debug!(location, "requesting current weather from OpenWeatherMap");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| WeatherError::Connection(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| WeatherError::Connection(e.to_string()))?;

        if !status.is_success() {
            return Err(parse_error(status.as_u16(), &body));
        }

        parse_current(location, &body)
    }
}

impl WeatherProvider for OpenWeatherMapClient {
    fn name(&self) -> &'static str {
        "OpenWeatherMap"
    }

    async fn fetch_weather(&self, location: &str) -> WeatherObservation {
        self.fetch_current(location).await
    }
}

fn parse_current(location: &str, body: &str) -> WeatherObservation {
    let owm: OwmCurrentResponse = serde_json::from_str(body).map_err(|e| {
        WeatherError::MalformedResponse(format!(
            "Failed to parse OpenWeatherMap response: {}",
            e
        ))
    })?;

    let observed_at = owm
        .dt
        .and_then(|dt| DateTime::from_timestamp(dt, 0))
        .unwrap_or_else(Utc::now);

    Ok(CurrentWeather {
        location: owm
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| location.to_string()),
        temperature_c: owm.main.temp,
        rainfall_last_hour_mm: owm.rain.map(|r| r.one_hour).unwrap_or(0.0),
        observed_at,
    })
}

fn parse_error(status: u16, body: &str) -> WeatherError {
    let message = serde_json::from_str::<OwmErrorResponse>(body)
        .ok()
        .and_then(|e| e.message)
        .unwrap_or_else(|| "Unknown error".to_string());
    WeatherError::from_status(status, message)
}
