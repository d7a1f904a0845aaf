use crate::error::{ConfigurationError, WeatherError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point-in-time weather reading for a named location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub location: String,
    pub temperature_c: f64,
    /// Rain over the last hour. Zero when the provider reports none.
    #[serde(default)]
    pub rainfall_last_hour_mm: f64,
    pub observed_at: DateTime<Utc>,
}

impl CurrentWeather {
    pub fn new(location: impl Into<String>, temperature_c: f64, rainfall_last_hour_mm: f64) -> Self {
        Self {
            location: location.into(),
            temperature_c,
            rainfall_last_hour_mm,
            observed_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.temperature_c.is_finite() {
            return Err(ConfigurationError::NonFinite {
                field: "temperature",
            });
        }
        if !self.rainfall_last_hour_mm.is_finite() {
            return Err(ConfigurationError::NonFinite { field: "rainfall" });
        }
        Ok(())
    }
}

/// Outcome of one weather lookup.
pub type WeatherObservation = std::result::Result<CurrentWeather, WeatherError>;
