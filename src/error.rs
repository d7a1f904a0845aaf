use thiserror::Error;

#[derive(Error, Debug)]
pub enum PumpwiseError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Weather error: {0}")]
    Weather(#[from] WeatherError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Malformed field or crop parameters. Raised before any arithmetic runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("pump flow rate must be positive (got {0} L/min)")]
    NonPositiveFlowRate(f64),

    #[error("field area must be positive (got {0} m²)")]
    NonPositiveFieldArea(f64),

    #[error("tank capacity must be positive (got {0} L)")]
    NonPositiveTankCapacity(f64),

    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("soil moisture threshold for {crop} must be within 0-100% (got {value})")]
    SoilThresholdOutOfRange { crop: String, value: f64 },

    #[error("water need for {crop} must be positive (got {value} L/m²)")]
    NonPositiveWaterNeed { crop: String, value: f64 },

    #[error("engine threshold {name} is out of range (got {value})")]
    ThresholdOutOfRange { name: &'static str, value: f64 },

    #[error("crop {0} is defined more than once")]
    DuplicateCrop(String),

    #[error("fallback crop {0} is not in the crop table")]
    UnknownFallbackCrop(String),
}

/// Failure to obtain a weather observation, classified by cause.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WeatherError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("location not found: {0}")]
    LocationNotFound(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("provider returned {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl WeatherError {
    /// Map a non-success HTTP status and the provider's message to an error kind.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => WeatherError::Unauthorized(message),
            404 => WeatherError::LocationNotFound(message),
            429 => WeatherError::RateLimited(message),
            _ => WeatherError::Provider { status, message },
        }
    }
}

pub type Result<T> = std::result::Result<T, PumpwiseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_error_from_status() {
        assert_eq!(
            WeatherError::from_status(404, "city not found"),
            WeatherError::LocationNotFound("city not found".into())
        );
        assert_eq!(
            WeatherError::from_status(401, "Invalid API key"),
            WeatherError::Unauthorized("Invalid API key".into())
        );
        assert_eq!(
            WeatherError::from_status(429, "slow down"),
            WeatherError::RateLimited("slow down".into())
        );
        assert_eq!(
            WeatherError::from_status(500, "boom"),
            WeatherError::Provider {
                status: 500,
                message: "boom".into()
            }
        );
    }

    #[test]
    fn configuration_error_wraps_into_crate_error() {
        let err: PumpwiseError = ConfigurationError::NonPositiveFlowRate(0.0).into();
        assert_eq!(
            err.to_string(),
            "Configuration error: pump flow rate must be positive (got 0 L/min)"
        );
    }
}
