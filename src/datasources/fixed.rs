use super::WeatherProvider;
use crate::error::ConfigurationError;
use crate::models::{CurrentWeather, WeatherObservation};

/// Provider that always returns the same observation, relabelled with the
/// requested location. Used for offline checks.
pub struct FixedWeather {
    observation: WeatherObservation,
}

impl FixedWeather {
    pub fn new(temperature_c: f64, rainfall_last_hour_mm: f64) -> Result<Self, ConfigurationError> {
        let weather = CurrentWeather::new("", temperature_c, rainfall_last_hour_mm);
        weather.validate()?;
        Ok(Self {
            observation: Ok(weather),
        })
    }

    pub fn from_observation(observation: WeatherObservation) -> Self {
        Self { observation }
    }
}

impl WeatherProvider for FixedWeather {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn fetch_weather(&self, location: &str) -> WeatherObservation {
        self.observation.clone().map(|mut weather| {
            weather.location = location.to_string();
            weather
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WeatherError;

    #[tokio::test]
    async fn returns_preset_values_for_any_location() {
        let provider = FixedWeather::new(28.5, 1.2).unwrap();
        let weather = provider.fetch_weather("Pune").await.unwrap();

        assert_eq!(weather.location, "Pune");
        assert_eq!(weather.temperature_c, 28.5);
        assert_eq!(weather.rainfall_last_hour_mm, 1.2);
    }

    #[test]
    fn rejects_non_finite_values() {
        assert_eq!(
            FixedWeather::new(28.5, f64::NAN).err(),
            Some(ConfigurationError::NonFinite { field: "rainfall" })
        );
        assert_eq!(
            FixedWeather::new(f64::INFINITY, 0.0).err(),
            Some(ConfigurationError::NonFinite {
                field: "temperature"
            })
        );
    }

    #[tokio::test]
    async fn returns_preset_error() {
        let provider =
            FixedWeather::from_observation(Err(WeatherError::LocationNotFound("city not found".into())));
        let err = provider.fetch_weather("Atlantis").await.unwrap_err();
        assert_eq!(err, WeatherError::LocationNotFound("city not found".into()));
    }
}
