pub mod fixed;
pub mod openweathermap;

pub use fixed::FixedWeather;
pub use openweathermap::OpenWeatherMapClient;

use crate::models::WeatherObservation;
use std::future::Future;

/// Source of current weather for a named location.
///
/// Implementations make one attempt per call; retrying is left to the caller.
pub trait WeatherProvider: Send + Sync {
    /// Short label used in logs and reports
    fn name(&self) -> &'static str;

    fn fetch_weather(&self, location: &str) -> impl Future<Output = WeatherObservation> + Send;
}
