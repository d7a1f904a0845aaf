use super::rules::DecisionEngine;
use crate::datasources::WeatherProvider;
use crate::error::Result;
use crate::models::{CropProfile, CropTable, CurrentWeather, Decision, FieldState};
use serde::Serialize;

/// Everything a caller needs to show the outcome of one irrigation check.
#[derive(Debug, Clone, Serialize)]
pub struct IrrigationReport {
    pub location: String,
    pub crop: CropProfile,
    pub field: FieldState,
    pub weather: CurrentWeather,
    pub decision: Decision,
}

impl std::fmt::Display for IrrigationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let d = &self.decision;
        writeln!(f, "Pump Status: {}", d.pump_state)?;
        writeln!(f, "Reason: {}", d.reason)?;
        writeln!(f)?;
        writeln!(f, "System Details:")?;
        writeln!(f, "  Selected Crop: {}", self.crop)?;
        writeln!(
            f,
            "  Soil Moisture: {}% (Dry if < {}%)",
            self.field.soil_moisture_percent, self.crop.soil_moisture_threshold
        )?;
        writeln!(
            f,
            "  Weather ({}): {} mm rain, {}°C",
            self.location, self.weather.rainfall_last_hour_mm, self.weather.temperature_c
        )?;
        writeln!(f)?;
        writeln!(f, "Water Calculation:")?;
        writeln!(
            f,
            "  Tank Level: {}% ({:.1} L available)",
            self.field.tank_level_percent, d.available_water_liters
        )?;
        writeln!(f, "  Water Needed: {:.1} L", d.total_water_needed_liters)?;
        write!(f, "  Est. Run Time: {:.1} min", d.estimated_run_time_minutes)
    }
}

/// Resolves the crop, fetches weather once, and runs the decision engine.
pub struct IrrigationCheck<P> {
    crops: CropTable,
    engine: DecisionEngine,
    provider: P,
}

impl<P: WeatherProvider> IrrigationCheck<P> {
    pub fn new(crops: CropTable, engine: DecisionEngine, provider: P) -> Self {
        Self {
            crops,
            engine,
            provider,
        }
    }

    /// A weather failure is returned as-is and the engine is not consulted.
    pub async fn run(&self, location: &str, field: &FieldState) -> Result<IrrigationReport> {
        let crop = match self.crops.find(&field.crop_name) {
            Some(crop) => crop,
            None => {
                let fallback = self.crops.fallback();
                tracing::debug!(
                    requested = %field.crop_name,
                    fallback = %fallback.name,
                    "Unknown crop, using fallback profile"
                );
                fallback
            }
        };

        let weather = match self.provider.fetch_weather(location).await {
            Ok(weather) => weather,
            Err(e) => {
                tracing::warn!("Weather lookup via {} failed: {}", self.provider.name(), e);
                return Err(e.into());
            }
        };

        let decision = self.engine.decide(field, crop, &weather)?;
        tracing::info!(
            pump = %decision.pump_state,
            reason = %decision.reason,
            "Irrigation check complete"
        );

        Ok(IrrigationReport {
            location: location.to_string(),
            crop: crop.clone(),
            field: field.clone(),
            weather,
            decision,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasources::FixedWeather;
    use crate::error::{PumpwiseError, WeatherError};
    use crate::models::PumpState;

    fn field(crop: &str, soil: f64) -> FieldState {
        FieldState {
            crop_name: crop.into(),
            soil_moisture_percent: soil,
            tank_level_percent: 70.0,
            field_area_m2: 50.0,
            pump_flow_rate_lpm: 10.0,
            tank_capacity_liters: 500.0,
        }
    }

    fn check(provider: FixedWeather) -> IrrigationCheck<FixedWeather> {
        IrrigationCheck::new(CropTable::builtin(), DecisionEngine::new(), provider)
    }

    #[tokio::test]
    async fn dry_field_activates_pump() {
        let report = check(FixedWeather::new(31.0, 0.0).unwrap())
            .run("Hyderabad", &field("Wheat", 20.0))
            .await
            .unwrap();

        assert_eq!(report.decision.pump_state, PumpState::Active);
        assert_eq!(report.crop.name, "Wheat");
        assert_eq!(report.weather.location, "Hyderabad");
    }

    #[tokio::test]
    async fn unknown_crop_resolves_to_fallback() {
        let report = check(FixedWeather::new(31.0, 0.0).unwrap())
            .run("Hyderabad", &field("Dragonfruit", 20.0))
            .await
            .unwrap();

        assert_eq!(report.crop.name, "Wheat");
        assert_eq!(report.field.crop_name, "Dragonfruit");
    }

    #[tokio::test]
    async fn weather_failure_short_circuits() {
        let provider = FixedWeather::from_observation(Err(WeatherError::LocationNotFound(
            "city not found".into(),
        )));
        let err = check(provider)
            .run("Atlantis", &field("Wheat", 20.0))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PumpwiseError::Weather(WeatherError::LocationNotFound(_))
        ));
    }

    #[tokio::test]
    async fn configuration_errors_propagate() {
        let mut f = field("Wheat", 20.0);
        f.pump_flow_rate_lpm = 0.0;
        let err = check(FixedWeather::new(31.0, 0.0).unwrap())
            .run("Hyderabad", &f)
            .await
            .unwrap_err();

        assert!(matches!(err, PumpwiseError::Configuration(_)));
    }

    #[tokio::test]
    async fn report_renders_summary() {
        let report = check(FixedWeather::new(30.5, 3.0).unwrap())
            .run("Hyderabad", &field("Wheat", 20.0))
            .await
            .unwrap();
        let text = report.to_string();

        assert!(text.contains("Pump Status: IDLE"));
        assert!(text.contains("Reason: Rain (3 mm) is expected."));
        assert!(text.contains("Soil Moisture: 20% (Dry if < 35%)"));
        assert!(text.contains("Weather (Hyderabad): 3 mm rain, 30.5°C"));
        assert!(text.contains("Tank Level: 70% (350.0 L available)"));
        assert!(text.contains("Water Needed: 200.0 L"));
        assert!(text.contains("Est. Run Time: 20.0 min"));
    }
}
