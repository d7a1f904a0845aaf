use super::{
    low_tank::LowTankRule, rain_skip::RainSkipRule, soil_moisture::SoilMoistureRule,
    water_supply::WaterSupplyRule, Assessment, Rule,
};
use crate::error::{ConfigurationError, Result};
use crate::logic::calculations::WaterBudget;
use crate::models::{CropProfile, CurrentWeather, Decision, DecisionReason, FieldState};
use serde::{Deserialize, Serialize};

/// Tank level (%) below which the pump never runs.
pub const LOW_TANK_THRESHOLD_PERCENT: f64 = 20.0;

/// Last-hour rainfall (mm) at or above which irrigation is skipped.
pub const RAIN_SKIP_THRESHOLD_MM: f64 = 2.0;

/// Crop-independent thresholds used by the engine's rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineThresholds {
    #[serde(default = "default_low_tank")]
    pub low_tank_percent: f64,
    #[serde(default = "default_rain_skip")]
    pub rain_skip_mm: f64,
}

fn default_low_tank() -> f64 {
    LOW_TANK_THRESHOLD_PERCENT
}

fn default_rain_skip() -> f64 {
    RAIN_SKIP_THRESHOLD_MM
}

impl EngineThresholds {
    /// Reject thresholds that would silently disable or invert a rule.
    pub fn validate(&self) -> std::result::Result<(), ConfigurationError> {
        if !(0.0..=100.0).contains(&self.low_tank_percent) {
            return Err(ConfigurationError::ThresholdOutOfRange {
                name: "low_tank_percent",
                value: self.low_tank_percent,
            });
        }
        if !self.rain_skip_mm.is_finite() || self.rain_skip_mm < 0.0 {
            return Err(ConfigurationError::ThresholdOutOfRange {
                name: "rain_skip_mm",
                value: self.rain_skip_mm,
            });
        }
        Ok(())
    }
}

impl Default for EngineThresholds {
    fn default() -> Self {
        Self {
            low_tank_percent: LOW_TANK_THRESHOLD_PERCENT,
            rain_skip_mm: RAIN_SKIP_THRESHOLD_MM,
        }
    }
}

/// Evaluates idle rules in precedence order. The first rule that fires wins;
/// if none fires the pump runs.
pub struct DecisionEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl DecisionEngine {
    pub fn new() -> Self {
        Self::with_thresholds(EngineThresholds::default())
    }

    pub fn with_thresholds(thresholds: EngineThresholds) -> Self {
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(LowTankRule {
                min_level_percent: thresholds.low_tank_percent,
            }),
            Box::new(WaterSupplyRule),
            Box::new(SoilMoistureRule),
            Box::new(RainSkipRule {
                min_rainfall_mm: thresholds.rain_skip_mm,
            }),
        ];

        Self { rules }
    }

    pub fn decide(
        &self,
        field: &FieldState,
        crop: &CropProfile,
        weather: &CurrentWeather,
    ) -> Result<Decision> {
        field.validate()?;
        crop.validate()?;
        weather.validate()?;
        let budget = WaterBudget::compute(field, crop).ok_or(
            ConfigurationError::NonPositiveFlowRate(field.pump_flow_rate_lpm),
        )?;

        let assessment = Assessment {
            field,
            crop,
            weather,
            budget,
        };

        let reason = self
            .rules
            .iter()
            .find_map(|rule| rule.evaluate(&assessment))
            .unwrap_or(DecisionReason::DryAndNoRain);

        Ok(Decision {
            pump_state: reason.pump_state(),
            reason,
            available_water_liters: budget.available_liters,
            total_water_needed_liters: budget.needed_liters,
            estimated_run_time_minutes: budget.run_time_minutes,
        })
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Decide with the default thresholds.
pub fn decide(
    field: &FieldState,
    crop: &CropProfile,
    weather: &CurrentWeather,
) -> Result<Decision> {
    DecisionEngine::new().decide(field, crop, weather)
}
