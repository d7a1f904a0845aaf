pub mod engine;
pub mod low_tank;
pub mod rain_skip;
pub mod soil_moisture;
pub mod water_supply;

pub use engine::{decide, DecisionEngine, EngineThresholds};

use super::calculations::WaterBudget;
use crate::models::{CropProfile, CurrentWeather, DecisionReason, FieldState};

/// Inputs shared by every rule for one evaluation.
pub struct Assessment<'a> {
    pub field: &'a FieldState,
    pub crop: &'a CropProfile,
    pub weather: &'a CurrentWeather,
    pub budget: WaterBudget,
}

/// A condition that keeps the pump idle
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Return the idle reason if this rule blocks irrigation
    fn evaluate(&self, assessment: &Assessment<'_>) -> Option<DecisionReason>;
}
