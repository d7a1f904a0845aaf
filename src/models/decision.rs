use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PumpState {
    Active,
    Idle,
}

impl PumpState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PumpState::Active => "ACTIVE",
            PumpState::Idle => "IDLE",
        }
    }
}

impl std::fmt::Display for PumpState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why the engine chose a pump state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecisionReason {
    LowTankLevel,
    InsufficientWater,
    SoilMoistEnough,
    RainExpected { rainfall_mm: f64 },
    DryAndNoRain,
}

impl DecisionReason {
    pub fn pump_state(&self) -> PumpState {
        match self {
            DecisionReason::DryAndNoRain => PumpState::Active,
            _ => PumpState::Idle,
        }
    }
}

impl std::fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecisionReason::LowTankLevel => write!(f, "Low water level in tank."),
            DecisionReason::InsufficientWater => {
                write!(f, "Not enough water in tank to irrigate.")
            }
            DecisionReason::SoilMoistEnough => write!(f, "Soil is already moist enough."),
            DecisionReason::RainExpected { rainfall_mm } => {
                write!(f, "Rain ({} mm) is expected.", rainfall_mm)
            }
            DecisionReason::DryAndNoRain => write!(f, "Soil is DRY and NO rain is forecast."),
        }
    }
}

/// Result of one pump evaluation.
///
/// The water quantities are filled in for every outcome, including idle ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub pump_state: PumpState,
    pub reason: DecisionReason,
    pub available_water_liters: f64,
    pub total_water_needed_liters: f64,
    pub estimated_run_time_minutes: f64,
}

impl Decision {
    pub fn is_active(&self) -> bool {
        self.pump_state == PumpState::Active
    }
}
