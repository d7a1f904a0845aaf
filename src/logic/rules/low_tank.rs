use super::{Assessment, Rule};
use crate::models::DecisionReason;

/// Low tank rule - keeps the pump off when the tank is nearly empty
///
/// Conditions:
/// - Tank level below `min_level_percent`, whatever the water demand
pub struct LowTankRule {
    pub min_level_percent: f64,
}

impl Rule for LowTankRule {
    fn id(&self) -> &'static str {
        "low_tank"
    }

    fn name(&self) -> &'static str {
        "Low Tank Level"
    }

    fn evaluate(&self, assessment: &Assessment<'_>) -> Option<DecisionReason> {
        if assessment.field.tank_level_percent < self.min_level_percent {
            Some(DecisionReason::LowTankLevel)
        } else {
            None
        }
    }
}
