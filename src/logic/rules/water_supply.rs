use super::{Assessment, Rule};
use crate::models::DecisionReason;

/// Water supply rule - the tank must hold a full cycle for the whole field
pub struct WaterSupplyRule;

impl Rule for WaterSupplyRule {
    fn id(&self) -> &'static str {
        "water_supply"
    }

    fn name(&self) -> &'static str {
        "Insufficient Tank Water"
    }

    fn evaluate(&self, assessment: &Assessment<'_>) -> Option<DecisionReason> {
        if assessment.budget.is_sufficient() {
            None
        } else {
            Some(DecisionReason::InsufficientWater)
        }
    }
}
