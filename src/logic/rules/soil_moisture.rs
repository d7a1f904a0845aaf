use super::{Assessment, Rule};
use crate::models::DecisionReason;

/// Soil moisture rule - soil at or above the crop threshold needs no water
pub struct SoilMoistureRule;

impl Rule for SoilMoistureRule {
    fn id(&self) -> &'static str {
        "soil_moisture"
    }

    fn name(&self) -> &'static str {
        "Soil Already Moist"
    }

    fn evaluate(&self, assessment: &Assessment<'_>) -> Option<DecisionReason> {
        if assessment.field.soil_moisture_percent >= assessment.crop.soil_moisture_threshold {
            Some(DecisionReason::SoilMoistEnough)
        } else {
            None
        }
    }
}
