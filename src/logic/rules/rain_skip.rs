use super::{Assessment, Rule};
use crate::models::DecisionReason;

/// Rain skip rule - recent rainfall stands in for irrigation
///
/// Conditions:
/// - Last-hour rainfall of at least `min_rainfall_mm`
pub struct RainSkipRule {
    pub min_rainfall_mm: f64,
}

impl Rule for RainSkipRule {
    fn id(&self) -> &'static str {
        "rain_skip"
    }

    fn name(&self) -> &'static str {
        "Rain Expected"
    }

    fn evaluate(&self, assessment: &Assessment<'_>) -> Option<DecisionReason> {
        let rainfall_mm = assessment.weather.rainfall_last_hour_mm;
        if rainfall_mm >= self.min_rainfall_mm {
            Some(DecisionReason::RainExpected { rainfall_mm })
        } else {
            None
        }
    }
}
