use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};

/// Snapshot of sensor readings and field configuration for one decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldState {
    pub crop_name: String,
    pub soil_moisture_percent: f64,
    pub tank_level_percent: f64,
    pub field_area_m2: f64,
    pub pump_flow_rate_lpm: f64,
    pub tank_capacity_liters: f64,
}

impl FieldState {
    /// Reject values that would make the water arithmetic meaningless.
    ///
    /// Soil moisture and tank level are not range-checked, only required to be finite.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let finite = [
            ("soil moisture", self.soil_moisture_percent),
            ("tank level", self.tank_level_percent),
            ("field area", self.field_area_m2),
            ("pump flow rate", self.pump_flow_rate_lpm),
            ("tank capacity", self.tank_capacity_liters),
        ];
        if let Some(&(field, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigurationError::NonFinite { field });
        }

        if self.pump_flow_rate_lpm <= 0.0 {
            return Err(ConfigurationError::NonPositiveFlowRate(
                self.pump_flow_rate_lpm,
            ));
        }
        if self.field_area_m2 <= 0.0 {
            return Err(ConfigurationError::NonPositiveFieldArea(self.field_area_m2));
        }
        if self.tank_capacity_liters <= 0.0 {
            return Err(ConfigurationError::NonPositiveTankCapacity(
                self.tank_capacity_liters,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_field() -> FieldState {
        FieldState {
            crop_name: "Rice".into(),
            soil_moisture_percent: 35.0,
            tank_level_percent: 70.0,
            field_area_m2: 50.0,
            pump_flow_rate_lpm: 10.0,
            tank_capacity_liters: 500.0,
        }
    }

    #[test]
    fn valid_field_passes() {
        assert!(sample_field().validate().is_ok());
    }

    #[test]
    fn non_positive_flow_rate_rejected() {
        let mut field = sample_field();
        field.pump_flow_rate_lpm = 0.0;
        assert_eq!(
            field.validate(),
            Err(ConfigurationError::NonPositiveFlowRate(0.0))
        );

        field.pump_flow_rate_lpm = -3.0;
        assert_eq!(
            field.validate(),
            Err(ConfigurationError::NonPositiveFlowRate(-3.0))
        );
    }

    #[test]
    fn negative_area_and_capacity_rejected() {
        let mut field = sample_field();
        field.field_area_m2 = -1.0;
        assert_eq!(
            field.validate(),
            Err(ConfigurationError::NonPositiveFieldArea(-1.0))
        );

        let mut field = sample_field();
        field.tank_capacity_liters = -500.0;
        assert_eq!(
            field.validate(),
            Err(ConfigurationError::NonPositiveTankCapacity(-500.0))
        );
    }

    #[test]
    fn non_finite_values_rejected() {
        let mut field = sample_field();
        field.tank_level_percent = f64::NAN;
        assert_eq!(
            field.validate(),
            Err(ConfigurationError::NonFinite {
                field: "tank level"
            })
        );

        let mut field = sample_field();
        field.pump_flow_rate_lpm = f64::INFINITY;
        assert_eq!(
            field.validate(),
            Err(ConfigurationError::NonFinite {
                field: "pump flow rate"
            })
        );
    }

    #[test]
    fn out_of_range_percentages_are_not_rejected() {
        let mut field = sample_field();
        field.soil_moisture_percent = 130.0;
        field.tank_level_percent = -5.0;
        assert!(field.validate().is_ok());
    }
}
