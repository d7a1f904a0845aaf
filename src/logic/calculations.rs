use crate::models::{CropProfile, FieldState};

/// Liters currently held in the tank.
pub fn available_water(tank_level_percent: f64, tank_capacity_liters: f64) -> f64 {
    (tank_level_percent / 100.0) * tank_capacity_liters
}

/// Liters needed for one full irrigation cycle over the field.
pub fn water_needed(crop: &CropProfile, field_area_m2: f64) -> f64 {
    crop.water_need_per_m2 * field_area_m2
}

/// Minutes the pump runs to deliver `liters`. `None` when the flow rate is not positive.
pub fn run_time_minutes(liters: f64, pump_flow_rate_lpm: f64) -> Option<f64> {
    if pump_flow_rate_lpm > 0.0 {
        Some(liters / pump_flow_rate_lpm)
    } else {
        None
    }
}

/// Water figures derived from a field and crop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterBudget {
    pub available_liters: f64,
    pub needed_liters: f64,
    pub run_time_minutes: f64,
}

impl WaterBudget {
    pub fn compute(field: &FieldState, crop: &CropProfile) -> Option<Self> {
        let available_liters = available_water(field.tank_level_percent, field.tank_capacity_liters);
        let needed_liters = water_needed(crop, field.field_area_m2);
        let run_time_minutes = run_time_minutes(needed_liters, field.pump_flow_rate_lpm)?;

        Some(Self {
            available_liters,
            needed_liters,
            run_time_minutes,
        })
    }

    pub fn is_sufficient(&self) -> bool {
        self.available_liters >= self.needed_liters
    }
}
