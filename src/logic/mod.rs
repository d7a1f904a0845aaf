pub mod calculations;
pub mod check;
pub mod rules;

pub use check::{IrrigationCheck, IrrigationReport};
pub use rules::{decide, DecisionEngine, EngineThresholds};
