//! Irrigation pump decisions from soil, tank, crop and weather inputs.
//!
//! The decision engine ([`logic::decide`]) and crop table
//! ([`models::lookup_crop_profile`]) are pure. Weather comes from a
//! [`datasources::WeatherProvider`] and is resolved by the caller before
//! the engine runs; [`logic::IrrigationCheck`] wires the two together.

pub mod cli;
pub mod config;
pub mod datasources;
pub mod error;
pub mod logic;
pub mod models;

pub use error::{ConfigurationError, PumpwiseError, Result, WeatherError};
pub use logic::{decide, DecisionEngine, EngineThresholds, IrrigationCheck, IrrigationReport};
pub use models::{
    lookup_crop_profile, CropProfile, CropTable, CurrentWeather, Decision, DecisionReason,
    FieldState, PumpState, WeatherObservation,
};
