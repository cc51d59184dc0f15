//! Data models for the climate API
//!
//! This module contains the domain models organized by concern:
//! - Station: Measurement locations and their metadata
//! - Observation: Dated precipitation and temperature rows
//! - Range: Date parsing and inclusive date intervals

pub mod observation;
pub mod range;
pub mod station;

// Re-export all public types for convenient access
pub use observation::{
    PrecipitationReading, TemperatureObservation, TemperatureObservations, TemperatureStats,
};
pub use range::DateRange;
pub use station::Station;
