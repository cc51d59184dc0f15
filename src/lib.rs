//! `climate-api` - read-only JSON endpoints over a climate-observation dataset
//!
//! This library provides the observation store, the query service that
//! derives trailing-year windows and range statistics, and the HTTP router.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod observations;
pub mod store;
pub mod web;

// Re-export core types for public API
pub use config::ClimateApiConfig;
pub use error::ClimateApiError;
pub use models::{
    DateRange, PrecipitationReading, Station, TemperatureObservation, TemperatureObservations,
    TemperatureStats,
};
pub use observations::ObservationService;
pub use store::Database;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ClimateApiError>;
