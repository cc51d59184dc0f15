//! Observation Query Service
//!
//! Turns the four request shapes of the API into store reads: trailing-year
//! precipitation, the station list, trailing-year temperature observations
//! for the configured station, and temperature statistics over a date range.

use chrono::{Days, NaiveDate};
use rusqlite::Connection;
use tracing::{debug, instrument};

use crate::config::QueryConfig;
use crate::models::{DateRange, PrecipitationReading, TemperatureObservations, TemperatureStats};
use crate::store::{self, Database};
use crate::{ClimateApiError, Result};

/// Read-only query service over the observation dataset
#[derive(Debug, Clone)]
pub struct ObservationService {
    database: Database,
    station: String,
    trailing_days: u32,
}

impl ObservationService {
    /// Create a service using the station and trailing window from `query`
    #[must_use]
    pub fn new(database: Database, query: &QueryConfig) -> Self {
        Self {
            database,
            station: query.station.clone(),
            trailing_days: query.trailing_days,
        }
    }

    /// Station the temperature queries are pinned to
    #[must_use]
    pub fn station(&self) -> &str {
        &self.station
    }

    /// All precipitation readings within the trailing window
    #[instrument(skip(self))]
    pub async fn recent_precipitation(&self) -> Result<Vec<PrecipitationReading>> {
        let trailing_days = self.trailing_days;
        let readings = self
            .database
            .run(move |conn| {
                let cutoff = trailing_cutoff(conn, trailing_days)?;
                store::precipitation_since(conn, cutoff)
            })
            .await?;
        debug!("Found {} precipitation readings", readings.len());
        Ok(readings)
    }

    /// Every station identifier, duplicates included
    #[instrument(skip(self))]
    pub async fn station_ids(&self) -> Result<Vec<String>> {
        let stations = self.database.run(store::stations).await?;
        Ok(stations.into_iter().map(|s| s.station).collect())
    }

    /// Temperature observations of the configured station within the trailing window
    #[instrument(skip(self), fields(station = %self.station))]
    pub async fn recent_temperatures(&self) -> Result<TemperatureObservations> {
        let trailing_days = self.trailing_days;
        let station = self.station.clone();
        let rows = self
            .database
            .run(move |conn| {
                let cutoff = trailing_cutoff(conn, trailing_days)?;
                store::temperature_observations_since(conn, &station, cutoff)
            })
            .await?;
        debug!("Found {} temperature observations", rows.len());
        Ok(rows.into())
    }

    /// Max, min and mean temperature of the configured station over `range`.
    ///
    /// An empty range yields all-null statistics rather than an error.
    #[instrument(skip(self), fields(station = %self.station))]
    pub async fn temperature_stats(&self, range: DateRange) -> Result<TemperatureStats> {
        if range.is_empty() {
            debug!("Range ends before it starts");
            return Ok(TemperatureStats::default());
        }

        let station = self.station.clone();
        self.database
            .run(move |conn| store::temperature_stats(conn, &station, &range))
            .await
    }
}

/// Start of the trailing window ending at the most recent observation.
///
/// Recomputed on every call, never cached.
fn trailing_cutoff(conn: &Connection, trailing_days: u32) -> Result<NaiveDate> {
    let latest = store::latest_observation_date(conn)?.ok_or(ClimateApiError::NoData)?;
    latest
        .checked_sub_days(Days::new(u64::from(trailing_days)))
        .ok_or_else(|| {
            ClimateApiError::store(format!(
                "cannot go back {trailing_days} days from {latest}"
            ))
        })
}
