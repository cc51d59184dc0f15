//! SQLite observation store
//!
//! Reads the `measurement` and `station` tables of the climate dataset.
//! Nothing here writes: every connection is opened read-only, lives for
//! exactly one request and is dropped on every exit path.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use tokio::task;
use tracing::{debug, info};

use crate::models::{
    DateRange, PrecipitationReading, Station, TemperatureObservation, TemperatureStats,
};
use crate::{ClimateApiError, Result};

/// Tables the dataset must provide
const REQUIRED_TABLES: [&str; 2] = ["measurement", "station"];

/// Handle to the observation database file.
///
/// Holds no open connection; see [`Database::run`].
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    /// Open the dataset at `path`, checking that the file and its tables exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("database file not found: {}", path.display()),
            )
            .into());
        }

        let database = Self {
            path: path.to_path_buf(),
        };

        let conn = database.connect()?;
        for table in REQUIRED_TABLES {
            if !table_exists(&conn, table)? {
                return Err(ClimateApiError::store(format!(
                    "table '{table}' missing from {}",
                    path.display()
                )));
            }
        }

        info!("Using observation database at {}", path.display());
        Ok(database)
    }

    /// Open a fresh read-only connection
    pub fn connect(&self) -> Result<Connection> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(conn)
    }

    /// Run `query` against a connection scoped to this call.
    ///
    /// SQLite blocks, so the work happens on the blocking pool. The
    /// connection is closed when `query` returns, whether it succeeded or not.
    pub async fn run<T, F>(&self, query: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
    {
        let database = self.clone();
        task::spawn_blocking(move || {
            let conn = database.connect()?;
            query(&conn)
        })
        .await?
    }
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let found: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
            params![table],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Most recent observation date, `None` when the table is empty
pub fn latest_observation_date(conn: &Connection) -> Result<Option<NaiveDate>> {
    let latest: Option<NaiveDate> =
        conn.query_row("SELECT MAX(date) FROM measurement", [], |row| row.get(0))?;
    debug!("Latest observation date: {:?}", latest);
    Ok(latest)
}

/// Every precipitation reading dated on or after `cutoff`, in storage order
pub fn precipitation_since(
    conn: &Connection,
    cutoff: NaiveDate,
) -> Result<Vec<PrecipitationReading>> {
    let mut stmt = conn.prepare(
        "SELECT date, prcp FROM measurement \
         WHERE date >= ?1 ORDER BY rowid",
    )?;
    let rows = stmt.query_map(params![cutoff], |row| {
        Ok(PrecipitationReading {
            date: row.get(0)?,
            precipitation: row.get(1)?,
        })
    })?;
    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(ClimateApiError::from)
}

/// Every station row, in storage order and without deduplication
pub fn stations(conn: &Connection) -> Result<Vec<Station>> {
    let mut stmt = conn.prepare(
        "SELECT station, name, latitude, longitude, elevation \
         FROM station ORDER BY rowid",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(Station {
            station: row.get(0)?,
            name: row.get(1)?,
            latitude: row.get(2)?,
            longitude: row.get(3)?,
            elevation: row.get(4)?,
        })
    })?;
    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(ClimateApiError::from)
}

/// Temperature observations for one station dated on or after `cutoff`
pub fn temperature_observations_since(
    conn: &Connection,
    station: &str,
    cutoff: NaiveDate,
) -> Result<Vec<TemperatureObservation>> {
    let mut stmt = conn.prepare(
        "SELECT date, station, tobs FROM measurement \
         WHERE date >= ?1 AND station = ?2 ORDER BY rowid",
    )?;
    let rows = stmt.query_map(params![cutoff, station], |row| {
        Ok(TemperatureObservation {
            date: row.get(0)?,
            station: row.get(1)?,
            temperature: row.get(2)?,
        })
    })?;
    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(ClimateApiError::from)
}

/// MAX, MIN and AVG of non-null temperatures for one station over `range`.
///
/// SQLite yields NULL for all three over an empty set.
pub fn temperature_stats(
    conn: &Connection,
    station: &str,
    range: &DateRange,
) -> Result<TemperatureStats> {
    let stats = conn.query_row(
        "SELECT MAX(tobs), MIN(tobs), AVG(tobs) FROM measurement \
         WHERE station = ?1 AND date >= ?2 AND (?3 IS NULL OR date <= ?3)",
        params![station, range.start, range.end],
        |row| {
            Ok(TemperatureStats {
                max: row.get(0)?,
                min: row.get(1)?,
                avg: row.get(2)?,
            })
        },
    )?;
    Ok(stats)
}
