//! Observation rows and the response shapes derived from them

use chrono::NaiveDate;
use serde::ser::{SerializeSeq, SerializeTuple};
use serde::{Serialize, Serializer};

/// One day's precipitation at some station
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PrecipitationReading {
    pub date: NaiveDate,
    /// Precipitation amount, `None` when unmeasured (never coerced to zero)
    #[serde(rename = "prcp")]
    pub precipitation: Option<f64>,
}

/// One day's temperature observation at a station
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct TemperatureObservation {
    pub date: NaiveDate,
    pub station: String,
    pub temperature: Option<f64>,
}

/// Temperature observations emitted as one flat array:
/// `[date, station, temperature, date, station, temperature, ...]`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemperatureObservations(pub Vec<TemperatureObservation>);

impl TemperatureObservations {
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TemperatureObservation> {
        self.0.iter()
    }
}

impl From<Vec<TemperatureObservation>> for TemperatureObservations {
    fn from(rows: Vec<TemperatureObservation>) -> Self {
        Self(rows)
    }
}

impl Serialize for TemperatureObservations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len() * 3))?;
        for row in &self.0 {
            seq.serialize_element(&row.date)?;
            seq.serialize_element(&row.station)?;
            seq.serialize_element(&row.temperature)?;
        }
        seq.end()
    }
}

/// Temperature aggregates over a date range, emitted as `[max, min, avg]`.
///
/// All three are `None` when no non-null temperature fell in the range.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TemperatureStats {
    pub max: Option<f64>,
    pub min: Option<f64>,
    pub avg: Option<f64>,
}

impl TemperatureStats {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.max.is_none() && self.min.is_none() && self.avg.is_none()
    }
}

impl Serialize for TemperatureStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(3)?;
        tuple.serialize_element(&self.max)?;
        tuple.serialize_element(&self.min)?;
        tuple.serialize_element(&self.avg)?;
        tuple.end()
    }
}
