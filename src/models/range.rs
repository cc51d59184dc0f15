//! Calendar dates and inclusive date intervals used by range queries

use chrono::NaiveDate;

use crate::{ClimateApiError, Result};

/// Storage and wire format of every observation date
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date, rejecting anything else.
///
/// `label` names the parameter in the validation message.
pub fn parse_date(label: &str, value: &str) -> Result<NaiveDate> {
    // chrono accepts unpadded fields, the stored text is always zero-padded
    let parsed = NaiveDate::parse_from_str(value, DATE_FORMAT).ok();
    match parsed {
        Some(date) if date.format(DATE_FORMAT).to_string() == value => Ok(date),
        _ => Err(ClimateApiError::validation(format!(
            "{label} date '{value}' is not a valid YYYY-MM-DD date"
        ))),
    }
}

/// Inclusive date interval, open-ended when `end` is absent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    #[must_use]
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Build a range from raw path parameters.
    ///
    /// A start after the end is a valid, empty range.
    pub fn parse(start: &str, end: Option<&str>) -> Result<Self> {
        let start = parse_date("start", start)?;
        let end = end.map(|end| parse_date("end", end)).transpose()?;
        Ok(Self::new(start, end))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end.is_some_and(|end| end < self.start)
    }
}
