//! Station model for measurement locations

/// A fixed measurement location
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// Station identifier, e.g. `USC00519281`
    pub station: String,
    /// Human-readable station name
    pub name: Option<String>,
    /// Latitude in decimal degrees
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees
    pub longitude: Option<f64>,
    /// Elevation in the dataset's units
    pub elevation: Option<f64>,
}
