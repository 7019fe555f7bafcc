//! Location model for geocoded places

use serde::{Deserialize, Serialize};

/// A geocoded place, produced from the first match of a geocoding query
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Display name (city or town)
    pub name: String,
    /// Country name
    pub country: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new<S: Into<String>>(name: S, country: S, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            latitude,
            longitude,
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
