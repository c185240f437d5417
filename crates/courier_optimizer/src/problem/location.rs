use serde::Serialize;

use crate::define_index_newtype;

define_index_newtype!(NodeIdx, Location);

/// A resolved stop. The label is the address as the caller typed it and is
/// only used for output, so two locations may share a label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    label: String,
    lat: f64,
    lon: f64,
}

impl Location {
    pub fn new(label: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            label: label.into(),
            lat,
            lon,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }
}

impl From<&Location> for geo::Point {
    fn from(location: &Location) -> Self {
        geo::Point::new(location.lon, location.lat)
    }
}
