use std::{collections::HashMap, sync::Mutex};

use tokio::time::Instant;

use crate::{
    error::GeocodingError,
    geocoder::{GeocodedPoint, Geocoder},
};

/// In-memory geocoder that records when it is called.
#[derive(Default)]
pub struct MockGeocoder {
    points: HashMap<String, GeocodedPoint>,
    failures_left: Mutex<u32>,
    calls: Mutex<Vec<Instant>>,
}

impl MockGeocoder {
    pub fn with_point(mut self, query: &str, lat: f64, lon: f64) -> Self {
        self.points.insert(
            query.to_owned(),
            GeocodedPoint {
                lat,
                lon,
                display_name: None,
            },
        );
        self
    }

    /// Fail the next `count` calls before answering normally
    pub fn failing(self, count: u32) -> Self {
        *self.failures_left.lock().unwrap() = count;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn call_instants(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().clone()
    }
}

impl Geocoder for MockGeocoder {
    async fn geocode(&self, query: &str) -> Result<Option<GeocodedPoint>, GeocodingError> {
        self.calls.lock().unwrap().push(Instant::now());

        {
            let mut failures_left = self.failures_left.lock().unwrap();
            if *failures_left > 0 {
                *failures_left -= 1;
                return Err(GeocodingError::InvalidResponse("mock failure".to_owned()));
            }
        }

        Ok(self.points.get(query).cloned())
    }
}
