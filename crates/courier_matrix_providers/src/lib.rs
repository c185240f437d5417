pub mod as_the_crow_flies;
pub mod error;
pub mod osrm;
pub mod travel_matrices;
pub mod travel_matrix_client;
pub mod travel_matrix_provider;

#[cfg(test)]
pub(crate) mod test_utils {
    /// Plain `(lon, lat)` pair used to feed the providers in tests.
    pub struct TestPoint(pub f64, pub f64);

    impl From<&TestPoint> for geo_types::Point {
        fn from(point: &TestPoint) -> Self {
            geo_types::Point::new(point.0, point.1)
        }
    }
}
