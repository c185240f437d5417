use std::future::Future;

use serde::Serialize;

use crate::error::GeocodingError;

/// A coordinate resolved from a free-text address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocodedPoint {
    pub lat: f64,
    pub lon: f64,
    /// Name the service matched the query to, if it reports one
    pub display_name: Option<String>,
}

impl From<&GeocodedPoint> for geo_types::Point {
    fn from(point: &GeocodedPoint) -> Self {
        geo_types::Point::new(point.lon, point.lat)
    }
}

/// Resolves addresses to coordinates.
///
/// `Ok(None)` means the service answered but found nothing; errors are
/// reserved for transport or format failures.
pub trait Geocoder: Send + Sync {
    fn geocode(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Option<GeocodedPoint>, GeocodingError>> + Send;
}

impl<G> Geocoder for &G
where
    G: Geocoder,
{
    fn geocode(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Option<GeocodedPoint>, GeocodingError>> + Send {
        (**self).geocode(query)
    }
}
