use tracing::debug;

use crate::{
    error::GeocodingError,
    geocoder::{GeocodedPoint, Geocoder},
};

/// Asks `primary` first and falls back to `secondary` when the primary
/// finds nothing or fails.
pub struct FallbackGeocoder<A, B> {
    primary: A,
    secondary: B,
}

impl<A, B> FallbackGeocoder<A, B> {
    pub fn new(primary: A, secondary: B) -> Self {
        Self { primary, secondary }
    }
}

impl<A, B> Geocoder for FallbackGeocoder<A, B>
where
    A: Geocoder,
    B: Geocoder,
{
    async fn geocode(&self, query: &str) -> Result<Option<GeocodedPoint>, GeocodingError> {
        match self.primary.geocode(query).await {
            Ok(Some(point)) => return Ok(Some(point)),
            Ok(None) => debug!("Primary geocoder found nothing for {query:?}"),
            Err(err) => debug!("Primary geocoder failed for {query:?}: {err}"),
        }

        self.secondary.geocode(query).await
    }
}
