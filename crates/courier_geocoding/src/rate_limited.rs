use std::time::Duration;

use tokio::{sync::Mutex, time::Instant};
use tracing::warn;

use crate::{
    error::GeocodingError,
    geocoder::{GeocodedPoint, Geocoder},
};

#[derive(Debug, Clone)]
pub struct RateLimitParams {
    /// Minimum delay between the start of two consecutive requests
    pub min_delay: Duration,
    /// Number of extra attempts after a failed request
    pub max_retries: u32,
}

impl Default for RateLimitParams {
    fn default() -> Self {
        // Nominatim allows one request per second
        Self {
            min_delay: Duration::from_secs(1),
            max_retries: 2,
        }
    }
}

/// Serializes every call to the wrapped geocoder through a single slot.
///
/// The slot remembers when the last request started, so concurrent callers
/// queue on the mutex and each waits out `min_delay` before going out.
pub struct RateLimitedGeocoder<G> {
    inner: G,
    params: RateLimitParams,
    last_request: Mutex<Option<Instant>>,
}

impl<G> RateLimitedGeocoder<G> {
    pub fn new(inner: G, params: RateLimitParams) -> Self {
        Self {
            inner,
            params,
            last_request: Mutex::new(None),
        }
    }
}

impl<G> Geocoder for RateLimitedGeocoder<G>
where
    G: Geocoder,
{
    async fn geocode(&self, query: &str) -> Result<Option<GeocodedPoint>, GeocodingError> {
        let mut last_request = self.last_request.lock().await;
        let mut attempt = 0;

        loop {
            if let Some(last) = *last_request {
                tokio::time::sleep_until(last + self.params.min_delay).await;
            }
            *last_request = Some(Instant::now());

            match self.inner.geocode(query).await {
                Err(err) if attempt < self.params.max_retries => {
                    attempt += 1;
                    warn!(
                        "Geocoding {query:?} failed ({err}), retry {attempt}/{}",
                        self.params.max_retries
                    );
                }
                result => return result,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockGeocoder;

    #[tokio::test(start_paused = true)]
    async fn test_requests_are_spaced() {
        let mock = MockGeocoder::default().with_point("a", 1.0, 1.0);
        let geocoder = RateLimitedGeocoder::new(&mock, RateLimitParams::default());

        let start = Instant::now();
        for _ in 0..3 {
            geocoder.geocode("a").await.unwrap();
        }

        let instants = mock.call_instants();
        assert_eq!(instants.len(), 3);
        assert_eq!(instants[0], start);
        assert!(instants[1] - instants[0] >= Duration::from_secs(1));
        assert!(instants[2] - instants[1] >= Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_failures() {
        let mock = MockGeocoder::default().with_point("a", 1.0, 1.0).failing(2);
        let geocoder = RateLimitedGeocoder::new(&mock, RateLimitParams::default());

        let point = geocoder.geocode("a").await.unwrap();

        assert!(point.is_some());
        assert_eq!(mock.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_retries() {
        let mock = MockGeocoder::default().failing(u32::MAX);
        let geocoder = RateLimitedGeocoder::new(
            &mock,
            RateLimitParams {
                min_delay: Duration::from_millis(10),
                max_retries: 1,
            },
        );

        assert!(geocoder.geocode("a").await.is_err());
        assert_eq!(mock.calls(), 2);
    }
}
