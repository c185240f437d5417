use crate::{
    fallback::FallbackGeocoder,
    nominatim::{NominatimGeocoder, NominatimGeocoderParams},
    photon::PhotonGeocoder,
    rate_limited::{RateLimitParams, RateLimitedGeocoder},
};

const USER_AGENT_ENV_VAR: &str = "COURIER_USER_AGENT";

pub type PublicGeocoder =
    RateLimitedGeocoder<FallbackGeocoder<NominatimGeocoder, PhotonGeocoder>>;

/// Public OpenStreetMap geocoding: Nominatim first, Photon when Nominatim
/// finds nothing, at most one request per second.
///
/// The Nominatim user agent is read from `COURIER_USER_AGENT` when set.
pub fn public_geocoder() -> PublicGeocoder {
    let mut params = NominatimGeocoderParams::default();
    if let Ok(user_agent) = std::env::var(USER_AGENT_ENV_VAR) {
        params.user_agent = user_agent;
    }

    RateLimitedGeocoder::new(
        FallbackGeocoder::new(NominatimGeocoder::new(params), PhotonGeocoder::default()),
        RateLimitParams::default(),
    )
}
