pub mod address_normalizer;
pub mod error;
pub mod fallback;
pub mod geocoder;
pub mod nominatim;
pub mod photon;
pub mod public;
pub mod rate_limited;

#[cfg(test)]
pub(crate) mod test_utils;
