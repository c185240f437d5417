use serde::Deserialize;
use tracing::debug;

use crate::{
    error::GeocodingError,
    geocoder::{GeocodedPoint, Geocoder},
};

pub const PHOTON_PUBLIC_URL: &str = "https://photon.komoot.io";

#[derive(Deserialize)]
struct PhotonResponse {
    features: Vec<PhotonFeature>,
}

#[derive(Deserialize)]
struct PhotonFeature {
    geometry: PhotonGeometry,
    #[serde(default)]
    properties: PhotonProperties,
}

#[derive(Deserialize)]
struct PhotonGeometry {
    /// GeoJSON order: `[lon, lat]`
    coordinates: [f64; 2],
}

#[derive(Deserialize, Default)]
struct PhotonProperties {
    name: Option<String>,
    street: Option<String>,
    housenumber: Option<String>,
    city: Option<String>,
}

impl PhotonProperties {
    fn display_name(&self) -> Option<String> {
        let street = match (&self.street, &self.housenumber) {
            (Some(street), Some(number)) => Some(format!("{street} {number}")),
            (Some(street), None) => Some(street.clone()),
            _ => None,
        };

        let parts: Vec<&str> = [self.name.as_deref(), street.as_deref(), self.city.as_deref()]
            .into_iter()
            .flatten()
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

pub struct PhotonGeocoder {
    base_url: String,
    client: reqwest::Client,
}

impl Default for PhotonGeocoder {
    fn default() -> Self {
        Self::new(PHOTON_PUBLIC_URL.to_owned())
    }
}

impl PhotonGeocoder {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }
}

impl Geocoder for PhotonGeocoder {
    async fn geocode(&self, query: &str) -> Result<Option<GeocodedPoint>, GeocodingError> {
        let url = format!("{}/api/", self.base_url.trim_end_matches('/'));

        debug!("Photon: geocoding {query:?}");

        let response = self
            .client
            .get(url)
            .query(&[("q", query), ("limit", "1")])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(GeocodingError::Api { status, message });
        }

        let body = response.text().await?;
        parse_photon_response(&body)
    }
}

fn parse_photon_response(body: &str) -> Result<Option<GeocodedPoint>, GeocodingError> {
    let response: PhotonResponse = serde_json::from_str(body)
        .map_err(|err| GeocodingError::InvalidResponse(err.to_string()))?;

    Ok(response.features.into_iter().next().map(|feature| {
        let [lon, lat] = feature.geometry.coordinates;
        GeocodedPoint {
            lat,
            lon,
            display_name: feature.properties.display_name(),
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_photon_response() {
        let body = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [-4.7796, 37.8845] },
                "properties": { "street": "Ronda de Poniente", "housenumber": "2", "city": "Córdoba" }
            }]
        }"#;

        let point = parse_photon_response(body).unwrap().unwrap();

        assert_eq!(point.lat, 37.8845);
        assert_eq!(point.lon, -4.7796);
        assert_eq!(
            point.display_name.as_deref(),
            Some("Ronda de Poniente 2, Córdoba")
        );
    }

    #[test]
    fn test_parse_photon_response_empty() {
        let body = r#"{ "type": "FeatureCollection", "features": [] }"#;

        assert_eq!(parse_photon_response(body).unwrap(), None);
    }
}
