use serde::Deserialize;
use tracing::debug;

use crate::{
    error::GeocodingError,
    geocoder::{GeocodedPoint, Geocoder},
};

pub const NOMINATIM_PUBLIC_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_USER_AGENT: &str = "courier-route-optimizer/0.1";

#[derive(Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: Option<String>,
}

pub struct NominatimGeocoderParams {
    pub base_url: String,
    /// Nominatim's usage policy requires an identifying user agent
    pub user_agent: String,
}

impl Default for NominatimGeocoderParams {
    fn default() -> Self {
        Self {
            base_url: NOMINATIM_PUBLIC_URL.to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

pub struct NominatimGeocoder {
    params: NominatimGeocoderParams,
    client: reqwest::Client,
}

impl NominatimGeocoder {
    pub fn new(params: NominatimGeocoderParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }
}

impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, query: &str) -> Result<Option<GeocodedPoint>, GeocodingError> {
        let url = format!("{}/search", self.params.base_url.trim_end_matches('/'));

        debug!("Nominatim: geocoding {query:?}");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, &self.params.user_agent)
            .query(&[("q", query), ("format", "jsonv2"), ("limit", "1")])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(GeocodingError::Api { status, message });
        }

        let body = response.text().await?;
        parse_search_response(&body)
    }
}

fn parse_search_response(body: &str) -> Result<Option<GeocodedPoint>, GeocodingError> {
    let places: Vec<NominatimPlace> = serde_json::from_str(body)
        .map_err(|err| GeocodingError::InvalidResponse(err.to_string()))?;

    let Some(place) = places.into_iter().next() else {
        return Ok(None);
    };

    let lat = place
        .lat
        .parse::<f64>()
        .map_err(|_| GeocodingError::InvalidResponse(format!("invalid lat {}", place.lat)))?;
    let lon = place
        .lon
        .parse::<f64>()
        .map_err(|_| GeocodingError::InvalidResponse(format!("invalid lon {}", place.lon)))?;

    Ok(Some(GeocodedPoint {
        lat,
        lon,
        display_name: place.display_name,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_response() {
        let body = r#"[{
            "place_id": 1,
            "lat": "37.8845",
            "lon": "-4.7796",
            "display_name": "Ronda de Poniente, Córdoba, España"
        }]"#;

        let point = parse_search_response(body).unwrap().unwrap();

        assert_eq!(point.lat, 37.8845);
        assert_eq!(point.lon, -4.7796);
        assert_eq!(
            point.display_name.as_deref(),
            Some("Ronda de Poniente, Córdoba, España")
        );
    }

    #[test]
    fn test_parse_search_response_not_found() {
        assert_eq!(parse_search_response("[]").unwrap(), None);
    }

    #[test]
    fn test_parse_search_response_invalid() {
        let body = r#"[{ "lat": "north", "lon": "-4.7" }]"#;

        assert!(matches!(
            parse_search_response(body),
            Err(GeocodingError::InvalidResponse(_))
        ));
    }
}
