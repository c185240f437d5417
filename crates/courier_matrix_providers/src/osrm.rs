use serde::Deserialize;
use tracing::debug;

use crate::{error::TravelMatrixError, travel_matrices::TravelMatrices};

pub const OSRM_PUBLIC_URL: &str = "https://router.project-osrm.org";
pub const OSRM_TABLE_API_PATH: &str = "/table/v1/";

/// Subset of the OSRM table service response we care about.
/// Unreachable pairs come back as `null`.
#[derive(Deserialize)]
struct TableResponse {
    code: String,
    message: Option<String>,
    distances: Option<Vec<Vec<Option<f64>>>>,
    durations: Option<Vec<Vec<Option<f64>>>>,
}

pub struct OsrmMatrixClientParams {
    pub osrm_url: String,
}

impl Default for OsrmMatrixClientParams {
    fn default() -> Self {
        Self {
            osrm_url: OSRM_PUBLIC_URL.to_owned(),
        }
    }
}

pub struct OsrmMatrixClient {
    params: OsrmMatrixClientParams,
    client: reqwest::Client,
}

impl OsrmMatrixClient {
    pub fn new(params: OsrmMatrixClientParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    pub fn table_url<P>(&self, points: &[P], profile: &str) -> String
    where
        for<'a> &'a P: Into<geo_types::Point>,
    {
        let mut url = self.params.osrm_url.trim_end_matches('/').to_owned();
        url.push_str(OSRM_TABLE_API_PATH);
        url.push_str(profile);
        url.push('/');

        for (i, point) in points.iter().enumerate() {
            let point: geo_types::Point = point.into();
            url.push_str(&format!("{},{}", point.x(), point.y()));

            if i < points.len() - 1 {
                url.push(';');
            }
        }

        url
    }

    pub async fn fetch_matrix<P>(
        &self,
        points: &[P],
        profile: &str,
    ) -> Result<TravelMatrices, TravelMatrixError>
    where
        for<'a> &'a P: Into<geo_types::Point>,
    {
        if points.is_empty() {
            return Err(TravelMatrixError::EmptyInput);
        }

        let url = self.table_url(points, profile);
        debug!("OSRM: requesting table for {} points", points.len());

        let response = self
            .client
            .get(url)
            .query(&[("annotations", "distance,duration")])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<TableResponse>(&body)
                .ok()
                .and_then(|table| table.message)
                .unwrap_or(body);
            return Err(TravelMatrixError::Api {
                status: status.as_u16(),
                message,
            });
        }

        parse_table_response(&body, points.len())
    }
}

pub(crate) fn parse_table_response(
    body: &str,
    num_points: usize,
) -> Result<TravelMatrices, TravelMatrixError> {
    let table: TableResponse = serde_json::from_str(body)?;

    if table.code != "Ok" {
        return Err(TravelMatrixError::InvalidResponse(format!(
            "{}: {}",
            table.code,
            table.message.unwrap_or_default()
        )));
    }

    let distances = table
        .distances
        .ok_or_else(|| TravelMatrixError::InvalidResponse("missing distances".to_owned()))?;

    // Durations are optional on some OSRM deployments, distances are what we optimize on.
    let durations = table
        .durations
        .unwrap_or_else(|| vec![vec![None; num_points]; num_points]);

    Ok(TravelMatrices::from_rows(distances, durations))
}
