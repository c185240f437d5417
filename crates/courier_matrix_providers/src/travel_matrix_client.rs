use tracing::debug;

use crate::{
    as_the_crow_flies::as_the_crow_flies_matrices,
    error::TravelMatrixError,
    osrm::{OsrmMatrixClient, OsrmMatrixClientParams},
    travel_matrices::TravelMatrices,
    travel_matrix_provider::TravelMatrixProvider,
};

const OSRM_URL_ENV_VAR: &str = "COURIER_OSRM_URL";

pub struct TravelMatrixClient {
    osrm_client: OsrmMatrixClient,
}

impl Default for TravelMatrixClient {
    fn default() -> Self {
        let params = match std::env::var(OSRM_URL_ENV_VAR) {
            Ok(osrm_url) => OsrmMatrixClientParams { osrm_url },
            Err(_) => OsrmMatrixClientParams::default(),
        };

        Self::new(params)
    }
}

impl TravelMatrixClient {
    pub fn new(params: OsrmMatrixClientParams) -> Self {
        Self {
            osrm_client: OsrmMatrixClient::new(params),
        }
    }

    pub async fn fetch_matrix<P>(
        &self,
        points: &[P],
        provider: &TravelMatrixProvider,
    ) -> Result<TravelMatrices, TravelMatrixError>
    where
        for<'a> &'a P: Into<geo_types::Point>,
    {
        if points.is_empty() {
            return Err(TravelMatrixError::EmptyInput);
        }

        debug!("Fetching travel matrix for {} points", points.len());

        match provider {
            TravelMatrixProvider::Osrm { profile } => {
                self.osrm_client.fetch_matrix(points, profile).await
            }
            TravelMatrixProvider::AsTheCrowFlies { speed_kmh } => {
                Ok(as_the_crow_flies_matrices(points, *speed_kmh))
            }
            TravelMatrixProvider::Custom { matrices } => Ok(matrices.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestPoint;

    #[tokio::test]
    async fn test_fetch_custom_matrix() {
        let client = TravelMatrixClient::new(OsrmMatrixClientParams::default());
        let matrices = TravelMatrices::from_rows(
            vec![vec![Some(0.0), Some(3.0)], vec![Some(4.0), Some(0.0)]],
            vec![vec![Some(0.0), Some(3.0)], vec![Some(4.0), Some(0.0)]],
        );
        let points = [
            TestPoint(0.0, 0.0),
            TestPoint(1.0, 1.0),
        ];

        let fetched = client
            .fetch_matrix(
                &points,
                &TravelMatrixProvider::Custom {
                    matrices: matrices.clone(),
                },
            )
            .await
            .unwrap();

        assert_eq!(fetched, matrices);
    }

    #[tokio::test]
    async fn test_fetch_empty_points() {
        let client = TravelMatrixClient::new(OsrmMatrixClientParams::default());
        let points: [TestPoint; 0] = [];

        let result = client
            .fetch_matrix(&points, &TravelMatrixProvider::default())
            .await;

        assert!(matches!(result, Err(TravelMatrixError::EmptyInput)));
    }

    #[test]
    fn test_provider_deserialize() {
        let provider: TravelMatrixProvider =
            serde_json::from_str(r#"{ "type": "osrm" }"#).unwrap();
        assert!(matches!(provider, TravelMatrixProvider::Osrm { profile } if profile == "driving"));

        let provider: TravelMatrixProvider =
            serde_json::from_str(r#"{ "type": "as_the_crow_flies", "speed_kmh": 30.0 }"#).unwrap();
        assert!(matches!(provider, TravelMatrixProvider::AsTheCrowFlies { .. }));
    }
}
