use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use courier_optimizer::error::PlanError;
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    /// Geocoding or distance service failure.
    BadGateway(String),
    InternalServerError(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(message)
            | ApiError::BadGateway(message)
            | ApiError::InternalServerError(message) => message,
        }
    }
}

impl From<PlanError> for ApiError {
    fn from(error: PlanError) -> Self {
        match error {
            PlanError::DepotUnresolved(_)
            | PlanError::NoResolvedStops(_)
            | PlanError::Optimizer(_) => ApiError::BadRequest(error.to_string()),
            PlanError::Geocoding(_) | PlanError::DistanceService(_) => {
                ApiError::BadGateway(error.to_string())
            }
            PlanError::SolverTask(_) => ApiError::InternalServerError(error.to_string()),
        }
    }
}

/// Malformed bodies get the same `{"error": ...}` shape as every other failure.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.message() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use courier_optimizer::error::OptimizerError;

    use super::*;

    #[test]
    fn test_plan_errors_are_client_errors() {
        let error = ApiError::from(PlanError::DepotUnresolved("Nowhere 1".to_owned()));
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert!(error.message().contains("Nowhere 1"));

        let error = ApiError::from(PlanError::NoResolvedStops(3));
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);

        let error = ApiError::from(PlanError::Optimizer(
            OptimizerError::InfeasibleConfiguration("no vehicles".to_owned()),
        ));
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::BadGateway("osrm down".to_owned()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
