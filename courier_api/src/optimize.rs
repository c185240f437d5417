use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use courier_optimizer::{planner::route_plan::RoutePlan, problem::routing_config::RoutingConfig};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::{error::ApiError, state::AppState};

/// Either a JSON list or a single string with one address per line.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum AddressList {
    List(Vec<String>),
    Lines(String),
}

impl Default for AddressList {
    fn default() -> Self {
        AddressList::List(Vec::new())
    }
}

impl AddressList {
    pub fn into_addresses(self) -> Vec<String> {
        let addresses = match self {
            AddressList::List(addresses) => addresses,
            AddressList::Lines(text) => text.lines().map(str::to_owned).collect(),
        };

        addresses
            .into_iter()
            .map(|address| address.trim().to_owned())
            .filter(|address| !address.is_empty())
            .collect()
    }
}

#[derive(Deserialize, Debug)]
pub struct OptimizeRequest {
    #[serde(default)]
    pub addresses: AddressList,
    /// Loosely typed so `"3"` is accepted and bad values get a readable error.
    #[serde(default)]
    pub trucks: Value,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct OptimizeResponse {
    /// Each route starts with the depot.
    pub routes: Vec<Vec<String>>,
    pub unresolved: Vec<String>,
}

impl From<RoutePlan> for OptimizeResponse {
    fn from(plan: RoutePlan) -> Self {
        let routes = plan
            .routes_from_depot()
            .map(|route| route.into_iter().map(str::to_owned).collect())
            .collect();

        OptimizeResponse {
            routes,
            unresolved: plan.unresolved,
        }
    }
}

pub fn parse_trucks(value: &Value) -> Result<usize, ApiError> {
    let trucks = match value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    };

    match trucks.and_then(|trucks| usize::try_from(trucks).ok()) {
        Some(trucks) if trucks > 0 => Ok(trucks),
        _ => Err(ApiError::BadRequest(format!(
            "trucks must be a positive integer, got {value}"
        ))),
    }
}

pub async fn optimize_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<OptimizeRequest>, JsonRejection>,
) -> Result<Json<OptimizeResponse>, ApiError> {
    let Json(body) = body?;
    let trucks = parse_trucks(&body.trucks)?;
    let addresses = body.addresses.into_addresses();
    if addresses.is_empty() {
        return Err(ApiError::BadRequest("No addresses given".to_owned()));
    }

    info!(addresses = addresses.len(), trucks, "Optimize request");

    let config = RoutingConfig::with_vehicle_count(trucks);
    let plan = state.planner.plan(&state.depot, &addresses, &config).await?;

    Ok(Json(OptimizeResponse::from(plan)))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_addresses_as_list() {
        let request: OptimizeRequest = serde_json::from_value(json!({
            "addresses": ["Calle A 1", "  ", " Calle B 2 "],
            "trucks": 2
        }))
        .unwrap();

        assert_eq!(
            request.addresses.into_addresses(),
            vec!["Calle A 1", "Calle B 2"]
        );
    }

    #[test]
    fn test_addresses_as_lines() {
        let request: OptimizeRequest = serde_json::from_value(json!({
            "addresses": "Calle A 1\n\n Calle B 2\r\n",
            "trucks": "2"
        }))
        .unwrap();

        assert_eq!(
            request.addresses.into_addresses(),
            vec!["Calle A 1", "Calle B 2"]
        );
        assert_eq!(parse_trucks(&request.trucks).unwrap(), 2);
    }

    #[test]
    fn test_missing_addresses() {
        let request: OptimizeRequest = serde_json::from_value(json!({ "trucks": 1 })).unwrap();

        assert!(request.addresses.into_addresses().is_empty());
    }

    #[test]
    fn test_parse_trucks() {
        assert_eq!(parse_trucks(&json!(3)).unwrap(), 3);
        assert_eq!(parse_trucks(&json!(" 4 ")).unwrap(), 4);

        for invalid in [json!(0), json!(-2), json!(1.5), json!("two"), json!(null)] {
            let error = parse_trucks(&invalid).unwrap_err();
            assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_response_prepends_depot() {
        let plan = RoutePlan {
            depot: "Depot".to_owned(),
            routes: vec![vec!["A".to_owned()], vec![]],
            unresolved: vec!["Lost 1".to_owned()],
            total_cost: 5,
            feasible: true,
        };

        let response = OptimizeResponse::from(plan);

        assert_eq!(
            response.routes,
            vec![vec!["Depot".to_owned(), "A".to_owned()], vec!["Depot".to_owned()]]
        );
        assert_eq!(response.unresolved, vec!["Lost 1"]);
    }
}
