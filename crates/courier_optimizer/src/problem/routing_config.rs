use jiff::SignedDuration;
use serde::{Deserialize, Serialize};

use crate::problem::cost_matrix::Cost;

/// Weight applied to the longest route span. Matches the value used by the
/// OR-Tools vehicle routing samples.
pub const DEFAULT_SPAN_COST_COEFFICIENT: Cost = 100;

pub const DEFAULT_TIME_BUDGET: SignedDuration = SignedDuration::from_secs(10);

/// Per-request routing options.
///
/// Every field has a default so callers can deserialize partial JSON such as
/// `{"vehicle_count": 3, "time_budget": "5s"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    pub vehicle_count: usize,
    /// Vehicles end at their last stop instead of returning to the depot.
    pub open_route: bool,
    /// Limit every vehicle to an even share of the stops.
    pub balance_capacity: bool,
    /// Penalize the longest route to even out route lengths.
    pub balance_span: bool,
    pub time_budget: SignedDuration,
    /// Explicit per-vehicle stop limit replacing the even share.
    pub capacity_override: Option<usize>,
    pub span_cost_coefficient: Cost,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            vehicle_count: 1,
            open_route: true,
            balance_capacity: true,
            balance_span: true,
            time_budget: DEFAULT_TIME_BUDGET,
            capacity_override: None,
            span_cost_coefficient: DEFAULT_SPAN_COST_COEFFICIENT,
        }
    }
}

impl RoutingConfig {
    pub fn with_vehicle_count(vehicle_count: usize) -> Self {
        Self {
            vehicle_count,
            ..Self::default()
        }
    }
}
