use serde::Serialize;

use crate::problem::{cost_matrix::Cost, location::Location};

/// Depot and stops that the geocoder resolved, depot first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedStops {
    pub locations: Vec<Location>,
    /// Addresses the geocoder could not place, in input order
    pub unresolved: Vec<String>,
}

impl ResolvedStops {
    pub fn depot(&self) -> Option<&Location> {
        self.locations.first()
    }

    pub fn stop_count(&self) -> usize {
        self.locations.len().saturating_sub(1)
    }
}

/// Ordered stop addresses per vehicle, ready to be shown or serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub depot: String,
    /// `routes[k]` lists the stops of vehicle `k`, depot excluded
    pub routes: Vec<Vec<String>>,
    pub unresolved: Vec<String>,
    pub total_cost: Cost,
    pub feasible: bool,
}

impl RoutePlan {
    /// Routes with the depot prepended, the way drivers read them.
    pub fn routes_from_depot(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        self.routes.iter().map(|route| {
            std::iter::once(self.depot.as_str())
                .chain(route.iter().map(String::as_str))
                .collect()
        })
    }
}
