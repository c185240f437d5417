use serde::Serialize;

use crate::{
    problem::{cost_matrix::Cost, location::NodeIdx},
    solver::{score::Score, solution::working_solution::WorkingSolution},
};

/// Solver output: the ordered stops of every vehicle, start and end nodes
/// excluded. Empty routes are kept so `routes[k]` belongs to vehicle `k`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutingSolution {
    pub routes: Vec<Vec<NodeIdx>>,
    /// Sum of the transit costs of every route
    pub total_cost: Cost,
    pub max_span: Cost,
    /// `total_cost` plus the weighted longest span
    pub objective: Cost,
    pub feasible: bool,
    #[serde(skip)]
    pub score: Score,
}

impl From<&WorkingSolution> for RoutingSolution {
    fn from(solution: &WorkingSolution) -> Self {
        let score = solution.score();

        RoutingSolution {
            routes: solution
                .routes()
                .iter()
                .map(|route| route.nodes().to_vec())
                .collect(),
            total_cost: solution.total_transport_costs(),
            max_span: solution.max_span(),
            objective: score.soft_score,
            feasible: !score.is_failure(),
            score,
        }
    }
}
