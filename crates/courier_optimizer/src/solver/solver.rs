use std::sync::Arc;

use crate::{
    error::OptimizerError,
    problem::vehicle_routing_problem::VehicleRoutingProblem,
    solver::{
        search::GuidedLocalSearch, solution::routing_solution::RoutingSolution,
        solver_params::SolverParams,
    },
};

pub struct Solver {
    search: GuidedLocalSearch,
}

impl Solver {
    pub fn new(problem: VehicleRoutingProblem, params: SolverParams) -> Self {
        Self::from_shared(Arc::new(problem), params)
    }

    pub fn from_shared(problem: Arc<VehicleRoutingProblem>, params: SolverParams) -> Self {
        Solver {
            search: GuidedLocalSearch::new(params, problem),
        }
    }

    /// Called with every new best solution, starting with the construction.
    pub fn on_best_solution<F>(&mut self, callback: F)
    where
        F: FnMut(&RoutingSolution) + Send + 'static,
    {
        self.search.on_best_solution(callback);
    }

    /// Runs the search until a termination is reached. Blocks the calling
    /// thread, use `spawn_blocking` from async code.
    pub fn solve(&mut self) -> Result<RoutingSolution, OptimizerError> {
        self.search.run()
    }
}
