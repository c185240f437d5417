use std::sync::Arc;

use fixedbitset::FixedBitSet;

use crate::{
    problem::{
        cost_matrix::Cost, location::NodeIdx, vehicle_routing_problem::VehicleRoutingProblem,
    },
    solver::{
        score::Score,
        solution::{route::WorkingSolutionRoute, route_id::RouteIdx},
    },
    utils::enumerate_idx::EnumerateIdx,
};

/// Mutable solution explored by the search: one route per vehicle.
#[derive(Clone)]
pub struct WorkingSolution {
    problem: Arc<VehicleRoutingProblem>,
    routes: Vec<WorkingSolutionRoute>,
}

impl WorkingSolution {
    pub fn new(problem: Arc<VehicleRoutingProblem>) -> Self {
        let routes = problem
            .vehicles()
            .iter()
            .enumerate_idx()
            .map(|(vehicle_id, _)| WorkingSolutionRoute::empty(&problem, vehicle_id))
            .collect();

        WorkingSolution { problem, routes }
    }

    pub fn problem(&self) -> &VehicleRoutingProblem {
        &self.problem
    }

    pub fn routes(&self) -> &[WorkingSolutionRoute] {
        &self.routes
    }

    pub fn route(&self, route_id: RouteIdx) -> &WorkingSolutionRoute {
        &self.routes[route_id]
    }

    pub fn route_ids(&self) -> impl Iterator<Item = RouteIdx> + use<> {
        (0..self.routes.len()).map(RouteIdx::new)
    }

    pub fn push(&mut self, route_id: RouteIdx, node: NodeIdx) {
        self.routes[route_id].push(&self.problem, node);
    }

    pub fn insert(&mut self, route_id: RouteIdx, position: usize, node: NodeIdx) {
        self.routes[route_id].insert(&self.problem, position, node);
    }

    pub fn remove(&mut self, route_id: RouteIdx, position: usize) -> NodeIdx {
        self.routes[route_id].remove(&self.problem, position)
    }

    pub fn replace(&mut self, route_id: RouteIdx, position: usize, node: NodeIdx) -> NodeIdx {
        self.routes[route_id].replace(&self.problem, position, node)
    }

    pub fn reverse(&mut self, route_id: RouteIdx, from: usize, to: usize) {
        self.routes[route_id].reverse(&self.problem, from, to);
    }

    pub fn total_transport_costs(&self) -> Cost {
        self.routes.iter().map(WorkingSolutionRoute::cost).sum()
    }

    /// Longest route, measured in transit cost.
    pub fn max_span(&self) -> Cost {
        self.routes
            .iter()
            .map(WorkingSolutionRoute::cost)
            .max()
            .unwrap_or(0)
    }

    /// True objective: total transit plus the weighted longest span.
    pub fn objective(&self) -> Cost {
        self.total_transport_costs() + self.problem.span_cost_coefficient() * self.max_span()
    }

    pub fn score(&self) -> Score {
        let capacity_excess: usize = self
            .routes
            .iter()
            .map(|route| route.capacity_excess(&self.problem))
            .sum();
        let coverage_violations = self.coverage_violations();

        Score::new(
            (capacity_excess + coverage_violations) as Cost,
            self.objective(),
        )
    }

    /// Every stop is visited exactly once and every vehicle is within capacity.
    pub fn is_feasible(&self) -> bool {
        !self.score().is_failure()
    }

    /// Missing stops, stops visited more than once and non-stop nodes
    /// placed inside a route.
    fn coverage_violations(&self) -> usize {
        let mut visited = FixedBitSet::with_capacity(self.problem.num_nodes());
        let mut violations = 0;

        for &node in self.routes.iter().flat_map(|route| route.nodes()) {
            if !self.problem.is_stop(node) || visited.put(node.get()) {
                violations += 1;
            }
        }

        violations + self.problem.stop_count() - visited.count_ones(..)
    }

    pub fn is_identical(&self, other: &WorkingSolution) -> bool {
        self.routes == other.routes
    }
}
