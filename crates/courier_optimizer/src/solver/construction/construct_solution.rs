use std::sync::Arc;

use fixedbitset::FixedBitSet;
use tracing::{debug, instrument};

use crate::{
    error::OptimizerError,
    problem::{
        cost_matrix::Cost, location::NodeIdx, vehicle_routing_problem::VehicleRoutingProblem,
    },
    solver::solution::{route_id::RouteIdx, working_solution::WorkingSolution},
};

/// Builds the initial solution by nearest-fragment extension.
///
/// Every step looks at all (route with spare capacity, unvisited stop) pairs
/// and appends the stop closest to the current end of its route. Ties go to
/// the lowest stop index, then to the lowest route index, which keeps the
/// construction deterministic.
#[instrument(skip_all, level = "debug")]
pub fn construct_solution(
    problem: &Arc<VehicleRoutingProblem>,
) -> Result<WorkingSolution, OptimizerError> {
    let mut solution = WorkingSolution::new(Arc::clone(problem));
    let mut visited = FixedBitSet::with_capacity(problem.num_nodes());
    let mut remaining = problem.stop_count();

    while remaining > 0 {
        let Some((route_id, node)) = find_nearest_extension(problem, &solution, &visited) else {
            return Err(OptimizerError::NoFeasibleAssignment {
                unassigned: remaining,
            });
        };

        solution.push(route_id, node);
        visited.insert(node.get());
        remaining -= 1;
    }

    debug!(
        objective = solution.objective(),
        "Constructed initial solution"
    );

    Ok(solution)
}

fn find_nearest_extension(
    problem: &VehicleRoutingProblem,
    solution: &WorkingSolution,
    visited: &FixedBitSet,
) -> Option<(RouteIdx, NodeIdx)> {
    let open_routes = solution
        .route_ids()
        .filter(|&route_id| {
            let route = solution.route(route_id);
            route.can_take(problem, 1)
        })
        .map(|route_id| {
            let route = solution.route(route_id);
            let tail = route.previous_node(problem, route.len());
            (route_id, tail)
        })
        .collect::<Vec<_>>();

    let mut best: Option<(Cost, RouteIdx, NodeIdx)> = None;

    for node in problem.stops() {
        if visited.contains(node.get()) {
            continue;
        }

        for &(route_id, tail) in &open_routes {
            let cost = problem.travel_cost(tail, node);
            if best.is_none_or(|(best_cost, _, _)| cost < best_cost) {
                best = Some((cost, route_id, node));
            }
        }
    }

    best.map(|(_, route_id, node)| (route_id, node))
}
