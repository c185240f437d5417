use tracing::trace;

use crate::{
    problem::{cost_matrix::Cost, vehicle_routing_problem::VehicleRoutingProblem},
    solver::{
        ls::{
            arc_penalties::ArcPenalties,
            inter_relocate::InterRelocateOperator,
            inter_swap::InterSwapOperator,
            r#move::{LocalSearchMove, LocalSearchOperator, RouteDeltas},
            relocate::RelocateOperator,
            two_opt::TwoOptOperator,
        },
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
    },
    utils::enumerate_idx::EnumerateIdx,
};

type RoutePair = (RouteIdx, RouteIdx);

/// Moves must lower the augmented objective by at least one unit.
const MAX_DELTA: Cost = 0;

/// Best-improvement scan over the 2-opt and relocate neighborhoods, plus
/// inter-route relocate and swap.
pub struct LocalSearch {
    pairs: Vec<RoutePair>,
}

impl LocalSearch {
    pub fn new(problem: &VehicleRoutingProblem) -> Self {
        let count = problem.vehicles().len();

        let pairs = (0..count)
            .flat_map(|r1| (0..count).map(move |r2| (RouteIdx::new(r1), RouteIdx::new(r2))))
            .collect();

        LocalSearch { pairs }
    }

    /// Finds the admissible move with the largest decrease of
    /// `transit + span_coefficient * max_span + penalties`, if any improves.
    /// Ties keep the first move found, so the scan is deterministic.
    pub fn find_best_move(
        &self,
        solution: &WorkingSolution,
        penalties: &ArcPenalties,
    ) -> Option<(LocalSearchMove, Cost)> {
        let evaluator = MoveEvaluator::new(solution, penalties);

        let mut best_delta = MAX_DELTA;
        let mut best_move: Option<LocalSearchMove> = None;

        for &(r1, r2) in &self.pairs {
            TwoOptOperator::generate_moves(solution, (r1, r2), |op| {
                let delta = evaluator.delta(&op);
                if delta < best_delta && op.is_valid(solution) {
                    best_delta = delta;
                    best_move = Some(LocalSearchMove::TwoOpt(op));
                }
            });

            RelocateOperator::generate_moves(solution, (r1, r2), |op| {
                let delta = evaluator.delta(&op);
                if delta < best_delta && op.is_valid(solution) {
                    best_delta = delta;
                    best_move = Some(LocalSearchMove::Relocate(op));
                }
            });

            InterRelocateOperator::generate_moves(solution, (r1, r2), |op| {
                let delta = evaluator.delta(&op);
                if delta < best_delta && op.is_valid(solution) {
                    best_delta = delta;
                    best_move = Some(LocalSearchMove::InterRelocate(op));
                }
            });

            InterSwapOperator::generate_moves(solution, (r1, r2), |op| {
                let delta = evaluator.delta(&op);
                if delta < best_delta && op.is_valid(solution) {
                    best_delta = delta;
                    best_move = Some(LocalSearchMove::InterSwap(op));
                }
            });
        }

        if let Some(best_move) = &best_move {
            trace!(
                operator = best_move.operator_name(),
                routes = ?best_move.updated_routes(),
                delta = best_delta,
                "Best local search move"
            );
        }

        best_move.map(|best_move| (best_move, best_delta))
    }
}

/// Evaluates moves on the augmented objective of one solution.
struct MoveEvaluator<'a> {
    solution: &'a WorkingSolution,
    penalties: &'a ArcPenalties,
    max_span: Cost,
    span_cost_coefficient: Cost,
}

impl<'a> MoveEvaluator<'a> {
    fn new(solution: &'a WorkingSolution, penalties: &'a ArcPenalties) -> Self {
        Self {
            solution,
            penalties,
            max_span: solution.max_span(),
            span_cost_coefficient: solution.problem().span_cost_coefficient(),
        }
    }

    fn delta<O: LocalSearchOperator>(&self, op: &O) -> Cost {
        let problem = self.solution.problem();
        let transit = op.route_deltas(self.solution, |from, to| problem.travel_cost(from, to));

        let mut delta: Cost = transit.iter().map(|&(_, delta)| delta).sum();

        if self.span_cost_coefficient > 0 {
            delta += self.span_cost_coefficient * (self.max_span_after(&transit) - self.max_span);
        }

        if self.penalties.is_active() {
            delta += op
                .route_deltas(self.solution, |from, to| self.penalties.cost(from, to))
                .iter()
                .map(|&(_, delta)| delta)
                .sum::<Cost>();
        }

        delta
    }

    fn max_span_after(&self, transit: &RouteDeltas) -> Cost {
        self.solution
            .routes()
            .iter()
            .enumerate_idx()
            .map(|(route_id, route): (RouteIdx, _)| {
                let change: Cost = transit
                    .iter()
                    .filter(|&&(updated, _)| updated == route_id)
                    .map(|&(_, delta)| delta)
                    .sum();
                route.cost() + change
            })
            .max()
            .unwrap_or(0)
    }
}
