use smallvec::{SmallVec, smallvec};

use crate::{
    problem::{cost_matrix::Cost, location::NodeIdx},
    solver::{
        ls::r#move::{LocalSearchOperator, RouteDeltas},
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
    },
};

/// **Inter-Route Swap**
///
/// Exchanges the stop at `first` in `first_route_id` with the stop at
/// `second` in `second_route_id`. Loads are traded one for one, so this
/// still moves stops between vehicles that are both full.
///
/// ```text
/// BEFORE:
///    R1: ... (A) -> [first] -> (B) ...
///    R2: ... (X) -> [second] -> (Y) ...
///
/// AFTER:
///    R1: ... (A) -> [second] -> (B) ...
///    R2: ... (X) -> [first] -> (Y) ...
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterSwapOperator {
    params: InterSwapParams,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterSwapParams {
    pub first_route_id: RouteIdx,
    pub second_route_id: RouteIdx,
    pub first: usize,
    pub second: usize,
}

impl InterSwapOperator {
    pub fn new(params: InterSwapParams) -> Self {
        debug_assert!(
            params.first_route_id != params.second_route_id,
            "InterSwapOperator requires two different routes"
        );

        Self { params }
    }
}

impl LocalSearchOperator for InterSwapOperator {
    fn generate_moves<C>(
        solution: &WorkingSolution,
        (r1, r2): (RouteIdx, RouteIdx),
        mut consumer: C,
    ) where
        C: FnMut(Self),
    {
        // A swap is symmetric in its routes, each pair is scanned once
        if r1 >= r2 {
            return;
        }

        let first_len = solution.route(r1).len();
        let second_len = solution.route(r2).len();

        for first in 0..first_len {
            for second in 0..second_len {
                consumer(InterSwapOperator::new(InterSwapParams {
                    first_route_id: r1,
                    second_route_id: r2,
                    first,
                    second,
                }));
            }
        }
    }

    fn route_deltas<F>(&self, solution: &WorkingSolution, arc_cost: F) -> RouteDeltas
    where
        F: Fn(NodeIdx, NodeIdx) -> Cost,
    {
        let problem = solution.problem();
        let r1 = solution.route(self.params.first_route_id);
        let r2 = solution.route(self.params.second_route_id);

        let first = r1.node(self.params.first);
        let a = r1.previous_node(problem, self.params.first);
        let b = r1.next_node(problem, self.params.first);

        let second = r2.node(self.params.second);
        let x = r2.previous_node(problem, self.params.second);
        let y = r2.next_node(problem, self.params.second);

        let first_delta =
            arc_cost(a, second) + arc_cost(second, b) - arc_cost(a, first) - arc_cost(first, b);
        let second_delta =
            arc_cost(x, first) + arc_cost(first, y) - arc_cost(x, second) - arc_cost(second, y);

        smallvec![
            (self.params.first_route_id, first_delta),
            (self.params.second_route_id, second_delta)
        ]
    }

    fn is_valid(&self, solution: &WorkingSolution) -> bool {
        let problem = solution.problem();
        let r1 = solution.route(self.params.first_route_id);
        let r2 = solution.route(self.params.second_route_id);

        let first_demand = problem.demand(r1.node(self.params.first));
        let second_demand = problem.demand(r2.node(self.params.second));

        r1.can_exchange(problem, first_demand, second_demand)
            && r2.can_exchange(problem, second_demand, first_demand)
    }

    fn apply(&self, solution: &mut WorkingSolution) {
        let first = solution
            .route(self.params.first_route_id)
            .node(self.params.first);
        let second = solution.replace(self.params.second_route_id, self.params.second, first);
        solution.replace(self.params.first_route_id, self.params.first, second);
    }

    fn updated_routes(&self) -> SmallVec<[RouteIdx; 2]> {
        smallvec![self.params.first_route_id, self.params.second_route_id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;

    fn inter_swap(first: usize, second: usize) -> InterSwapOperator {
        InterSwapOperator::new(InterSwapParams {
            first_route_id: RouteIdx::new(0),
            second_route_id: RouteIdx::new(1),
            first,
            second,
        })
    }

    #[test]
    fn test_inter_swap_delta_matches_apply() {
        let problem = test_utils::create_problem(
            test_utils::random_matrix(10, 13),
            test_utils::config(2, false, false, None),
        );
        let mut solution =
            test_utils::create_solution(problem, &[&[3, 9, 1, 7, 5], &[2, 8, 4, 6]]);

        for (first, second) in [(0, 0), (4, 3), (2, 1), (4, 0)] {
            let operator = inter_swap(first, second);
            let deltas = operator.route_deltas(&solution, |a, b| {
                solution.problem().travel_cost(a, b)
            });
            let r1_before = solution.route(RouteIdx::new(0)).cost();
            let r2_before = solution.route(RouteIdx::new(1)).cost();

            operator.apply(&mut solution);

            assert_eq!(solution.route(RouteIdx::new(0)).cost(), r1_before + deltas[0].1);
            assert_eq!(solution.route(RouteIdx::new(1)).cost(), r2_before + deltas[1].1);
        }
    }

    #[test]
    fn test_inter_swap_exchanges_stops() {
        let problem = test_utils::create_line_problem(5, 2, true);
        let mut solution = test_utils::create_solution(problem, &[&[1, 4], &[2, 3]]);

        // 0 -> 1 -> 4 (40) and 0 -> 2 -> 3 (30) become 0 -> 1 -> 3 (30) and 0 -> 2 -> 4 (40)
        let operator = inter_swap(1, 1);
        assert_eq!(operator.transport_cost_delta(&solution), 0);

        operator.apply(&mut solution);
        assert_eq!(test_utils::route_nodes(&solution), vec![vec![1, 3], vec![2, 4]]);
    }

    #[test]
    fn test_inter_swap_is_valid_between_full_routes() {
        let problem = test_utils::create_problem(
            test_utils::line_matrix(5),
            test_utils::config(2, true, true, None),
        );
        let solution = test_utils::create_solution(problem, &[&[1, 2], &[3, 4]]);

        assert!(inter_swap(0, 1).is_valid(&solution));
    }

    #[test]
    fn test_inter_swap_scans_each_route_pair_once() {
        let problem = test_utils::create_line_problem(5, 2, true);
        let solution = test_utils::create_solution(problem, &[&[1, 4], &[2, 3]]);

        let mut forward = 0;
        InterSwapOperator::generate_moves(&solution, (RouteIdx::new(0), RouteIdx::new(1)), |_| {
            forward += 1
        });
        let mut backward = 0;
        InterSwapOperator::generate_moves(&solution, (RouteIdx::new(1), RouteIdx::new(0)), |_| {
            backward += 1
        });

        assert_eq!(forward, 4);
        assert_eq!(backward, 0);
    }
}
