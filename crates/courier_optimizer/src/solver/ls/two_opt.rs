use smallvec::{SmallVec, smallvec};

use crate::{
    problem::{cost_matrix::Cost, location::NodeIdx},
    solver::{
        ls::r#move::{LocalSearchOperator, RouteDeltas},
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
    },
};

/// **Intra-Route 2-Opt**
///
/// Reverses the sequence of stops between `from` and `to` (inclusive).
/// This removes crossing edges within a single route.
///
/// ```text
/// BEFORE:
///    ... (prev) --x--> [from] -> ... -> [to] --x--> (next) ...
///
/// AFTER (Sequence Reversed):
///    ... (prev) -----> [to] -> ... -> [from] -----> (next) ...
///
/// Edges Removed: (prev->from), (to->next)
/// Edges Added:   (prev->to),   (from->next)
/// ```
///
/// On asymmetric matrices every arc inside the segment changes direction too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwoOptOperator {
    params: TwoOptParams,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwoOptParams {
    pub route_id: RouteIdx,
    pub from: usize,
    pub to: usize,
}

impl TwoOptOperator {
    pub fn new(params: TwoOptParams) -> Self {
        debug_assert!(params.from < params.to, "TwoOpt: cannot have from >= to");

        TwoOptOperator { params }
    }
}

impl LocalSearchOperator for TwoOptOperator {
    fn generate_moves<C>(
        solution: &WorkingSolution,
        (r1, r2): (RouteIdx, RouteIdx),
        mut consumer: C,
    ) where
        C: FnMut(Self),
    {
        if r1 != r2 {
            return;
        }

        let len = solution.route(r1).len();

        for from in 0..len.saturating_sub(1) {
            for to in (from + 1)..len {
                consumer(TwoOptOperator::new(TwoOptParams {
                    route_id: r1,
                    from,
                    to,
                }));
            }
        }
    }

    fn route_deltas<F>(&self, solution: &WorkingSolution, arc_cost: F) -> RouteDeltas
    where
        F: Fn(NodeIdx, NodeIdx) -> Cost,
    {
        let problem = solution.problem();
        let route = solution.route(self.params.route_id);
        let TwoOptParams { from, to, .. } = self.params;

        let prev = route.previous_node(problem, from);
        let first = route.node(from);
        let last = route.node(to);
        let next = route.next_node(problem, to);

        let mut delta = arc_cost(prev, last) + arc_cost(first, next)
            - arc_cost(prev, first)
            - arc_cost(last, next);

        if !problem.is_symmetric() {
            for position in from..to {
                let (a, b) = (route.node(position), route.node(position + 1));
                delta += arc_cost(b, a) - arc_cost(a, b);
            }
        }

        smallvec![(self.params.route_id, delta)]
    }

    fn is_valid(&self, _solution: &WorkingSolution) -> bool {
        // Reversing a segment never changes the load of the route
        true
    }

    fn apply(&self, solution: &mut WorkingSolution) {
        solution.reverse(self.params.route_id, self.params.from, self.params.to);
    }

    fn updated_routes(&self) -> SmallVec<[RouteIdx; 2]> {
        smallvec![self.params.route_id]
    }
}
