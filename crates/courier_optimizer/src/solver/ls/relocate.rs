use smallvec::{SmallVec, smallvec};

use crate::{
    problem::{cost_matrix::Cost, location::NodeIdx},
    solver::{
        ls::r#move::{LocalSearchOperator, RouteDeltas},
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
    },
};

/// **Intra-Route Relocate**
///
/// Moves the stop at `from` so it is visited right before the stop currently
/// at `to` (or last when `to == len`).
///
/// ```text
/// BEFORE:
///    Route: ... (A) -> [from] -> (C) ... (X) -> (Y) ...
///
/// AFTER:
///    Route: ... (A) -> (C) ... (X) -> [from] -> (Y) ...
///                                      ^
///                               Inserted here
///
/// Edges Modified: (A->from), (from->C), (X->Y)
/// Edges Created:  (A->C),    (X->from), (from->Y)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocateOperator {
    params: RelocateOperatorParams,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocateOperatorParams {
    pub route_id: RouteIdx,
    pub from: usize,
    pub to: usize,
}

impl RelocateOperator {
    pub fn new(params: RelocateOperatorParams) -> Self {
        debug_assert!(
            params.from != params.to && params.from + 1 != params.to,
            "RelocateOperator 'from' and 'to' positions must move the stop"
        );

        Self { params }
    }
}

impl LocalSearchOperator for RelocateOperator {
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
        if len < 2 {
            return;
        }

        for from in 0..len {
            for to in 0..=len {
                if to == from || to == from + 1 {
                    continue;
                }

                consumer(RelocateOperator::new(RelocateOperatorParams {
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
        let RelocateOperatorParams { from, to, .. } = self.params;

        let a = route.previous_node(problem, from);
        let node = route.node(from);
        let c = route.next_node(problem, from);

        let x = route.previous_node(problem, to);
        let y = route.node_or_end(problem, to);

        let removal = arc_cost(a, c) - arc_cost(a, node) - arc_cost(node, c);
        let insertion = arc_cost(x, node) + arc_cost(node, y) - arc_cost(x, y);

        smallvec![(self.params.route_id, removal + insertion)]
    }

    fn is_valid(&self, _solution: &WorkingSolution) -> bool {
        true
    }

    fn apply(&self, solution: &mut WorkingSolution) {
        let RelocateOperatorParams { route_id, from, to } = self.params;

        let node = solution.remove(route_id, from);
        let position = if to > from { to - 1 } else { to };
        solution.insert(route_id, position, node);
    }

    fn updated_routes(&self) -> SmallVec<[RouteIdx; 2]> {
        smallvec![self.params.route_id]
    }
}
