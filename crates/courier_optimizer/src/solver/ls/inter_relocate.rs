use smallvec::{SmallVec, smallvec};

use crate::{
    problem::{cost_matrix::Cost, location::NodeIdx},
    solver::{
        ls::r#move::{LocalSearchOperator, RouteDeltas},
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
    },
};

/// **Inter-Route Relocate**
///
/// Moves the stop at `from` in `from_route_id` to position `to` in `to_route_id`.
/// This is the only neighborhood that moves load between vehicles.
///
/// ```text
/// BEFORE:
///    R1: ... (A) -> [from] -> (B) ...
///    R2: ... (X) -> (Y) ...
///
/// AFTER:
///    R1: ... (A) -> (B) ...
///    R2: ... (X) -> [from] -> (Y) ...
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterRelocateOperator {
    params: InterRelocateParams,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterRelocateParams {
    pub from_route_id: RouteIdx,
    pub to_route_id: RouteIdx,
    pub from: usize,
    pub to: usize,
}

impl InterRelocateOperator {
    pub fn new(params: InterRelocateParams) -> Self {
        debug_assert!(
            params.from_route_id != params.to_route_id,
            "InterRelocateOperator cannot be used for intra-route relocation"
        );

        Self { params }
    }
}

impl LocalSearchOperator for InterRelocateOperator {
    fn generate_moves<C>(
        solution: &WorkingSolution,
        (r1, r2): (RouteIdx, RouteIdx),
        mut consumer: C,
    ) where
        C: FnMut(Self),
    {
        if r1 == r2 {
            return;
        }

        let from_len = solution.route(r1).len();
        let to_len = solution.route(r2).len();

        for from in 0..from_len {
            for to in 0..=to_len {
                consumer(InterRelocateOperator::new(InterRelocateParams {
                    from_route_id: r1,
                    to_route_id: r2,
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
        let r1 = solution.route(self.params.from_route_id);
        let r2 = solution.route(self.params.to_route_id);

        let a = r1.previous_node(problem, self.params.from);
        let node = r1.node(self.params.from);
        let b = r1.next_node(problem, self.params.from);

        let x = r2.previous_node(problem, self.params.to);
        let y = r2.node_or_end(problem, self.params.to);

        let removal = arc_cost(a, b) - arc_cost(a, node) - arc_cost(node, b);
        let insertion = arc_cost(x, node) + arc_cost(node, y) - arc_cost(x, y);

        smallvec![
            (self.params.from_route_id, removal),
            (self.params.to_route_id, insertion)
        ]
    }

    fn is_valid(&self, solution: &WorkingSolution) -> bool {
        let problem = solution.problem();
        let node = solution
            .route(self.params.from_route_id)
            .node(self.params.from);

        solution
            .route(self.params.to_route_id)
            .can_take(problem, problem.demand(node))
    }

    fn apply(&self, solution: &mut WorkingSolution) {
        let node = solution.remove(self.params.from_route_id, self.params.from);
        solution.insert(self.params.to_route_id, self.params.to, node);
    }

    fn updated_routes(&self) -> SmallVec<[RouteIdx; 2]> {
        smallvec![self.params.from_route_id, self.params.to_route_id]
    }
}
