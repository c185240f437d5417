use smallvec::SmallVec;

use crate::{
    problem::{cost_matrix::Cost, location::NodeIdx},
    solver::{
        ls::{
            inter_relocate::InterRelocateOperator, inter_swap::InterSwapOperator,
            relocate::RelocateOperator, two_opt::TwoOptOperator,
        },
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
    },
};

/// Cost change of every route touched by a move.
pub type RouteDeltas = SmallVec<[(RouteIdx, Cost); 2]>;

pub trait LocalSearchOperator: Sized {
    /// Calls `consumer` with every move of this neighborhood between the two routes.
    fn generate_moves<C>(solution: &WorkingSolution, routes: (RouteIdx, RouteIdx), consumer: C)
    where
        C: FnMut(Self);

    /// Change of each updated route's cost when travelling from `a` to `b`
    /// costs `arc_cost(a, b)`. Evaluated with the real travel costs for the
    /// objective and with the arc penalties for the guided search.
    fn route_deltas<F>(&self, solution: &WorkingSolution, arc_cost: F) -> RouteDeltas
    where
        F: Fn(NodeIdx, NodeIdx) -> Cost;

    fn is_valid(&self, solution: &WorkingSolution) -> bool;
    fn apply(&self, solution: &mut WorkingSolution);
    fn updated_routes(&self) -> SmallVec<[RouteIdx; 2]>;

    fn transport_cost_delta(&self, solution: &WorkingSolution) -> Cost {
        let problem = solution.problem();
        self.route_deltas(solution, |from, to| problem.travel_cost(from, to))
            .iter()
            .map(|&(_, delta)| delta)
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalSearchMove {
    /// Reverses a segment of a route.
    TwoOpt(TwoOptOperator),
    /// Moves a stop to another position of the same route.
    Relocate(RelocateOperator),
    /// Moves a stop to another route.
    InterRelocate(InterRelocateOperator),
    /// Exchanges two stops of different routes.
    InterSwap(InterSwapOperator),
}

impl LocalSearchMove {
    pub fn operator_name(&self) -> &'static str {
        match self {
            LocalSearchMove::TwoOpt(_) => "two_opt",
            LocalSearchMove::Relocate(_) => "relocate",
            LocalSearchMove::InterRelocate(_) => "inter_relocate",
            LocalSearchMove::InterSwap(_) => "inter_swap",
        }
    }

    pub fn is_valid(&self, solution: &WorkingSolution) -> bool {
        match self {
            LocalSearchMove::TwoOpt(op) => op.is_valid(solution),
            LocalSearchMove::Relocate(op) => op.is_valid(solution),
            LocalSearchMove::InterRelocate(op) => op.is_valid(solution),
            LocalSearchMove::InterSwap(op) => op.is_valid(solution),
        }
    }

    pub fn apply(&self, solution: &mut WorkingSolution) {
        match self {
            LocalSearchMove::TwoOpt(op) => op.apply(solution),
            LocalSearchMove::Relocate(op) => op.apply(solution),
            LocalSearchMove::InterRelocate(op) => op.apply(solution),
            LocalSearchMove::InterSwap(op) => op.apply(solution),
        }
    }

    pub fn updated_routes(&self) -> SmallVec<[RouteIdx; 2]> {
        match self {
            LocalSearchMove::TwoOpt(op) => op.updated_routes(),
            LocalSearchMove::Relocate(op) => op.updated_routes(),
            LocalSearchMove::InterRelocate(op) => op.updated_routes(),
            LocalSearchMove::InterSwap(op) => op.updated_routes(),
        }
    }
}
