use jiff::SignedDuration;

use crate::problem::routing_config::RoutingConfig;

#[derive(Clone, Debug)]
pub struct SolverParams {
    /// The search stops as soon as any termination is reached.
    pub terminations: Vec<Termination>,

    /// Escape local optima with arc penalties. Without it the search stops
    /// at the first local optimum.
    pub guided_search: bool,

    /// Moves without a new best solution before arcs get penalized anyway.
    pub penalize_after_iterations: usize,

    /// Number of penalty rounds before the search gives up.
    pub max_guided_rounds: usize,

    /// Scales the penalty weight relative to the average arc cost of the
    /// first local optimum.
    pub penalty_factor: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Termination {
    Duration(SignedDuration),
    Iterations(usize),
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            terminations: vec![Termination::Duration(SignedDuration::from_secs(10))],
            guided_search: true,
            penalize_after_iterations: 100,
            max_guided_rounds: 1000,
            penalty_factor: 0.1,
        }
    }
}

impl SolverParams {
    pub fn from_config(config: &RoutingConfig) -> Self {
        Self {
            terminations: vec![Termination::Duration(config.time_budget)],
            ..Self::default()
        }
    }
}
