use std::sync::Arc;

use jiff::Timestamp;
use tracing::{debug, info, instrument};

use crate::{
    error::OptimizerError,
    problem::vehicle_routing_problem::VehicleRoutingProblem,
    solver::{
        construction::construct_solution::construct_solution,
        ls::{arc_penalties::ArcPenalties, local_search::LocalSearch},
        solution::{routing_solution::RoutingSolution, working_solution::WorkingSolution},
        solver_params::{SolverParams, Termination},
    },
    timer_debug,
};

type BestSolutionCallback = Box<dyn FnMut(&RoutingSolution) + Send>;

/// Construction followed by a guided local search.
///
/// The current solution always moves to the best improving neighbor on the
/// augmented objective. The best solution on the true objective is kept
/// aside and returned, so the result is never worse than the construction.
pub struct GuidedLocalSearch {
    problem: Arc<VehicleRoutingProblem>,
    params: SolverParams,
    on_best_solution: Option<BestSolutionCallback>,
}

struct SearchState {
    started_at: Timestamp,
    iterations: usize,
    iterations_since_best: usize,
    guided_rounds: usize,
}

impl GuidedLocalSearch {
    pub fn new(params: SolverParams, problem: Arc<VehicleRoutingProblem>) -> Self {
        GuidedLocalSearch {
            problem,
            params,
            on_best_solution: None,
        }
    }

    pub fn on_best_solution<F>(&mut self, callback: F)
    where
        F: FnMut(&RoutingSolution) + Send + 'static,
    {
        self.on_best_solution = Some(Box::new(callback));
    }

    #[instrument(skip_all, level = "debug")]
    pub fn run(&mut self) -> Result<RoutingSolution, OptimizerError> {
        let mut state = SearchState {
            started_at: Timestamp::now(),
            iterations: 0,
            iterations_since_best: 0,
            guided_rounds: 0,
        };

        let mut current = timer_debug!("Construction", construct_solution(&self.problem))?;
        let mut best = current.clone();
        let mut best_score = best.score();
        self.notify_best(&best);

        let local_search = LocalSearch::new(&self.problem);
        let mut penalties =
            ArcPenalties::new(self.problem.is_symmetric(), self.params.penalty_factor);

        while !self.should_terminate(&state) {
            if let Some((best_move, _)) = local_search.find_best_move(&current, &penalties) {
                best_move.apply(&mut current);
                state.iterations += 1;

                let score = current.score();
                if score < best_score {
                    best = current.clone();
                    best_score = score;
                    state.iterations_since_best = 0;
                    penalties.clear();

                    debug!(iteration = state.iterations, score = %score, "New best solution");
                    self.notify_best(&best);
                    continue;
                }

                state.iterations_since_best += 1;
                if !self.params.guided_search
                    || state.iterations_since_best < self.params.penalize_after_iterations
                {
                    continue;
                }
            }

            // Local optimum, or no new best for too long
            if !self.params.guided_search || state.guided_rounds >= self.params.max_guided_rounds
            {
                break;
            }

            state.guided_rounds += 1;
            state.iterations_since_best = 0;

            if penalties.penalize(&current) == 0 {
                break;
            }
        }

        info!(
            iterations = state.iterations,
            guided_rounds = state.guided_rounds,
            elapsed = ?Timestamp::now().duration_since(state.started_at),
            score = %best_score,
            "Search completed"
        );

        Ok(RoutingSolution::from(&best))
    }

    fn should_terminate(&self, state: &SearchState) -> bool {
        self.params
            .terminations
            .iter()
            .any(|termination| match termination {
                Termination::Duration(duration) => {
                    Timestamp::now().duration_since(state.started_at) >= *duration
                }
                Termination::Iterations(iterations) => state.iterations >= *iterations,
            })
    }

    fn notify_best(&mut self, solution: &WorkingSolution) {
        if let Some(callback) = &mut self.on_best_solution {
            callback(&RoutingSolution::from(solution));
        }
    }
}
