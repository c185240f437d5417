use fxhash::FxHashMap;
use tracing::debug;

use crate::{
    problem::{cost_matrix::Cost, location::NodeIdx},
    solver::solution::working_solution::WorkingSolution,
};

type ArcKey = (NodeIdx, NodeIdx);

/// Arc penalties of the guided local search.
///
/// At every local optimum the arcs with the highest utility
/// `usage * cost / (1 + penalty)` receive one more penalty. The search then
/// minimizes `objective + lambda * sum(penalties of used arcs)`, which pushes
/// it away from expensive arcs it keeps coming back to.
#[derive(Debug, Clone)]
pub struct ArcPenalties {
    penalties: FxHashMap<ArcKey, u32>,
    /// Number of local optima each arc appeared in
    usage: FxHashMap<ArcKey, u32>,
    lambda: Cost,
    penalty_factor: f64,
    symmetric: bool,
}

impl ArcPenalties {
    /// On symmetric matrices an arc and its reverse share one penalty.
    pub fn new(symmetric: bool, penalty_factor: f64) -> Self {
        Self {
            penalties: FxHashMap::default(),
            usage: FxHashMap::default(),
            lambda: 0,
            penalty_factor,
            symmetric,
        }
    }

    #[inline]
    fn key(&self, from: NodeIdx, to: NodeIdx) -> ArcKey {
        if self.symmetric && to < from {
            (to, from)
        } else {
            (from, to)
        }
    }

    pub fn is_active(&self) -> bool {
        self.lambda > 0 && !self.penalties.is_empty()
    }

    pub fn lambda(&self) -> Cost {
        self.lambda
    }

    pub fn penalty(&self, from: NodeIdx, to: NodeIdx) -> u32 {
        self.penalties
            .get(&self.key(from, to))
            .copied()
            .unwrap_or(0)
    }

    /// Weighted penalty added to the objective when travelling `from -> to`.
    #[inline]
    pub fn cost(&self, from: NodeIdx, to: NodeIdx) -> Cost {
        match self.penalties.get(&self.key(from, to)) {
            Some(&penalty) => self.lambda * Cost::from(penalty),
            None => 0,
        }
    }

    /// Sum of the weighted penalties of every arc used by the solution.
    pub fn total_cost(&self, solution: &WorkingSolution) -> Cost {
        let problem = solution.problem();
        solution
            .routes()
            .iter()
            .flat_map(|route| route.arcs(problem))
            .map(|(from, to)| self.cost(from, to))
            .sum()
    }

    /// Penalizes the arcs of `solution` with the highest utility and returns
    /// how many arcs were penalized. Zero-cost arcs are never penalized.
    pub fn penalize(&mut self, solution: &WorkingSolution) -> usize {
        let problem = solution.problem();
        let arcs = solution
            .routes()
            .iter()
            .flat_map(|route| route.arcs(problem))
            .filter(|&(from, to)| from != to)
            .map(|(from, to)| (self.key(from, to), problem.travel_cost(from, to)))
            .collect::<Vec<_>>();

        if arcs.is_empty() {
            return 0;
        }

        for &(key, _) in &arcs {
            *self.usage.entry(key).or_insert(0) += 1;
        }

        if self.lambda == 0 {
            let average_arc_cost = solution.total_transport_costs() as f64 / arcs.len() as f64;
            self.lambda = ((self.penalty_factor * average_arc_cost).round() as Cost).max(1);
        }

        // Utilities are compared as fractions to avoid float ties
        let utility = |key: &ArcKey, cost: Cost| -> (i128, i128) {
            let usage = i128::from(self.usage.get(key).copied().unwrap_or(0));
            let penalty = i128::from(self.penalties.get(key).copied().unwrap_or(0));
            (usage * i128::from(cost), 1 + penalty)
        };

        let mut best: Option<(i128, i128)> = None;
        let mut selected: Vec<ArcKey> = Vec::new();

        for &(key, cost) in &arcs {
            let (numerator, denominator) = utility(&key, cost);
            if numerator == 0 {
                continue;
            }

            match best {
                Some((best_num, best_den)) if numerator * best_den < best_num * denominator => {}
                Some((best_num, best_den)) if numerator * best_den == best_num * denominator => {
                    if !selected.contains(&key) {
                        selected.push(key);
                    }
                }
                _ => {
                    best = Some((numerator, denominator));
                    selected.clear();
                    selected.push(key);
                }
            }
        }

        for key in &selected {
            *self.penalties.entry(*key).or_insert(0) += 1;
        }

        debug!(
            penalized = selected.len(),
            lambda = self.lambda,
            "Penalized arcs of local optimum"
        );

        selected.len()
    }

    /// Forgets the penalties, but keeps the usage counts and `lambda`.
    pub fn clear(&mut self) {
        self.penalties.clear();
    }
}
