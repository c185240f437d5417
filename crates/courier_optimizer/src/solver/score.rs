use std::{
    fmt,
    iter,
    ops::{Add, Sub},
};

use serde::Serialize;

use crate::problem::cost_matrix::Cost;

/// Hard score counts constraint violations, soft score is the objective.
/// Scores compare hard first, so any feasible score beats an infeasible one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Score {
    pub hard_score: Cost,
    pub soft_score: Cost,
}

impl Score {
    pub const MAX: Score = Score {
        hard_score: Cost::MAX,
        soft_score: Cost::MAX,
    };

    pub const ZERO: Score = Score {
        hard_score: 0,
        soft_score: 0,
    };

    pub fn new(hard_score: Cost, soft_score: Cost) -> Self {
        Score {
            hard_score,
            soft_score,
        }
    }

    pub fn hard(hard_score: Cost) -> Self {
        Score {
            hard_score,
            soft_score: 0,
        }
    }

    pub fn soft(soft_score: Cost) -> Self {
        Score {
            hard_score: 0,
            soft_score,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.hard_score > 0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}hard/{}soft", self.hard_score, self.soft_score)
    }
}

impl iter::Sum for Score {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Score::ZERO, |acc, score| acc + score)
    }
}

impl Add<Score> for Score {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Score {
            hard_score: self.hard_score + other.hard_score,
            soft_score: self.soft_score + other.soft_score,
        }
    }
}

impl Sub<Score> for Score {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Score {
            hard_score: self.hard_score - other.hard_score,
            soft_score: self.soft_score - other.soft_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hard_score_dominates() {
        assert!(Score::new(0, 1_000) < Score::new(1, 0));
        assert!(Score::soft(10) < Score::soft(11));
        assert!(Score::new(1, 5).is_failure());
        assert!(!Score::soft(5).is_failure());
    }

    #[test]
    fn test_arithmetic() {
        let total: Score = [Score::new(1, 2), Score::new(0, 3)].into_iter().sum();

        assert_eq!(total, Score::new(1, 5));
        assert_eq!(total - Score::hard(1), Score::soft(5));
    }
}
