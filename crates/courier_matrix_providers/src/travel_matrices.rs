use serde::{Deserialize, Serialize};

/// TravelMatrices holds the travel distance and time matrices returned by a provider.
/// Stored as flat row-major vectors, `index = from * num_locations + to`.
///
/// A `None` cell means the provider could not route between the two points.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TravelMatrices {
    pub distances: Vec<Option<f64>>,
    pub times: Vec<Option<f64>>,
}

impl TravelMatrices {
    pub fn from_rows(distances: Vec<Vec<Option<f64>>>, times: Vec<Vec<Option<f64>>>) -> Self {
        Self {
            distances: distances.into_iter().flatten().collect(),
            times: times.into_iter().flatten().collect(),
        }
    }

    /// Side of the square matrix, or `None` when the distances are not a perfect square.
    pub fn num_locations(&self) -> Option<usize> {
        let len = self.distances.len();
        let side = len.isqrt();

        if side * side == len { Some(side) } else { None }
    }

    pub fn distance(&self, from: usize, to: usize) -> Option<f64> {
        let side = self.num_locations()?;
        self.distances.get(from * side + to).copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_is_row_major() {
        let matrices = TravelMatrices::from_rows(
            vec![
                vec![Some(0.0), Some(1.0)],
                vec![Some(2.0), None],
            ],
            vec![vec![Some(0.0), Some(1.0)], vec![Some(2.0), None]],
        );

        assert_eq!(matrices.num_locations(), Some(2));
        assert_eq!(matrices.distance(0, 1), Some(1.0));
        assert_eq!(matrices.distance(1, 0), Some(2.0));
        assert_eq!(matrices.distance(1, 1), None);
    }

    #[test]
    fn test_num_locations_not_square() {
        let matrices = TravelMatrices {
            distances: vec![Some(0.0), Some(1.0), Some(2.0)],
            times: vec![],
        };

        assert_eq!(matrices.num_locations(), None);
        assert_eq!(matrices.distance(0, 0), None);
    }
}
