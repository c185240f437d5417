use courier_matrix_providers::travel_matrices::TravelMatrices;

use crate::{error::OptimizerError, problem::location::NodeIdx};

pub type Cost = i64;

/// Cost of an arc the distance service could not route. Large enough that
/// the solver never picks it while any alternative exists.
pub const FORBIDDEN_COST: Cost = 1_000_000_000;

/// Square matrix of non-negative integer travel costs, stored flat with
/// `index = from * num_nodes + to`. Node 0 is the depot.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    costs: Vec<Cost>,
    num_nodes: usize,
    is_symmetric: bool,
}

fn normalize_cost(value: Option<f64>) -> Cost {
    match value {
        Some(value) if value.is_finite() && value >= 0.0 => {
            (value.round() as Cost).min(FORBIDDEN_COST)
        }
        _ => FORBIDDEN_COST,
    }
}

fn is_flat_matrix_symmetric(costs: &[Cost], num_nodes: usize) -> bool {
    (0..num_nodes).all(|i| {
        ((i + 1)..num_nodes).all(|j| costs[i * num_nodes + j] == costs[j * num_nodes + i])
    })
}

impl CostMatrix {
    /// Builds the matrix from the raw cells returned by a distance service.
    /// Missing, negative and non-finite cells become [`FORBIDDEN_COST`].
    pub fn from_rows(rows: Vec<Vec<Option<f64>>>) -> Result<Self, OptimizerError> {
        let expected = rows.len();
        if rows.iter().any(|row| row.len() != expected) {
            return Err(OptimizerError::MatrixShape {
                expected,
                rows: rows.len(),
                cells: rows.iter().map(Vec::len).sum(),
            });
        }

        Ok(Self::from_flat_cells(
            rows.into_iter().flatten().collect(),
            expected,
        ))
    }

    /// Builds the matrix for `num_locations` stops from the distance table of
    /// a provider response.
    pub fn from_travel_matrices(
        matrices: &TravelMatrices,
        num_locations: usize,
    ) -> Result<Self, OptimizerError> {
        if matrices.distances.len() != num_locations * num_locations {
            return Err(OptimizerError::MatrixShape {
                expected: num_locations,
                rows: matrices.num_locations().unwrap_or(0),
                cells: matrices.distances.len(),
            });
        }

        Ok(Self::from_flat_cells(
            matrices.distances.clone(),
            num_locations,
        ))
    }

    fn from_flat_cells(cells: Vec<Option<f64>>, num_nodes: usize) -> Self {
        let mut costs: Vec<Cost> = cells.into_iter().map(normalize_cost).collect();
        for i in 0..num_nodes {
            costs[i * num_nodes + i] = 0;
        }

        Self::from_costs(costs, num_nodes)
    }

    pub(crate) fn from_costs(costs: Vec<Cost>, num_nodes: usize) -> Self {
        let is_symmetric = is_flat_matrix_symmetric(&costs, num_nodes);

        Self {
            costs,
            num_nodes,
            is_symmetric,
        }
    }

    #[inline(always)]
    fn index(&self, from: NodeIdx, to: NodeIdx) -> usize {
        from.get() * self.num_nodes + to.get()
    }

    #[inline]
    pub fn cost(&self, from: NodeIdx, to: NodeIdx) -> Cost {
        self.costs[self.index(from, to)]
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    pub fn is_symmetric(&self) -> bool {
        self.is_symmetric
    }

    pub fn row(&self, from: NodeIdx) -> &[Cost] {
        let start = from.get() * self.num_nodes;
        &self.costs[start..start + self.num_nodes]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_coerces_missing_cells() {
        let matrix = CostMatrix::from_rows(vec![
            vec![Some(0.0), Some(10.4), None],
            vec![Some(10.6), Some(3.0), Some(-1.0)],
            vec![Some(f64::NAN), Some(7.0), Some(0.0)],
        ])
        .unwrap();

        assert_eq!(matrix.num_nodes(), 3);
        assert_eq!(matrix.cost(NodeIdx::new(0), NodeIdx::new(1)), 10);
        assert_eq!(matrix.cost(NodeIdx::new(1), NodeIdx::new(0)), 11);
        assert_eq!(matrix.cost(NodeIdx::new(0), NodeIdx::new(2)), FORBIDDEN_COST);
        assert_eq!(matrix.cost(NodeIdx::new(1), NodeIdx::new(2)), FORBIDDEN_COST);
        assert_eq!(matrix.cost(NodeIdx::new(2), NodeIdx::new(0)), FORBIDDEN_COST);
        // The diagonal is always free
        assert_eq!(matrix.cost(NodeIdx::new(1), NodeIdx::new(1)), 0);
    }

    #[test]
    fn test_from_rows_rejects_ragged_rows() {
        let result = CostMatrix::from_rows(vec![
            vec![Some(0.0), Some(1.0)],
            vec![Some(1.0)],
        ]);

        assert_eq!(
            result,
            Err(OptimizerError::MatrixShape {
                expected: 2,
                rows: 2,
                cells: 3
            })
        );
    }

    #[test]
    fn test_from_travel_matrices_checks_location_count() {
        let matrices = TravelMatrices::from_rows(
            vec![vec![Some(0.0), Some(5.0)], vec![Some(5.0), Some(0.0)]],
            vec![],
        );

        assert!(CostMatrix::from_travel_matrices(&matrices, 2).is_ok());
        assert!(matches!(
            CostMatrix::from_travel_matrices(&matrices, 3),
            Err(OptimizerError::MatrixShape {
                expected: 3,
                rows: 2,
                cells: 4
            })
        ));
    }

    #[test]
    fn test_is_symmetric() {
        let symmetric = CostMatrix::from_rows(vec![
            vec![Some(0.0), Some(4.0)],
            vec![Some(4.0), Some(0.0)],
        ])
        .unwrap();
        let asymmetric = CostMatrix::from_rows(vec![
            vec![Some(0.0), Some(4.0)],
            vec![Some(5.0), Some(0.0)],
        ])
        .unwrap();

        assert!(symmetric.is_symmetric());
        assert!(!asymmetric.is_symmetric());
    }

    #[test]
    fn test_empty_matrix() {
        let matrix = CostMatrix::from_rows(vec![]).unwrap();

        assert!(matrix.is_empty());
    }
}
