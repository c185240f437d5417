use crate::problem::{
    cost_matrix::{Cost, CostMatrix},
    location::NodeIdx,
};

/// Appends a sink node that is free to reach from, and leave to, every node.
///
/// Vehicles that end at the sink stop at their last stop instead of paying
/// the trip back to the depot. Costs between the existing nodes are kept.
pub fn with_sink(matrix: &CostMatrix) -> (CostMatrix, NodeIdx) {
    let num_nodes = matrix.num_nodes();
    let size = num_nodes + 1;
    let mut costs: Vec<Cost> = Vec::with_capacity(size * size);

    for from in 0..num_nodes {
        costs.extend_from_slice(matrix.row(NodeIdx::new(from)));
        costs.push(0);
    }
    costs.extend(std::iter::repeat_n(0, size));

    (CostMatrix::from_costs(costs, size), NodeIdx::new(num_nodes))
}
