use courier_geocoding::error::GeocodingError;
use courier_matrix_providers::error::TravelMatrixError;
use thiserror::Error;

/// Errors raised while building or solving a routing problem.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptimizerError {
    #[error("cost matrix is not {expected}x{expected}: found {rows} row(s) and {cells} cell(s)")]
    MatrixShape {
        expected: usize,
        rows: usize,
        cells: usize,
    },

    #[error("infeasible configuration: {0}")]
    InfeasibleConfiguration(String),

    #[error(
        "no feasible assignment: {unassigned} stop(s) left with every vehicle at capacity, increase the number of vehicles or their capacity"
    )]
    NoFeasibleAssignment { unassigned: usize },
}

/// Errors raised by the end-to-end route planner.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("depot address could not be resolved: {0}")]
    DepotUnresolved(String),

    #[error("none of the {0} stop address(es) could be resolved")]
    NoResolvedStops(usize),

    #[error("geocoding failed: {0}")]
    Geocoding(#[from] GeocodingError),

    #[error("distance service failed: {0}")]
    DistanceService(#[from] TravelMatrixError),

    #[error(transparent)]
    Optimizer(#[from] OptimizerError),

    #[error("solver task failed: {0}")]
    SolverTask(#[from] tokio::task::JoinError),
}
