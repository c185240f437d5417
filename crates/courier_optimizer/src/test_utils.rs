use std::{collections::HashMap, sync::Arc};

use courier_geocoding::{
    error::GeocodingError,
    geocoder::{GeocodedPoint, Geocoder},
};
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::{
    problem::{
        cost_matrix::{Cost, CostMatrix},
        location::{Location, NodeIdx},
        routing_config::RoutingConfig,
        vehicle::VehicleIdx,
        vehicle_routing_problem::VehicleRoutingProblem,
    },
    solver::solution::{
        route::WorkingSolutionRoute, route_id::RouteIdx, working_solution::WorkingSolution,
    },
};

/// Nodes placed on a line, one unit apart, each unit costing 10.
pub fn line_matrix(num_nodes: usize) -> CostMatrix {
    matrix_from_fn(num_nodes, |from, to| from.abs_diff(to) as f64 * 10.0)
}

pub fn matrix_from_fn<F>(num_nodes: usize, cost: F) -> CostMatrix
where
    F: Fn(usize, usize) -> f64,
{
    let rows = (0..num_nodes)
        .map(|from| (0..num_nodes).map(|to| Some(cost(from, to))).collect())
        .collect();

    CostMatrix::from_rows(rows).unwrap()
}

pub fn matrix_from_rows(rows: &[&[i64]]) -> CostMatrix {
    CostMatrix::from_rows(
        rows.iter()
            .map(|row| row.iter().map(|&cost| Some(cost as f64)).collect())
            .collect(),
    )
    .unwrap()
}

/// Seeded asymmetric matrix with costs in `1..=1000`.
pub fn random_matrix(num_nodes: usize, seed: u64) -> CostMatrix {
    let mut rng = SmallRng::seed_from_u64(seed);
    let costs: Vec<Vec<f64>> = (0..num_nodes)
        .map(|_| {
            (0..num_nodes)
                .map(|_| rng.random_range(1..=1000) as f64)
                .collect()
        })
        .collect();

    matrix_from_fn(num_nodes, |from, to| costs[from][to])
}

/// Grid coordinates, `columns` nodes per row, Euclidean distance times 10.
pub fn grid_matrix(num_nodes: usize, columns: usize) -> CostMatrix {
    matrix_from_fn(num_nodes, |from, to| {
        let (fx, fy) = ((from % columns) as f64, (from / columns) as f64);
        let (tx, ty) = ((to % columns) as f64, (to / columns) as f64);

        ((fx - tx).powi(2) + (fy - ty).powi(2)).sqrt() * 10.0
    })
}

pub fn config(
    vehicle_count: usize,
    open_route: bool,
    balance_capacity: bool,
    span_cost_coefficient: Option<Cost>,
) -> RoutingConfig {
    RoutingConfig {
        vehicle_count,
        open_route,
        balance_capacity,
        balance_span: span_cost_coefficient.is_some(),
        span_cost_coefficient: span_cost_coefficient.unwrap_or(0),
        ..RoutingConfig::default()
    }
}

pub fn create_problem(matrix: CostMatrix, config: RoutingConfig) -> Arc<VehicleRoutingProblem> {
    Arc::new(VehicleRoutingProblem::from_config(matrix, &config).unwrap())
}

/// Line problem without capacity or span dimensions.
pub fn create_line_problem(
    num_nodes: usize,
    vehicle_count: usize,
    open_route: bool,
) -> Arc<VehicleRoutingProblem> {
    create_problem(
        line_matrix(num_nodes),
        config(vehicle_count, open_route, false, None),
    )
}

pub fn create_route(
    problem: &VehicleRoutingProblem,
    vehicle: usize,
    nodes: &[usize],
) -> WorkingSolutionRoute {
    let mut route = WorkingSolutionRoute::empty(problem, VehicleIdx::new(vehicle));
    for &node in nodes {
        route.push(problem, NodeIdx::new(node));
    }
    route
}

pub fn create_solution(
    problem: Arc<VehicleRoutingProblem>,
    routes: &[&[usize]],
) -> WorkingSolution {
    let mut solution = WorkingSolution::new(problem);
    for (route, nodes) in routes.iter().enumerate() {
        for &node in nodes.iter() {
            solution.push(RouteIdx::new(route), NodeIdx::new(node));
        }
    }
    solution
}

pub fn route_nodes(solution: &WorkingSolution) -> Vec<Vec<usize>> {
    solution
        .routes()
        .iter()
        .map(|route| route.nodes().iter().map(|node| node.get()).collect())
        .collect()
}

pub fn labelled_locations(count: usize) -> Vec<Location> {
    (0..count)
        .map(|index| {
            let label = if index == 0 {
                "Depot".to_owned()
            } else {
                format!("Stop {index}")
            };
            Location::new(label, index as f64, 0.0)
        })
        .collect()
}

/// In-memory geocoder keyed on the exact query string.
#[derive(Default)]
pub struct StaticGeocoder {
    points: HashMap<String, (f64, f64)>,
    failing: Vec<String>,
}

impl StaticGeocoder {
    pub fn with_point(mut self, query: &str, lat: f64, lon: f64) -> Self {
        self.points.insert(query.to_owned(), (lat, lon));
        self
    }

    pub fn failing_on(mut self, query: &str) -> Self {
        self.failing.push(query.to_owned());
        self
    }
}

impl Geocoder for StaticGeocoder {
    async fn geocode(&self, query: &str) -> Result<Option<GeocodedPoint>, GeocodingError> {
        if self.failing.iter().any(|failing| failing == query) {
            return Err(GeocodingError::InvalidResponse(format!(
                "simulated failure for {query}"
            )));
        }

        Ok(self.points.get(query).map(|&(lat, lon)| GeocodedPoint {
            lat,
            lon,
            display_name: Some(query.to_owned()),
        }))
    }
}
