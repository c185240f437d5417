pub mod cost_matrix;
pub mod location;
pub mod open_route;
pub mod routing_config;
pub mod vehicle;
pub mod vehicle_routing_problem;
