pub mod route;
pub mod route_id;
pub mod routing_solution;
pub mod working_solution;
