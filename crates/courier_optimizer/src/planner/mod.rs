pub mod route_plan;
pub mod route_planner;
