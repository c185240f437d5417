pub mod error;
pub mod planner;
pub mod problem;
pub mod solver;
mod utils;

#[cfg(test)]
pub(crate) mod test_utils;
