pub mod construction;
pub mod ls;
pub mod result_extractor;
pub mod score;
pub mod search;
pub mod solution;
pub mod solver;
pub mod solver_params;
