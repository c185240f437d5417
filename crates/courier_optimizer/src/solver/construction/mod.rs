pub mod construct_solution;
