pub mod arc_penalties;
pub mod inter_relocate;
pub mod inter_swap;
pub mod local_search;
pub mod r#move;
pub mod relocate;
pub mod two_opt;
