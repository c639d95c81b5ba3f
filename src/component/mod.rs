mod demand;
mod solution;

pub use demand::{Connections, Demand};
pub use solution::{empty_path_set, insert_path, sorted_by_id, ChosenPathSet, Solution};
