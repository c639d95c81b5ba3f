pub mod heap;
pub mod dijkstra;
pub mod bellman_ford;
pub mod risk;
pub mod bhandari;
pub mod yens;
pub mod groups;

pub use bhandari::compute_disjoint_paths;
pub use groups::generate_failure_groups;
pub use yens::{compute_k_paths, Yens};
