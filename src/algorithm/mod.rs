pub mod base;
mod combined;
mod ksp;
mod spf;
mod algorithm;

pub use algorithm::{sort_pairs_by_cost, Algorithm, AlgorithmEnum};
pub use combined::{Allocation, Combined};
pub use ksp::KSP;
pub use spf::SPF;
