pub mod algorithm;
pub mod component;
pub mod controller;
pub mod network;
pub mod utils;

/// Largest `k` accepted by the k-shortest-path strategy.
pub const MAX_K: usize = 20;
