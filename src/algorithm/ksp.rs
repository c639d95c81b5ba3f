use log::debug;

use super::Algorithm;
use super::base::Yens;
use crate::component::{empty_path_set, insert_path, Demand, Solution};
use crate::network::Topology;
use crate::utils::config::Limits;
use crate::utils::error::{Error, Result};


/// Path diversity without guaranteed disjointness: each pair gets its
/// `max(1, min) + allowed failures` shortest loopless paths.
#[derive(Default)]
pub struct KSP {
    yens: Yens,
}

impl KSP {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Algorithm for KSP {
    fn solve(&mut self, topology: &Topology, demand: &Demand, limits: &Limits) -> Result<Solution> {
        let connections = &demand.connections;
        // cached paths belong to the previous topology
        self.yens = Yens::new();
        let mut chosen = empty_path_set(&demand.pairs);
        let mut feasible = true;
        for pair in demand.pairs.iter() {
            let min = connections.pair_min(pair);
            let k = min.max(1) + demand.num_fails_allowed;
            if k > limits.max_k {
                return Err(Error::budget("k shortest paths", limits.max_k, k as u64));
            }
            self.yens.compute_pair(topology, pair, k);
            let paths = self.yens.k_shortest_paths(pair);
            debug!("pair {} gets {} of {} shortest paths", pair, paths.len(), k);
            if paths.len() < min {
                feasible = false;
            }
            for path in paths.iter().cloned() {
                insert_path(&mut chosen, pair, path);
            }
        }
        Ok(Solution::new(chosen, feasible))
    }
}
