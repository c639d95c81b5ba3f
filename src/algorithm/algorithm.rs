use enum_dispatch::enum_dispatch;
use ordered_float::OrderedFloat;
use super::combined::Combined;
use super::ksp::KSP;
use super::spf::SPF;
use super::base::dijkstra::Dijkstra;
use crate::component::{Demand, Solution};
use crate::network::{SourceDestPair, Topology};
use crate::utils::config::Limits;
use crate::utils::error::Result;


#[enum_dispatch]
pub enum AlgorithmEnum {
    Combined,
    KSP,
    SPF,
}

#[enum_dispatch(AlgorithmEnum)]
pub trait Algorithm {
    /// Chooses paths for every pair of the demand. The caller has already
    /// checked the demand against the topology.
    fn solve(&mut self, topology: &Topology, demand: &Demand, limits: &Limits) -> Result<Solution>;
}

/// Cheapest pairs first by shortest-path weight; unreachable pairs last;
/// ties by source then destination id.
pub fn sort_pairs_by_cost(topology: &Topology, pairs: &[SourceDestPair]) -> Vec<SourceDestPair> {
    let mut dijkstra = Dijkstra::new();
    let mut keyed: Vec<_> = pairs.iter()
        .map(|pair| {
            let cost = topology.node_index(pair.src.id())
                .zip(topology.node_index(pair.dst.id()))
                .and_then(|(src, dst)| {
                    dijkstra.compute_once(topology, src);
                    dijkstra.distance(src, dst)
                })
                .unwrap_or(f64::INFINITY);
            (OrderedFloat(cost), pair.clone())
        })
        .collect();
    keyed.sort();
    keyed.into_iter().map(|(_, pair)| pair).collect()
}
