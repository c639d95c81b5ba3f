use super::Algorithm;
use super::base::dijkstra::{Cost, Dijkstra};
use super::base::risk::{risk_cost, risk_of, risk_weights};
use crate::component::{empty_path_set, insert_path, Demand, Solution};
use crate::network::{Link, Topology};
use crate::utils::config::Limits;
use crate::utils::error::Result;


/// One path per pair: the cheapest, or with `risk` the one most likely to
/// survive the demand's failures.
pub struct SPF {
    risk: bool,
}

impl SPF {
    pub fn new(risk: bool) -> Self {
        SPF { risk }
    }
}

impl Algorithm for SPF {
    fn solve(&mut self, topology: &Topology, demand: &Demand, _limits: &Limits) -> Result<Solution> {
        if self.risk {
            let weights = risk_weights(topology, &demand.failures);
            let dijkstra = Dijkstra::with_cost(|link: &Link| risk_cost(risk_of(&weights, link)));
            Ok(route_all(dijkstra, topology, demand))
        } else {
            Ok(route_all(Dijkstra::<Cost>::new(), topology, demand))
        }
    }
}

fn route_all<F: Fn(&Link) -> f64>(mut dijkstra: Dijkstra<F>, topology: &Topology, demand: &Demand) -> Solution {
    let mut chosen = empty_path_set(&demand.pairs);
    let mut feasible = true;
    for pair in demand.pairs.iter().filter(|p| !p.is_degenerate()) {
        let route = topology.node_index(pair.src.id())
            .zip(topology.node_index(pair.dst.id()))
            .and_then(|(src, dst)| {
                dijkstra.compute_once(topology, src);
                dijkstra.shortest_path(topology, src, dst)
            });
        match route {
            Some(edges) => insert_path(&mut chosen, pair, topology.path_of(&edges)),
            None => feasible = false,
        }
    }
    Solution::new(chosen, feasible)
}
