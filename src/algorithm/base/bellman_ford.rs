use log::warn;

use crate::network::{EdgeIndex, NodeIndex, Topology};


/// Least-weight path allowing negative link weights. Returns `None` when
/// `dst` is unreachable or a negative cycle is reachable from `src`.
pub fn shortest_path(topology: &Topology, src: NodeIndex, dst: NodeIndex) -> Option<Vec<EdgeIndex>> {
    if src == dst { return None }
    let n = topology.node_count();
    let mut dist: Vec<Option<i64>> = vec![None; n];
    let mut pred: Vec<Option<EdgeIndex>> = vec![None; n];
    dist[src.index()] = Some(0);

    for _ in 1..n.max(2) {
        if !relax(topology, &mut dist, &mut pred) { break; }
    }
    if relax(topology, &mut dist, &mut pred) {
        warn!("negative cycle reachable from {}, no path to {}",
              topology.node(src), topology.node(dst));
        return None;
    }
    dist[dst.index()]?;

    let mut path = vec![];
    let mut at = dst;
    while at != src {
        let edge = pred[at.index()]?;
        path.push(edge);
        at = topology.endpoints(edge).0;
        // a predecessor chain longer than the node count has a loop
        if path.len() > n { return None }
    }
    path.reverse();
    Some(path)
}

/// One pass over every link; whether any distance improved.
fn relax(topology: &Topology, dist: &mut [Option<i64>], pred: &mut [Option<EdgeIndex>]) -> bool {
    let mut changed = false;
    for e in topology.edges() {
        let (v, u) = topology.endpoints(e);
        let dv = match dist[v.index()] {
            Some(dv) => dv,
            None => continue,
        };
        let du = dv.saturating_add(topology.link(e).weight);
        if dist[u.index()].map_or(true, |old| du < old) {
            dist[u.index()] = Some(du);
            pred[u.index()] = Some(e);
            changed = true;
        }
    }
    changed
}
