use hashbrown::HashMap;

use super::heap::{MyMinHeap, Priority};
use crate::network::{EdgeIndex, Link, NodeIndex, Topology};


pub type Cost = fn(&Link) -> f64;

/// Single-source searches from any number of roots, cached per root. The
/// cost function must never be negative; see `bellman_ford` for that.
pub struct Dijkstra<F = Cost> {
    cost: F,
    dist: HashMap<(NodeIndex, NodeIndex), f64>,
    pred: HashMap<(NodeIndex, NodeIndex), EdgeIndex>,
}


pub fn link_weight(link: &Link) -> f64 {
    link.weight as f64
}

/// Least-weight path between two nodes of the topology.
pub fn shortest_path(topology: &Topology, src: NodeIndex, dst: NodeIndex) -> Option<Vec<EdgeIndex>> {
    if src == dst { return None }
    let mut dijkstra = Dijkstra::new();
    dijkstra.compute_once(topology, src);
    dijkstra.shortest_path(topology, src, dst)
}

impl Default for Dijkstra<Cost> {
    fn default() -> Self {
        Dijkstra::with_cost(link_weight as Cost)
    }
}

impl Dijkstra<Cost> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<F: Fn(&Link) -> f64> Dijkstra<F> {
    pub fn with_cost(cost: F) -> Self {
        Dijkstra { cost, dist: HashMap::new(), pred: HashMap::new() }
    }
    /// All-pairs shortest paths.
    pub fn compute(&mut self, topology: &Topology) {
        for root in 0..topology.node_count() {
            self.compute_once(topology, root.into());
        }
    }
    pub fn compute_once(&mut self, topology: &Topology, r: NodeIndex) {
        if self.dist.contains_key(&(r, r)) { return }
        let mut heap = MyMinHeap::new();
        let mut seen = HashMap::new();

        seen.insert(r, 0.0);
        heap.push(r, Priority::new(0.0, r.index()));

        // popped nodes are final
        while let Some((v, rv_dist)) = heap.pop() {
            if self.dist.contains_key(&(r, v)) { continue; }
            let rv_dist = rv_dist.dist();
            self.dist.insert((r, v), rv_dist);
            for e in topology.outgoings(v) {
                let (_, u) = topology.endpoints(e);
                let cost = (self.cost)(topology.link(e));
                debug_assert!(cost >= 0.0, "negative cost in dijkstra");
                let ru_dist = rv_dist + cost;

                if self.dist.contains_key(&(r, u))
                    || ru_dist >= *seen.get(&u).unwrap_or(&f64::INFINITY) { continue; }

                self.pred.insert((r, u), e);
                seen.insert(u, ru_dist);
                let priority = Priority::new(ru_dist, u.index());
                match heap.get(&u) {
                    Some(_) => { heap.change_priority(&u, priority); },
                    None    => { heap.push(u, priority); },
                }
            }
        }
    }
    pub fn distance(&self, src: NodeIndex, dst: NodeIndex) -> Option<f64> {
        self.dist.get(&(src, dst)).cloned()
    }
    /// Links from `src` to `dst`; empty when they are the same node.
    pub fn shortest_path(&self, topology: &Topology, src: NodeIndex, dst: NodeIndex) -> Option<Vec<EdgeIndex>> {
        if !self.dist.contains_key(&(src, dst)) {
            return None;
        }
        let mut path = vec![];
        let mut at = dst;
        while at != src {
            let &edge = self.pred.get(&(src, at))?;
            path.push(edge);
            at = topology.endpoints(edge).0;
        }
        path.reverse();
        Some(path)
    }
}



#[cfg(test)]
mod test {
    use super::*;
    use crate::network::tests::{build, ring};

    fn ids(topology: &Topology, path: Option<Vec<EdgeIndex>>) -> Option<Vec<String>> {
        path.map(|p| p.iter().map(|&e| topology.link(e).id.clone()).collect())
    }

    #[test]
    fn test_dijkstra_case1() {
        let graph = build(&["0", "1", "2"], &[
            ("0", "1", 10), ("1", "2", 20), ("0", "2", 40),
        ]);
        let path = shortest_path(&graph, 0.into(), 2.into());
        assert_eq!(ids(&graph, path), Some(vec!["0-1".to_owned(), "1-2".to_owned()]));
    }
    #[test]
    fn test_dijkstra_case2() {
        let graph = build(&["0", "1", "2", "3", "4", "5"], &[
            ("0", "1", 10), ("1", "2", 20), ("0", "2", 2), ("1", "3", 10),
            ("0", "3", 3), ("3", "4", 3),
        ]);
        let mut dijkstra = Dijkstra::new();
        dijkstra.compute(&graph);
        let path = dijkstra.shortest_path(&graph, 0.into(), 4.into());
        assert_eq!(ids(&graph, path), Some(vec!["0-3".to_owned(), "3-4".to_owned()]));
        assert_eq!(dijkstra.distance(2.into(), 4.into()), Some(8.0));
        assert_eq!(dijkstra.shortest_path(&graph, 3.into(), 3.into()), Some(vec![]));
        assert_eq!(dijkstra.shortest_path(&graph, 0.into(), 5.into()), None);
    }
    #[test]
    fn it_breaks_ties_by_node_order() {
        let graph = ring();
        let path = shortest_path(&graph, 0.into(), 2.into());
        assert_eq!(ids(&graph, path), Some(vec!["A-B".to_owned(), "B-C".to_owned()]));
    }
    #[test]
    fn it_follows_custom_cost() {
        let graph = ring();
        let mut dijkstra = Dijkstra::with_cost(|l: &Link| if l.id == "A-B" { 10.0 } else { 1.0 });
        dijkstra.compute_once(&graph, 0.into());
        let path = dijkstra.shortest_path(&graph, 0.into(), 2.into());
        assert_eq!(ids(&graph, path), Some(vec!["A-D".to_owned(), "D-C".to_owned()]));
    }
}
