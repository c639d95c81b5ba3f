use std::collections::BTreeMap;
use hashbrown::{HashMap, HashSet};

use super::dijkstra;
use crate::network::adjust::{with_max_weight, with_nodes_kept};
use crate::network::{Node, Path, SourceDestPair, Topology};


/// k-shortest loopless paths per pair, computed once and cached.
#[derive(Default)]
pub struct Yens {
    paths: HashMap<SourceDestPair, Vec<Path>>,
}

impl Yens {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn compute_pair(&mut self, topology: &Topology, pair: &SourceDestPair, k: usize) {
        if self.paths.contains_key(pair) { return }
        let paths = compute_k_paths(topology, &pair.src, &pair.dst, k);
        self.paths.insert(pair.clone(), paths);
    }
    pub fn kth_shortest_path(&self, pair: &SourceDestPair, k: usize) -> Option<&Path> {
        self.paths.get(pair)
            .and_then(|paths| paths.get(k))
    }
    pub fn count_shortest_paths(&self, pair: &SourceDestPair) -> usize {
        self.paths.get(pair)
            .map(|paths| paths.len())
            .unwrap_or(0)
    }
    pub fn k_shortest_paths(&self, pair: &SourceDestPair) -> &[Path] {
        self.paths.get(pair)
            .map(|paths| paths.as_slice())
            .unwrap_or(&[])
    }
}

/// Up to `k` loopless paths from `src` to `dst` by ascending weight, ties
/// broken by link-id signature. Fewer than `k` means no more exist.
pub fn compute_k_paths(topology: &Topology, src: &Node, dst: &Node, k: usize) -> Vec<Path> {
    if k == 0 || src == dst { return vec![] }
    let (s, d) = match (topology.node_index(src.id()), topology.node_index(dst.id())) {
        (Some(s), Some(d)) => (s, d),
        _ => return vec![],
    };
    let shortest = match dijkstra::shortest_path(topology, s, d) {
        Some(edges) => topology.path_of(&edges),
        None => return vec![],
    };
    let all_nodes: HashSet<String> = topology.nodes().map(|n| n.id().to_owned()).collect();

    let mut list_a = vec![shortest];
    let mut accepted: HashSet<String> = list_a.iter().map(Path::signature).collect();
    let mut heap_b: BTreeMap<(i64, String), Path> = BTreeMap::new();

    while list_a.len() < k {
        let prev = list_a[list_a.len() - 1].clone();
        let prev_nodes: Vec<Node> = prev.nodes().into_iter().cloned().collect();
        for i in 0..prev.len() {
            let spur_node = &prev_nodes[i];
            let root_path = &prev.links()[..i];

            // For example, if search for 4th shortest path with spur-node (2)
            // We should ignore edges (2)───(3), (2)───(5) and node (1)
            //
            // (1)───(2)───(3)───(4)  1st
            //  │     └────(5)───(4)  2nd
            //  └────(7)───(8)───(4)  3rd

            let ignored_links: HashSet<String> = list_a.iter()
                .filter(|path| path.len() > i && &path.links()[..i] == root_path)
                .map(|path| path.links()[i].id.clone())
                .collect();
            let mut kept = all_nodes.clone();
            for node in prev_nodes[..i].iter() {
                kept.remove(node.id());
            }
            let adjusted = with_nodes_kept(&with_max_weight(topology, &ignored_links), &kept);

            let spur_path = adjusted.node_index(spur_node.id())
                .zip(adjusted.node_index(dst.id()))
                .and_then(|(from, to)| dijkstra::shortest_path(&adjusted, from, to));
            let spur_path = match spur_path {
                Some(edges) => adjusted.path_of(&edges),
                None => continue,  // spur-dst exists no more paths
            };
            let mut links = root_path.to_vec();
            links.extend(topology.restore(spur_path.links()));
            let total_path = Path::new(links);
            let signature = total_path.signature();
            if accepted.contains(&signature) || !total_path.is_loopless() { continue; }
            heap_b.insert((total_path.total_weight(), signature), total_path);
        }
        let next = heap_b.keys().next().cloned();
        match next.and_then(|key| heap_b.remove(&key)) {
            Some(path) => {
                accepted.insert(path.signature());
                list_a.push(path);
            },
            None => break,  // src-dst exists no more paths
        }
    }
    list_a
}
