//! Disjoint paths between one pair, after Bhandari: links of the previous
//! path that a failure could take down are reversed with negated weight,
//! the search is repeated, and reversed links that get used cancel their
//! originals. The surviving links are then split back into paths.

use hashbrown::{HashMap, HashSet};
use log::debug;

use super::bellman_ford;
use crate::network::adjust::{internal_link_id, with_node_split, with_reversed_link};
use crate::network::{Element, Failure, Link, Node, Path, Topology};


/// Up to `wanted + extra` paths from `src` to `dst`, as disjoint as the
/// failures allow, sorted by weight. A short result is best effort; an
/// empty one means `dst` cannot be reached at all.
pub fn compute_disjoint_paths(
    topology: &Topology,
    src: &Node,
    dst: &Node,
    wanted: usize,
    extra: usize,
    failures: &[Failure],
) -> Vec<Path> {
    let cap = wanted + extra;
    if cap == 0 || src == dst
        || !topology.contains_node(src.id()) || !topology.contains_node(dst.id()) {
        return vec![];
    }

    let mut working = topology.clone();
    let mut inducing = HashSet::new();
    for failure in failures {
        match &failure.element {
            Element::Node(node) => {
                if node == src || node == dst || !working.contains_node(node.id()) {
                    continue;
                }
                working = with_node_split(&working, node);
                inducing.insert(internal_link_id(node));
            },
            Element::Link(link) => {
                inducing.insert(link.id.clone());
                if let Some(reverse) = link.reverse_id() {
                    inducing.insert(reverse);
                }
            },
        }
    }
    // nothing may fail: plain link-disjoint paths
    let everything = failures.is_empty();

    let first = match search(&working, src, dst) {
        Some(path) => path,
        None => {
            debug!("no path from {} to {}", src, dst);
            return vec![];
        },
    };
    let mut raw = vec![first];
    let mut originals: HashMap<String, Link> = HashMap::new();
    let mut considered = HashSet::new();
    let mut target = wanted.max(1).min(cap);

    loop {
        let mut reversed_any = false;
        let mut fresh = false;
        let last = raw.last().cloned().unwrap_or_default();
        for link in last {
            if originals.contains_key(&link.id) || working.link_by_id(&link.id).is_none() {
                continue;
            }
            if !everything && !inducing.contains(&link.id) {
                continue;
            }
            let (next, reversed) = with_reversed_link(&working, &link);
            working = next;
            reversed_any = true;
            if considered.insert(link.id.clone()) {
                fresh = true;
            }
            originals.insert(reversed.id, link);
        }
        if fresh {
            target = (target + 1).min(cap);
        }
        if !reversed_any || raw.len() >= target { break; }
        match search(&working, src, dst) {
            Some(path) => raw.push(path),
            None => break,
        }
    }

    let combined = collapse(&raw, &originals);
    let combined = without_opposite_pairs(topology.restore(&combined));
    let mut paths = decompose(combined, src, dst);
    paths.sort_by_cached_key(|p| (p.total_weight(), p.signature()));
    paths.dedup_by(|a, b| a.signature() == b.signature());
    paths.truncate(cap);
    if paths.len() < wanted {
        debug!("only {} of {} disjoint paths from {} to {}", paths.len(), wanted, src, dst);
    }
    paths
}

fn search(topology: &Topology, src: &Node, dst: &Node) -> Option<Vec<Link>> {
    let s = topology.node_index(src.id())?;
    let d = topology.node_index(dst.id())?;
    let edges = bellman_ford::shortest_path(topology, s, d)?;
    Some(edges.iter().map(|&e| topology.link(e).clone()).collect())
}

/// Drops every reversed link together with the original it stands for.
fn collapse(raw: &[Vec<Link>], originals: &HashMap<String, Link>) -> Vec<Link> {
    let cancelled: HashSet<&str> = raw.iter()
        .skip(1)
        .flatten()
        .filter_map(|link| originals.get(&link.id))
        .map(|link| link.id.as_str())
        .collect();
    let mut seen = HashSet::new();
    raw.iter()
        .flatten()
        .filter(|link| !originals.contains_key(&link.id) && !cancelled.contains(link.id.as_str()))
        .filter(|link| seen.insert(link.id.clone()))
        .cloned()
        .collect()
}

fn without_opposite_pairs(links: Vec<Link>) -> Vec<Link> {
    let kept: Vec<bool> = {
        let ends: HashSet<(&str, &str)> = links.iter()
            .map(|l| (l.origin.id(), l.target.id()))
            .collect();
        links.iter()
            .map(|l| !ends.contains(&(l.target.id(), l.origin.id())))
            .collect()
    };
    links.into_iter()
        .zip(kept)
        .filter_map(|(link, keep)| if keep { Some(link) } else { None })
        .collect()
}

/// Walks the link set from `src`, always taking the lowest link id first,
/// cutting any cycle the walk closes; every arrival at `dst` is one path.
fn decompose(links: Vec<Link>, src: &Node, dst: &Node) -> Vec<Path> {
    let mut outgoing: HashMap<Node, Vec<Link>> = HashMap::new();
    for link in links {
        outgoing.entry(link.origin.clone()).or_default().push(link);
    }
    for list in outgoing.values_mut() {
        // popped from the back
        list.sort_by(|a, b| b.id.cmp(&a.id));
    }

    let mut paths = vec![];
    while outgoing.get(src).map_or(false, |l| !l.is_empty()) {
        let mut walk: Vec<Link> = vec![];
        let mut at = src.clone();
        while let Some(link) = outgoing.get_mut(&at).and_then(Vec::pop) {
            at = link.target.clone();
            walk.push(link);
            if &at == dst {
                paths.push(Path::new(walk));
                break;
            }
            if let Some(pos) = walk.iter().position(|l| l.origin == at) {
                walk.truncate(pos);
            }
        }
    }
    paths
}
