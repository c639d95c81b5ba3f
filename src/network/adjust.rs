//! Derived copies of a topology. Every function returns a new `Topology`
//! and leaves its input untouched.

use hashbrown::HashSet;
use super::{Link, Node, Topology, MAX_WEIGHT};


const INCOMING: &str = "-incoming";
const OUTGOING: &str = "-outgoing";
const INTERNAL: &str = "-internal";
const REVERSED: &str = "-reversed";

pub fn incoming_of(node: &Node) -> Node {
    Node::new(format!("{}{}", node.id(), INCOMING))
}
pub fn outgoing_of(node: &Node) -> Node {
    Node::new(format!("{}{}", node.id(), OUTGOING))
}
/// Id of the zero-weight link joining the halves of a split node.
pub fn internal_link_id(node: &Node) -> String {
    format!("{}{}", node.id(), INTERNAL)
}

fn rebuild<N, L>(nodes: N, links: L) -> Topology
where
    N: IntoIterator<Item = Node>,
    L: IntoIterator<Item = Link>,
{
    let mut topology = Topology::new();
    for node in nodes {
        topology.push_node(node);
    }
    for link in links {
        topology.push_link(link);
    }
    topology
}

pub fn without_links(topology: &Topology, ids: &HashSet<String>) -> Topology {
    rebuild(
        topology.nodes().cloned(),
        topology.links().filter(|l| !ids.contains(&l.id)).cloned(),
    )
}

/// Gives the links, and their reverse directions, the sentinel weight. Link
/// ids and multiplicities stay as they are.
pub fn with_max_weight(topology: &Topology, ids: &HashSet<String>) -> Topology {
    let mut targets = ids.clone();
    for id in ids {
        if let Some(reverse) = topology.link_by_id(id).and_then(Link::reverse_id) {
            targets.insert(reverse);
        }
    }
    let links = topology.links().map(|link| {
        let mut link = link.clone();
        if targets.contains(&link.id) {
            link.weight = MAX_WEIGHT;
        }
        link
    });
    rebuild(topology.nodes().cloned(), links)
}

/// Keeps only the listed nodes and the links between them.
pub fn with_nodes_kept(topology: &Topology, keep: &HashSet<String>) -> Topology {
    rebuild(
        topology.nodes().filter(|n| keep.contains(n.id())).cloned(),
        topology.links()
            .filter(|l| keep.contains(l.origin.id()) && keep.contains(l.target.id()))
            .cloned(),
    )
}

/// Replaces `node` by `<id>-incoming` and `<id>-outgoing` joined by a
/// zero-weight `<id>-internal` link: links entering the node now end at the
/// incoming half and links leaving it start from the outgoing half, so a
/// node failure becomes a single cuttable link.
pub fn with_node_split(topology: &Topology, node: &Node) -> Topology {
    if !topology.contains_node(node.id()) {
        return topology.clone();
    }
    let (incoming, outgoing) = (incoming_of(node), outgoing_of(node));
    let nodes = topology.nodes()
        .flat_map(|n| if n == node {
            vec![incoming.clone(), outgoing.clone()]
        } else {
            vec![n.clone()]
        })
        .collect::<Vec<_>>();
    let internal = Link::new(internal_link_id(node), incoming.clone(), outgoing.clone(), 0);
    let links = topology.links()
        .map(|link| {
            let mut link = link.clone();
            if &link.origin == node {
                link.origin = outgoing.clone();
            }
            if &link.target == node {
                link.target = incoming.clone();
            }
            link
        })
        .chain(std::iter::once(internal))
        .collect::<Vec<_>>();
    rebuild(nodes, links)
}

/// Drops every link between the endpoints of `link`, in both directions,
/// and adds the reversed link with negated weight. Returns the new topology
/// with the reversed link.
pub fn with_reversed_link(topology: &Topology, link: &Link) -> (Topology, Link) {
    let reversed = Link::new(
        format!("{}{}", link.id, REVERSED),
        link.target.clone(),
        link.origin.clone(),
        -link.weight,
    );
    let links = topology.links()
        .filter(|l| !l.connects(&link.origin, &link.target))
        .cloned()
        .chain(std::iter::once(reversed.clone()))
        .collect::<Vec<_>>();
    (rebuild(topology.nodes().cloned(), links), reversed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::tests::ring;

    fn ids(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn it_removes_links_without_touching_input() {
        let topology = ring();
        let derived = without_links(&topology, &ids(&["A-B"]));
        assert_eq!(derived.link_count(), topology.link_count() - 1);
        assert!(derived.link_by_id("A-B").is_none());
        assert!(topology.link_by_id("A-B").is_some());
        let same = without_links(&topology, &HashSet::new());
        assert_eq!(same.link_count(), topology.link_count());
    }
    #[test]
    fn it_maxes_both_directions() {
        let derived = with_max_weight(&ring(), &ids(&["A-B"]));
        assert_eq!(derived.link_by_id("A-B").unwrap().weight, MAX_WEIGHT);
        assert_eq!(derived.link_by_id("B-A").unwrap().weight, MAX_WEIGHT);
        assert_eq!(derived.link_by_id("B-C").unwrap().weight, 1);
        assert_eq!(derived.link_count(), ring().link_count());
    }
    #[test]
    fn it_keeps_subset_of_nodes() {
        let derived = with_nodes_kept(&ring(), &ids(&["B", "C", "D"]));
        assert_eq!(derived.node_count(), 3);
        assert!(derived.links().all(|l| l.origin.id() != "A" && l.target.id() != "A"));
        assert_eq!(derived.link_count(), 4);
    }
    #[test]
    fn it_splits_node_into_halves() {
        let derived = with_node_split(&ring(), &Node::new("B"));
        assert_eq!(derived.node_count(), 5);
        assert!(!derived.contains_node("B"));
        let internal = derived.link_by_id("B-internal").unwrap();
        assert_eq!(internal.origin.id(), "B-incoming");
        assert_eq!(internal.target.id(), "B-outgoing");
        assert_eq!(internal.weight, 0);
        let ab = derived.link_by_id("A-B").unwrap();
        assert_eq!(ab.target.id(), "B-incoming");
        let bc = derived.link_by_id("B-C").unwrap();
        assert_eq!(bc.origin.id(), "B-outgoing");
        let untouched = with_node_split(&ring(), &Node::new("Z"));
        assert_eq!(untouched.node_count(), 4);
    }
    #[test]
    fn it_reverses_link_with_negated_weight() {
        let topology = ring();
        let link = topology.link_by_id("A-B").unwrap().clone();
        let (derived, reversed) = with_reversed_link(&topology, &link);
        assert_eq!(reversed.origin.id(), "B");
        assert_eq!(reversed.target.id(), "A");
        assert_eq!(reversed.weight, -1);
        assert!(derived.link_by_id("A-B").is_none());
        assert!(derived.link_by_id("B-A").is_none());
        assert!(derived.link_by_id(&reversed.id).is_some());
        assert_eq!(derived.link_count(), topology.link_count() - 1);
    }
}
