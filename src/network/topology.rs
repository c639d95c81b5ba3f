use std::fmt;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use crate::utils::error::{Error, Result};
use super::Path;


/// Weight given to links that stay in the graph but must never be preferred.
pub const MAX_WEIGHT: i64 = 1 << 40;

#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct NodeIndex(usize);

impl NodeIndex {
    fn new(ix: usize) -> Self {
        NodeIndex(ix)
    }
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for NodeIndex {
    fn from(ix: usize) -> Self {
        NodeIndex::new(ix)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct EdgeIndex(usize);

impl EdgeIndex {
    fn new(ix: usize) -> Self {
        EdgeIndex(ix)
    }
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for EdgeIndex {
    fn from(ix: usize) -> Self {
        EdgeIndex::new(ix)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Node {
    id: String,
}

/// A directed edge. Equality and hashing only look at the id.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Link {
    pub id: String,
    pub origin: Node,
    pub target: Node,
    pub weight: i64,
    #[serde(default)]
    pub reverse: Option<String>,
}

impl Node {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Node { id: id.into() }
    }
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl From<&str> for Node {
    fn from(id: &str) -> Self {
        Node::new(id)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

impl Link {
    pub fn new<S: Into<String>>(id: S, origin: Node, target: Node, weight: i64) -> Self {
        Link { id: id.into(), origin, target, weight, reverse: None }
    }
    /// Link named after its endpoints, e.g. `A-B`.
    pub fn between(origin: &Node, target: &Node, weight: i64) -> Self {
        let id = format!("{}-{}", origin.id(), target.id());
        Link::new(id, origin.clone(), target.clone(), weight)
    }
    pub fn with_reverse<S: Into<String>>(mut self, reverse: S) -> Self {
        self.reverse = Some(reverse.into());
        self
    }
    /// Id of the opposite direction of the same physical link: the explicit
    /// reverse id when present, otherwise the first two `-` separated parts
    /// of the id swapped (`A-B` -> `B-A`, `A-B-2` -> `B-A-2`).
    pub fn reverse_id(&self) -> Option<String> {
        if let Some(reverse) = &self.reverse {
            return Some(reverse.clone());
        }
        let parts: Vec<&str> = self.id.split('-').collect();
        if parts.len() < 2 {
            return None;
        }
        let mut swapped = vec![parts[1], parts[0]];
        swapped.extend_from_slice(&parts[2..]);
        Some(swapped.join("-"))
    }
    pub fn connects(&self, a: &Node, b: &Node) -> bool {
        (&self.origin == a && &self.target == b) || (&self.origin == b && &self.target == a)
    }
}

impl PartialEq for Link {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Link {}

impl std::hash::Hash for Link {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Weighted directed multigraph. Algorithms never mutate a caller's
/// topology; they work on copies produced by `network::adjust`.
#[derive(Clone, Debug, Default)]
pub struct Topology {
    nodes: Vec<Node>,
    links: Vec<Link>,
    ends: Vec<(NodeIndex, NodeIndex)>,
    outgoing: Vec<Vec<EdgeIndex>>,
    node_ids: HashMap<String, NodeIndex>,
    link_ids: HashMap<String, EdgeIndex>,
}

impl Topology {
    pub fn new() -> Self {
        Self { ..Default::default() }
    }
    pub fn build<N, L>(nodes: N, links: L) -> Result<Self>
    where
        N: IntoIterator<Item = Node>,
        L: IntoIterator<Item = Link>,
    {
        let mut topology = Topology::new();
        for node in nodes {
            topology.add_node(node)?;
        }
        for link in links {
            topology.add_link(link)?;
        }
        Ok(topology)
    }
    pub fn add_node(&mut self, node: Node) -> Result<NodeIndex> {
        if self.node_ids.contains_key(node.id()) {
            return Err(Error::MalformedTopology(format!("duplicated node `{}`", node)));
        }
        Ok(self.push_node(node))
    }
    pub fn add_link(&mut self, link: Link) -> Result<EdgeIndex> {
        if self.link_ids.contains_key(&link.id) {
            return Err(Error::MalformedTopology(format!("duplicated link `{}`", link.id)));
        }
        for end in [&link.origin, &link.target].iter() {
            if !self.node_ids.contains_key(end.id()) {
                return Err(Error::MalformedTopology(
                    format!("link `{}` references unknown node `{}`", link.id, end)));
            }
        }
        Ok(self.push_link(link))
    }
    /// Adds `a-b` and `b-a`, each naming the other as its reverse.
    pub fn add_bidirectional(&mut self, a: &str, b: &str, weight: i64) -> Result<()> {
        let (a, b) = (Node::new(a), Node::new(b));
        let forward = Link::between(&a, &b, weight);
        let backward = Link::between(&b, &a, weight);
        let forward_id = forward.id.clone();
        let backward_id = backward.id.clone();
        self.add_link(forward.with_reverse(backward_id))?;
        self.add_link(backward.with_reverse(forward_id))?;
        Ok(())
    }
    pub(crate) fn push_node(&mut self, node: Node) -> NodeIndex {
        debug_assert!(!self.node_ids.contains_key(node.id()));
        let ix = NodeIndex::new(self.nodes.len());
        self.node_ids.insert(node.id().to_owned(), ix);
        self.nodes.push(node);
        self.outgoing.push(vec![]);
        ix
    }
    pub(crate) fn push_link(&mut self, link: Link) -> EdgeIndex {
        debug_assert!(!self.link_ids.contains_key(&link.id));
        let origin = self.node_ids[link.origin.id()];
        let target = self.node_ids[link.target.id()];
        let ix = EdgeIndex::new(self.links.len());
        self.link_ids.insert(link.id.clone(), ix);
        self.outgoing[origin.index()].push(ix);
        self.ends.push((origin, target));
        self.links.push(link);
        ix
    }
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
    pub fn link_count(&self) -> usize {
        self.links.len()
    }
    pub fn nodes(&self) -> impl Iterator<Item=&Node> + '_ {
        self.nodes.iter()
    }
    pub fn links(&self) -> impl Iterator<Item=&Link> + '_ {
        self.links.iter()
    }
    pub fn node(&self, node: NodeIndex) -> &Node {
        debug_assert!(node.index() < self.nodes.len());
        &self.nodes[node.index()]
    }
    pub fn link(&self, edge: EdgeIndex) -> &Link {
        debug_assert!(edge.index() < self.links.len());
        &self.links[edge.index()]
    }
    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_ids.get(id).cloned()
    }
    pub fn link_index(&self, id: &str) -> Option<EdgeIndex> {
        self.link_ids.get(id).cloned()
    }
    pub fn link_by_id(&self, id: &str) -> Option<&Link> {
        self.link_index(id).map(|ix| self.link(ix))
    }
    pub fn contains_node(&self, id: &str) -> bool {
        self.node_ids.contains_key(id)
    }
    pub fn endpoints(&self, edge: EdgeIndex) -> (NodeIndex, NodeIndex) {
        debug_assert!(edge.index() < self.ends.len());
        self.ends[edge.index()]
    }
    pub fn outgoings(&self, node: NodeIndex)
        -> impl Iterator<Item=EdgeIndex> + '_ {
        debug_assert!(node.index() < self.outgoing.len());
        self.outgoing[node.index()].iter().cloned()
    }
    pub fn neighbors(&self, node: NodeIndex)
        -> impl Iterator<Item=NodeIndex> + '_ {
        self.outgoings(node)
            .map(move |e| self.ends[e.index()].1)
    }
    pub fn edges(&self) -> impl Iterator<Item=EdgeIndex> {
        (0..self.links.len()).map(EdgeIndex::new)
    }
    pub fn path_of(&self, edges: &[EdgeIndex]) -> Path {
        Path::new(edges.iter().map(|&e| self.link(e).clone()).collect())
    }
    /// Re-expresses links of a derived topology with this topology's links,
    /// dropping those it does not know (internal or reversed links).
    pub fn restore(&self, links: &[Link]) -> Vec<Link> {
        links.iter()
            .filter_map(|link| self.link_by_id(&link.id))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn it_lookups_edge_ends() {
        let mut topology = Topology::new();
        for id in ["0", "1", "2"].iter() {
            topology.add_node(Node::new(*id)).unwrap();
        }
        topology.add_bidirectional("0", "1", 10).unwrap();
        topology.add_bidirectional("1", "2", 20).unwrap();
        assert_eq!(topology.endpoints(0.into()), (0.into(), 1.into()));
        assert_eq!(topology.endpoints(1.into()), (1.into(), 0.into()));
        assert_eq!(topology.endpoints(2.into()), (1.into(), 2.into()));
        assert_eq!(topology.endpoints(3.into()), (2.into(), 1.into()));
        let neighbors: Vec<_> = topology.neighbors(1.into()).collect();
        assert_eq!(neighbors, vec![0.into(), 2.into()]);
    }
    #[test]
    fn it_rejects_dangling_links() {
        let mut topology = Topology::new();
        topology.add_node(Node::new("A")).unwrap();
        let link = Link::between(&Node::new("A"), &Node::new("Z"), 1);
        assert!(matches!(topology.add_link(link), Err(Error::MalformedTopology(_))));
        assert!(matches!(topology.add_node(Node::new("A")), Err(Error::MalformedTopology(_))));
    }
    #[test]
    fn it_swaps_link_ids_for_reverse() {
        let (a, b) = (Node::new("A"), Node::new("B"));
        assert_eq!(Link::between(&a, &b, 1).reverse_id(), Some("B-A".to_owned()));
        let numbered = Link::new("A-B-2", a.clone(), b.clone(), 1);
        assert_eq!(numbered.reverse_id(), Some("B-A-2".to_owned()));
        let explicit = Link::new("ab", a.clone(), b.clone(), 1).with_reverse("ba");
        assert_eq!(explicit.reverse_id(), Some("ba".to_owned()));
        assert_eq!(Link::new("ab", a, b, 1).reverse_id(), None);
    }
    #[test]
    fn it_compares_links_by_id() {
        let (a, b) = (Node::new("A"), Node::new("B"));
        let light = Link::new("x", a.clone(), b.clone(), 1);
        let heavy = Link::new("x", b, a, 9);
        assert_eq!(light, heavy);
    }
}
