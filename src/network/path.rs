use std::fmt;
use std::iter;
use hashbrown::HashSet;
use super::{Link, Node};


/// Ordered chain of links. Two paths are the same path iff their link-id
/// sequences match.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path {
    links: Vec<Link>,
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceDestPair {
    pub src: Node,
    pub dst: Node,
}

impl Path {
    pub fn new(links: Vec<Link>) -> Self {
        debug_assert!(links.windows(2).all(|w| w[0].target == w[1].origin),
                      "links do not chain");
        Path { links }
    }
    pub fn links(&self) -> &[Link] {
        &self.links
    }
    pub fn len(&self) -> usize {
        self.links.len()
    }
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
    pub fn src(&self) -> Option<&Node> {
        self.links.first().map(|l| &l.origin)
    }
    pub fn dst(&self) -> Option<&Node> {
        self.links.last().map(|l| &l.target)
    }
    pub fn nodes(&self) -> Vec<&Node> {
        match self.links.first() {
            None => vec![],
            Some(head) => iter::once(&head.origin)
                .chain(self.links.iter().map(|l| &l.target))
                .collect(),
        }
    }
    pub fn node_ids(&self) -> HashSet<&str> {
        self.nodes().into_iter().map(Node::id).collect()
    }
    pub fn link_ids(&self) -> HashSet<&str> {
        self.links.iter().map(|l| l.id.as_str()).collect()
    }
    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes().iter().any(|n| n.id() == id)
    }
    pub fn contains_link(&self, id: &str) -> bool {
        self.links.iter().any(|l| l.id == id)
    }
    pub fn total_weight(&self) -> i64 {
        self.links.iter().map(|l| l.weight).sum()
    }
    /// Link ids joined in order; used to order and deduplicate paths.
    pub fn signature(&self) -> String {
        self.links.iter()
            .map(|l| l.id.as_str())
            .collect::<Vec<_>>()
            .join("|")
    }
    pub fn is_loopless(&self) -> bool {
        let nodes = self.nodes();
        let distinct: HashSet<&str> = nodes.iter().map(|n| n.id()).collect();
        distinct.len() == nodes.len() && self.link_ids().len() == self.links.len()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nodes: Vec<&str> = self.nodes().into_iter().map(Node::id).collect();
        write!(f, "{}", nodes.join("-"))
    }
}

impl SourceDestPair {
    pub fn new(src: Node, dst: Node) -> Self {
        SourceDestPair { src, dst }
    }
    pub fn is_degenerate(&self) -> bool {
        self.src == self.dst
    }
}

impl From<(&str, &str)> for SourceDestPair {
    fn from((src, dst): (&str, &str)) -> Self {
        SourceDestPair::new(Node::new(src), Node::new(dst))
    }
}

impl fmt::Display for SourceDestPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.src, self.dst)
    }
}
