use std::collections::BTreeSet;
use hashbrown::HashMap;

use crate::network::{Element, Failure, Node, SourceDestPair, Topology};
use crate::utils::error::{Error, Result};


/// Bounds on how many paths may or must be established. Missing entries
/// mean no minimum and no maximum.
#[derive(Clone, Debug)]
pub struct Connections {
    pub num_connections: usize,
    pub reach_min_s: usize,
    pub reach_max_s: usize,
    pub reach_min_d: usize,
    pub reach_max_d: usize,
    pub pair_min: HashMap<SourceDestPair, usize>,
    pub pair_max: HashMap<SourceDestPair, usize>,
    pub src_min: HashMap<Node, usize>,
    pub src_max: HashMap<Node, usize>,
    pub dst_min: HashMap<Node, usize>,
    pub dst_max: HashMap<Node, usize>,
}

/// One request: which pairs to connect, how many paths, and what may fail.
#[derive(Clone, Debug)]
pub struct Demand {
    pub id: String,
    pub pairs: Vec<SourceDestPair>,
    pub connections: Connections,
    pub failures: Vec<Failure>,
    pub num_fails_allowed: usize,
}

impl Default for Connections {
    fn default() -> Self {
        Connections {
            num_connections: 0,
            reach_min_s: 0,
            reach_max_s: usize::MAX,
            reach_min_d: 0,
            reach_max_d: usize::MAX,
            pair_min: HashMap::new(),
            pair_max: HashMap::new(),
            src_min: HashMap::new(),
            src_max: HashMap::new(),
            dst_min: HashMap::new(),
            dst_max: HashMap::new(),
        }
    }
}

impl Connections {
    pub fn pair_min(&self, pair: &SourceDestPair) -> usize {
        self.pair_min.get(pair).cloned().unwrap_or(0)
    }
    pub fn pair_max(&self, pair: &SourceDestPair) -> usize {
        self.pair_max.get(pair).cloned().unwrap_or(usize::MAX)
    }
    pub fn src_min(&self, src: &Node) -> usize {
        self.src_min.get(src).cloned().unwrap_or(0)
    }
    pub fn src_max(&self, src: &Node) -> usize {
        self.src_max.get(src).cloned().unwrap_or(usize::MAX)
    }
    pub fn dst_min(&self, dst: &Node) -> usize {
        self.dst_min.get(dst).cloned().unwrap_or(0)
    }
    pub fn dst_max(&self, dst: &Node) -> usize {
        self.dst_max.get(dst).cloned().unwrap_or(usize::MAX)
    }
    /// Whether anything at all has to be routed.
    pub fn requires_any(&self) -> bool {
        self.num_connections > 0 || self.reach_min_s > 0 || self.reach_min_d > 0
            || self.pair_min.values().any(|&c| c > 0)
            || self.src_min.values().any(|&c| c > 0)
            || self.dst_min.values().any(|&c| c > 0)
    }
}

impl Demand {
    pub fn new<S: Into<String>>(id: S, pairs: Vec<SourceDestPair>) -> Self {
        Demand {
            id: id.into(),
            pairs,
            connections: Connections::default(),
            failures: vec![],
            num_fails_allowed: 0,
        }
    }
    pub fn with_failures(mut self, failures: Vec<Failure>, num_fails_allowed: usize) -> Self {
        self.failures = failures;
        self.num_fails_allowed = num_fails_allowed;
        self
    }
    pub fn with_connections(mut self, connections: Connections) -> Self {
        self.connections = connections;
        self
    }
    pub fn sources(&self) -> BTreeSet<&Node> {
        self.pairs.iter().map(|p| &p.src).collect()
    }
    pub fn destinations(&self) -> BTreeSet<&Node> {
        self.pairs.iter().map(|p| &p.dst).collect()
    }
    /// Every node and link the demand mentions must exist in the topology.
    pub fn validate(&self, topology: &Topology) -> Result<()> {
        for pair in self.pairs.iter() {
            for node in [&pair.src, &pair.dst].iter() {
                if !topology.contains_node(node.id()) {
                    return Err(Error::UnknownNode(node.id().to_owned()));
                }
            }
        }
        for failure in self.failures.iter() {
            match &failure.element {
                Element::Node(node) if !topology.contains_node(node.id()) =>
                    return Err(Error::UnknownNode(node.id().to_owned())),
                Element::Link(link) if topology.link_by_id(&link.id).is_none() =>
                    return Err(Error::MalformedTopology(
                        format!("failure references unknown link `{}`", link.id))),
                _ => {},
            }
        }
        Ok(())
    }
}
