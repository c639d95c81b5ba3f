use serde::{Deserialize, Serialize};
use super::{Link, Node, Path};


#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Node(Node),
    Link(Link),
}

/// One element that may fail, with the probability that it does.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Failure {
    pub element: Element,
    pub probability: f64,
}

/// Failures that happen together in one scenario.
pub type FailureGroup = Vec<Failure>;

impl Failure {
    pub fn node(node: Node, probability: f64) -> Self {
        Failure { element: Element::Node(node), probability }
    }
    pub fn link(link: Link, probability: f64) -> Self {
        Failure { element: Element::Link(link), probability }
    }
    pub fn id(&self) -> &str {
        match &self.element {
            Element::Node(node) => node.id(),
            Element::Link(link) => &link.id,
        }
    }
    /// Whether this failure breaks the path. A link failure takes down both
    /// directions of the physical link.
    pub fn hits(&self, path: &Path) -> bool {
        match &self.element {
            Element::Node(node) => path.contains_node(node.id()),
            Element::Link(link) => path.contains_link(&link.id)
                || link.reverse_id().map_or(false, |id| path.contains_link(&id)),
        }
    }
}

impl PartialEq for Failure {
    fn eq(&self, other: &Self) -> bool {
        self.element == other.element
    }
}

impl Eq for Failure {}

impl std::hash::Hash for Failure {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.element.hash(state);
    }
}

pub fn group_hits(group: &[Failure], path: &Path) -> bool {
    group.iter().any(|failure| failure.hits(path))
}
