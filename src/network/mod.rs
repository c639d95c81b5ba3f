mod topology;
mod path;
mod failure;
pub mod adjust;

pub use topology::{EdgeIndex, Link, Node, NodeIndex, Topology, MAX_WEIGHT};
pub use path::{Path, SourceDestPair};
pub use failure::{group_hits, Element, Failure, FailureGroup};

#[cfg(test)]
pub(crate) mod tests {
    use super::{Node, Topology};

    pub fn build(nodes: &[&str], links: &[(&str, &str, i64)]) -> Topology {
        let mut topology = Topology::new();
        for &id in nodes {
            topology.add_node(Node::new(id)).unwrap();
        }
        for &(a, b, weight) in links {
            topology.add_bidirectional(a, b, weight).unwrap();
        }
        topology
    }

    /// A-B-C-D-A with unit weights.
    pub fn ring() -> Topology {
        build(&["A", "B", "C", "D"],
              &[("A", "B", 1), ("B", "C", 1), ("C", "D", 1), ("D", "A", 1)])
    }

    /// 3x3 grid, row-major ids 0..=8, unit weights.
    pub fn grid() -> Topology {
        build(&["0", "1", "2", "3", "4", "5", "6", "7", "8"], &[
            ("0", "1", 1), ("1", "2", 1), ("3", "4", 1), ("4", "5", 1),
            ("6", "7", 1), ("7", "8", 1), ("0", "3", 1), ("3", "6", 1),
            ("1", "4", 1), ("4", "7", 1), ("2", "5", 1), ("5", "8", 1),
        ])
    }
}
