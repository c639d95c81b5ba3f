use hashbrown::HashMap;

use crate::network::{Failure, Link, Topology};


/// Compound failure probability of every link: the chance that its origin,
/// the link itself (either direction) or its target fails.
pub fn risk_weights(topology: &Topology, failures: &[Failure]) -> HashMap<String, f64> {
    let probability: HashMap<&str, f64> = failures.iter()
        .map(|f| (f.id(), f.probability.max(0.0).min(1.0)))
        .collect();
    topology.links()
        .map(|link| {
            let origin = probability.get(link.origin.id()).cloned().unwrap_or(0.0);
            let target = probability.get(link.target.id()).cloned().unwrap_or(0.0);
            let itself = probability.get(link.id.as_str()).cloned()
                .or_else(|| link.reverse_id()
                    .and_then(|id| probability.get(id.as_str()).cloned()))
                .unwrap_or(0.0);
            let survive = (1.0 - origin) * (1.0 - itself) * (1.0 - target);
            (link.id.clone(), 1.0 - survive)
        })
        .collect()
}

/// Additive cost whose minimum maximises the survival probability of a
/// whole path.
pub fn risk_cost(risk: f64) -> f64 {
    const CERTAIN: f64 = 1e9;
    if risk >= 1.0 { CERTAIN } else { -(1.0 - risk).ln() }
}

pub fn risk_of(weights: &HashMap<String, f64>, link: &Link) -> f64 {
    weights.get(&link.id).cloned().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Node;
    use crate::network::tests::ring;

    #[test]
    fn it_compounds_node_and_link_probabilities() {
        let topology = ring();
        let ab = topology.link_by_id("A-B").unwrap().clone();
        let failures = vec![Failure::node(Node::new("B"), 0.5), Failure::link(ab, 0.2)];
        let weights = risk_weights(&topology, &failures);
        assert!((weights["A-B"] - 0.6).abs() < 1e-9);
        assert!((weights["B-A"] - 0.6).abs() < 1e-9);
        assert!((weights["B-C"] - 0.5).abs() < 1e-9);
        assert_eq!(weights["C-D"], 0.0);
    }
    #[test]
    fn it_orders_costs_by_risk() {
        assert_eq!(risk_cost(0.0), 0.0);
        assert!(risk_cost(0.1) < risk_cost(0.5));
        assert!(risk_cost(1.0) > risk_cost(0.99));
    }
}
