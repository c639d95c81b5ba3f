use std::fs;

use serde::Deserialize;

use super::config::Config;
use super::error::{Error, Result};
use crate::component::{Connections, Demand};
use crate::network::{Failure, Link, Node, SourceDestPair, Topology};

#[derive(Deserialize)]
struct NetworkYaml {
    nodes: Vec<String>,
    edges: Vec<NetworkEdgeYaml>,
}

#[derive(Deserialize)]
struct NetworkEdgeYaml {
    ends: [String; 2],
    weight: i64,
    #[serde(default)]
    directed: bool,
}

#[derive(Deserialize)]
struct DemandYaml {
    id: String,
    pairs: Vec<[String; 2]>,
    #[serde(default)]
    num_fails_allowed: usize,
    #[serde(default)]
    failures: Vec<FailureYaml>,
    #[serde(default)]
    connections: ConnectionsYaml,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FailureYaml {
    Node { node: String, #[serde(default)] probability: f64 },
    Link { link: String, #[serde(default)] probability: f64 },
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ConnectionsYaml {
    num_connections: usize,
    reach_min_s: usize,
    reach_max_s: Option<usize>,
    reach_min_d: usize,
    reach_max_d: Option<usize>,
    pair_min: Vec<PairCountYaml>,
    pair_max: Vec<PairCountYaml>,
    src_min: Vec<NodeCountYaml>,
    src_max: Vec<NodeCountYaml>,
    dst_min: Vec<NodeCountYaml>,
    dst_max: Vec<NodeCountYaml>,
}

#[derive(Deserialize)]
struct PairCountYaml {
    src: String,
    dst: String,
    count: usize,
}

#[derive(Deserialize)]
struct NodeCountYaml {
    node: String,
    count: usize,
}

pub fn load_network(path: &str) -> Result<Topology> {
    let text = fs::read_to_string(path)?;
    parse_network(&text)
}

pub fn parse_network(text: &str) -> Result<Topology> {
    let yaml: NetworkYaml = serde_yaml::from_str(text)?;
    let mut topology = Topology::build(yaml.nodes.into_iter().map(Node::new), vec![])?;
    for edge in yaml.edges {
        let [origin, target] = edge.ends;
        if edge.directed {
            let link = Link::between(&Node::new(origin), &Node::new(target), edge.weight);
            topology.add_link(link)?;
        } else {
            topology.add_bidirectional(&origin, &target, edge.weight)?;
        }
    }
    Ok(topology)
}

pub fn load_demand(path: &str, topology: &Topology) -> Result<Demand> {
    let text = fs::read_to_string(path)?;
    parse_demand(&text, topology)
}

/// Link failures name a link of `topology` by id.
pub fn parse_demand(text: &str, topology: &Topology) -> Result<Demand> {
    let yaml: DemandYaml = serde_yaml::from_str(text)?;
    let pairs = yaml.pairs.into_iter()
        .map(|[src, dst]| SourceDestPair::new(Node::new(src), Node::new(dst)))
        .collect();
    let failures = yaml.failures.into_iter()
        .map(|failure| match failure {
            FailureYaml::Node { node, probability } => Ok(Failure::node(Node::new(node), probability)),
            FailureYaml::Link { link, probability } => topology.link_by_id(&link)
                .map(|l| Failure::link(l.clone(), probability))
                .ok_or_else(|| Error::MalformedTopology(
                    format!("failure references unknown link `{}`", link))),
        })
        .collect::<Result<Vec<_>>>()?;
    let demand = Demand::new(yaml.id, pairs)
        .with_connections(connections(yaml.connections))
        .with_failures(failures, yaml.num_fails_allowed);
    demand.validate(topology)?;
    Ok(demand)
}

pub fn load_config(path: &str) -> Result<Config> {
    let text = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&text)?)
}

fn connections(yaml: ConnectionsYaml) -> Connections {
    let pairs = |counts: Vec<PairCountYaml>| counts.into_iter()
        .map(|c| (SourceDestPair::new(Node::new(c.src), Node::new(c.dst)), c.count))
        .collect();
    let nodes = |counts: Vec<NodeCountYaml>| counts.into_iter()
        .map(|c| (Node::new(c.node), c.count))
        .collect();
    Connections {
        num_connections: yaml.num_connections,
        reach_min_s: yaml.reach_min_s,
        reach_max_s: yaml.reach_max_s.unwrap_or(usize::MAX),
        reach_min_d: yaml.reach_min_d,
        reach_max_d: yaml.reach_max_d.unwrap_or(usize::MAX),
        pair_min: pairs(yaml.pair_min),
        pair_max: pairs(yaml.pair_max),
        src_min: nodes(yaml.src_min),
        src_max: nodes(yaml.src_max),
        dst_min: nodes(yaml.dst_min),
        dst_max: nodes(yaml.dst_max),
    }
}
