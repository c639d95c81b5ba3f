use std::hash::Hash;
use hashbrown::HashMap;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;

use super::Algorithm;
use super::algorithm::sort_pairs_by_cost;
use super::base::{compute_disjoint_paths, generate_failure_groups};
use crate::component::{insert_path, empty_path_set, ChosenPathSet, Connections, Demand, Solution};
use crate::network::{group_hits, FailureGroup, Node, Path, SourceDestPair, Topology};
use crate::utils::config::Limits;
use crate::utils::error::{Error, Result};


/// Survivable allocation: disjoint paths per pair, cheapest pairs first,
/// until the chosen set keeps enough connections under every failure group.
pub struct Combined {
    rng: ChaChaRng,
}

/// Chosen paths with the failure groups that would take each one down.
pub struct Allocation {
    groups: Vec<FailureGroup>,
    overall: Tally,
    per_pair: HashMap<SourceDestPair, Tally>,
    per_src: HashMap<Node, Tally>,
    per_dst: HashMap<Node, Tally>,
    chosen: Vec<(SourceDestPair, Path, Vec<usize>)>,
    connections: Connections,
    required: usize,
    max_iterations: usize,
}

/// Paths counted in one scope, and how many of them each group takes down.
#[derive(Clone, Debug)]
struct Tally {
    total: usize,
    removed: Vec<usize>,
}

impl Combined {
    pub fn new(seed: u64) -> Self {
        Combined { rng: ChaChaRng::seed_from_u64(seed) }
    }
}

impl Algorithm for Combined {
    fn solve(&mut self, topology: &Topology, demand: &Demand, limits: &Limits) -> Result<Solution> {
        let connections = &demand.connections;
        if !is_valid(demand) {
            return Ok(Solution::infeasible(&demand.pairs));
        }
        let nfa = demand.num_fails_allowed;
        let groups = generate_failure_groups(nfa, &demand.failures, limits, &mut self.rng)?;
        let mut allocation = Allocation::new(groups, connections.clone(), limits.max_iterations);

        let mut per_src: HashMap<Node, usize> = HashMap::new();
        let mut per_dst: HashMap<Node, usize> = HashMap::new();
        'pairs: for pair in sort_pairs_by_cost(topology, &demand.pairs) {
            if pair.is_degenerate() { continue; }
            let (src_max, dst_max) = (connections.src_max(&pair.src), connections.dst_max(&pair.dst));
            let src_count = per_src.entry(pair.src.clone()).or_insert(0);
            let dst_count = per_dst.entry(pair.dst.clone()).or_insert(0);
            if *src_count >= src_max || *dst_count >= dst_max {
                debug!("skip pair {}: endpoint already at its maximum", pair);
                continue;
            }
            let wanted = path_cap(connections, &pair);
            let paths = compute_disjoint_paths(topology, &pair.src, &pair.dst,
                                               wanted, nfa, &demand.failures);
            debug!("pair {} gets {} of {} wanted paths", pair, paths.len(), wanted + nfa);
            for path in paths {
                allocation.add(&pair, path)?;
                *src_count += 1;
                *dst_count += 1;
                if allocation.is_sufficient() {
                    break 'pairs;
                }
            }
        }

        if !allocation.is_sufficient() {
            allocation.augment()?;
        }
        if !allocation.is_sufficient() {
            info!("demand {} cannot keep its required connections under {} failures",
                  demand.id, nfa);
            return Ok(Solution::infeasible(&demand.pairs));
        }
        Ok(Solution::new(allocation.into_chosen_paths(&demand.pairs), true))
    }
}

/// Paths to ask for on one pair: as many as the demand needs, but no more
/// than any per-pair or per-endpoint maximum, and never under the pair's
/// minimum.
fn path_cap(connections: &Connections, pair: &SourceDestPair) -> usize {
    let cap = connections.num_connections
        .min(connections.pair_max(pair))
        .min(connections.src_max(&pair.src))
        .min(connections.dst_max(&pair.dst));
    cap.max(connections.pair_min(pair))
}

fn is_valid(demand: &Demand) -> bool {
    let connections = &demand.connections;
    let min_srcs = demand.sources().into_iter()
        .filter(|&src| connections.src_min(src) > 0)
        .count();
    let min_dsts = demand.destinations().into_iter()
        .filter(|&dst| connections.dst_min(dst) > 0)
        .count();
    if min_srcs > connections.reach_max_s {
        warn!("number of sources that require a connection exceeds the maximum that may transmit");
        return false;
    }
    if min_dsts > connections.reach_max_d {
        warn!("number of destinations that require a connection exceeds the maximum that may receive");
        return false;
    }
    if !connections.requires_any() {
        warn!("no minimum connection requirement, there is nothing to route");
        return false;
    }
    true
}

impl Tally {
    fn new(groups: usize) -> Self {
        Tally { total: 0, removed: vec![0; groups] }
    }
    fn count(&mut self, hits: &[usize]) {
        self.total += 1;
        for &g in hits {
            self.removed[g] += 1;
        }
    }
    fn most_removed(&self) -> usize {
        self.removed.iter().cloned().max().unwrap_or(0)
    }
    fn survivors(&self) -> usize {
        self.total - self.most_removed()
    }
}

fn survivors_of<K: Hash + Eq>(tallies: &HashMap<K, Tally>, key: &K) -> usize {
    tallies.get(key).map_or(0, Tally::survivors)
}

fn reached<K>(tallies: &HashMap<K, Tally>) -> usize {
    tallies.values().filter(|t| t.survivors() > 0).count()
}

impl Allocation {
    /// At least one connection is always required overall.
    pub fn new(groups: Vec<FailureGroup>, connections: Connections, max_iterations: usize) -> Self {
        let overall = Tally::new(groups.len());
        let required = connections.num_connections.max(1);
        Allocation {
            groups,
            overall,
            per_pair: HashMap::new(),
            per_src: HashMap::new(),
            per_dst: HashMap::new(),
            chosen: vec![],
            connections,
            required,
            max_iterations,
        }
    }
    pub fn add(&mut self, pair: &SourceDestPair, path: Path) -> Result<()> {
        let hits: Vec<usize> = self.groups.iter()
            .enumerate()
            .filter(|(_, group)| group_hits(group, &path))
            .map(|(g, _)| g)
            .collect();
        self.push(pair.clone(), path, hits)
    }
    fn push(&mut self, pair: SourceDestPair, path: Path, hits: Vec<usize>) -> Result<()> {
        if self.chosen.len() >= self.max_iterations {
            return Err(Error::budget("allocator iterations", self.max_iterations,
                                     self.chosen.len() as u64 + 1));
        }
        let n = self.groups.len();
        self.overall.count(&hits);
        self.per_pair.entry(pair.clone()).or_insert_with(|| Tally::new(n)).count(&hits);
        self.per_src.entry(pair.src.clone()).or_insert_with(|| Tally::new(n)).count(&hits);
        self.per_dst.entry(pair.dst.clone()).or_insert_with(|| Tally::new(n)).count(&hits);
        self.chosen.push((pair, path, hits));
        Ok(())
    }
    pub fn total(&self) -> usize {
        self.overall.total
    }
    pub fn most_removed(&self) -> usize {
        self.overall.most_removed()
    }
    /// Paths that still work under the most damaging failure group.
    pub fn survivors(&self) -> usize {
        self.overall.survivors()
    }
    /// Every bound holds under the most damaging group of its own scope:
    /// the overall count, each pair, source and destination minimum, and
    /// the number of sources and destinations left connected.
    pub fn is_sufficient(&self) -> bool {
        let c = &self.connections;
        self.survivors() >= self.required
            && c.pair_min.iter().all(|(pair, &min)| survivors_of(&self.per_pair, pair) >= min)
            && c.src_min.iter().all(|(src, &min)| survivors_of(&self.per_src, src) >= min)
            && c.dst_min.iter().all(|(dst, &min)| survivors_of(&self.per_dst, dst) >= min)
            && reached(&self.per_src) >= c.reach_min_s
            && reached(&self.per_dst) >= c.reach_min_d
    }
    /// Copies every path taken down by a most damaging group `required - 1`
    /// times; copies share the failure groups of their original.
    pub fn augment(&mut self) -> Result<()> {
        let most = self.most_removed();
        if most == 0 { return Ok(()) }
        let worst: Vec<usize> = (0..self.groups.len())
            .filter(|&g| self.overall.removed[g] == most)
            .collect();
        let targets: Vec<_> = self.chosen.iter()
            .filter(|(_, _, hits)| hits.iter().any(|g| worst.contains(g)))
            .cloned()
            .collect();
        debug!("augmenting {} paths {} times each", targets.len(), self.required - 1);
        for (pair, path, hits) in targets {
            for _ in 1..self.required {
                self.push(pair.clone(), path.clone(), hits.clone())?;
            }
        }
        Ok(())
    }
    pub fn into_chosen_paths(self, pairs: &[SourceDestPair]) -> ChosenPathSet {
        let mut chosen = empty_path_set(pairs);
        for (pair, path, _) in self.chosen {
            insert_path(&mut chosen, &pair, path);
        }
        chosen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{Failure, Link};
    use crate::network::tests::{grid, ring};

    fn link_failures(topology: &Topology) -> Vec<Failure> {
        topology.links()
            .filter(|l| l.origin.id() < l.target.id())
            .map(|l| Failure::link(l.clone(), 0.01))
            .collect()
    }
    fn needing(num_connections: usize) -> Connections {
        Connections { num_connections, ..Connections::default() }
    }
    fn demand(pairs: &[(&str, &str)], num_connections: usize) -> Demand {
        Demand::new("test", pairs.iter().map(|&p| p.into()).collect())
            .with_connections(needing(num_connections))
    }

    #[test]
    fn it_survives_one_link_failure_on_ring() {
        let topology = ring();
        let demand = demand(&[("A", "C")], 1)
            .with_failures(link_failures(&topology), 1);
        let mut algorithm = Combined::new(420);
        let solution = algorithm.solve(&topology, &demand, &Limits::default()).unwrap();
        assert!(solution.is_feasible);
        let pair = SourceDestPair::from(("A", "C"));
        let paths: Vec<String> = solution.paths(&pair).iter().map(|p| p.to_string()).collect();
        assert_eq!(paths, vec!["A-B-C", "A-D-C"]);
    }
    #[test]
    fn it_stops_once_sufficient() {
        let topology = grid();
        let demand = demand(&[("0", "8"), ("0", "2")], 1);
        let mut algorithm = Combined::new(420);
        let solution = algorithm.solve(&topology, &demand, &Limits::default()).unwrap();
        assert!(solution.is_feasible);
        assert_eq!(solution.total_paths(), 1);
        assert_eq!(solution.count(&("0", "2").into()), 1);
        assert_eq!(solution.count(&("0", "8").into()), 0);
    }
    #[test]
    fn it_reports_infeasible_as_empty() {
        // a line cannot survive the loss of its only link
        let topology = crate::network::tests::build(&["A", "B"], &[("A", "B", 1)]);
        let demand = demand(&[("A", "B")], 1)
            .with_failures(link_failures(&topology), 1);
        let solution = Combined::new(420).solve(&topology, &demand, &Limits::default()).unwrap();
        assert!(!solution.is_feasible);
        assert_eq!(solution.chosen_paths.len(), 1);
        assert_eq!(solution.total_paths(), 0);
    }
    #[test]
    fn it_rejects_invalid_demands() {
        let topology = ring();
        let nothing = demand(&[("A", "C")], 0);
        let solution = Combined::new(420).solve(&topology, &nothing, &Limits::default()).unwrap();
        assert!(!solution.is_feasible);

        let mut too_many = demand(&[("A", "C"), ("B", "D")], 1);
        too_many.connections.reach_max_s = 1;
        too_many.connections.src_min.insert(Node::new("A"), 1);
        too_many.connections.src_min.insert(Node::new("B"), 1);
        let solution = Combined::new(420).solve(&topology, &too_many, &Limits::default()).unwrap();
        assert!(!solution.is_feasible);
        assert_eq!(solution.total_paths(), 0);
    }
    #[test]
    fn it_meets_pair_minimum_beyond_global_count() {
        let pair = SourceDestPair::from(("A", "C"));
        let mut demand = demand(&[("A", "C")], 1);
        demand.connections.pair_min.insert(pair.clone(), 2);
        let solution = Combined::new(420).solve(&ring(), &demand, &Limits::default()).unwrap();
        assert!(solution.is_feasible);
        assert_eq!(solution.count(&pair), 2);
    }
    #[test]
    fn it_keeps_routing_until_every_pair_minimum_holds() {
        let mut demand = demand(&[("0", "8"), ("0", "2")], 1);
        demand.connections.pair_min.insert(("0", "8").into(), 1);
        let solution = Combined::new(420).solve(&grid(), &demand, &Limits::default()).unwrap();
        assert!(solution.is_feasible);
        assert_eq!(solution.count(&("0", "2").into()), 1);
        assert_eq!(solution.count(&("0", "8").into()), 1);
    }
    #[test]
    fn it_reaches_enough_sources() {
        let mut demand = demand(&[("0", "2"), ("6", "8"), ("3", "8")], 1);
        demand.connections.reach_min_s = 2;
        demand.connections.src_min.insert(Node::new("3"), 1);
        let solution = Combined::new(420).solve(&grid(), &demand, &Limits::default()).unwrap();
        assert!(solution.is_feasible);
        assert_eq!(solution.count(&("0", "2").into()), 1);
        assert_eq!(solution.count(&("6", "8").into()), 1);
        assert_eq!(solution.count(&("3", "8").into()), 1);
    }
    #[test]
    fn it_is_infeasible_when_a_minimum_cannot_be_met() {
        let topology = crate::network::tests::build(&["A", "B", "C"], &[("A", "B", 1)]);
        let mut demand = demand(&[("A", "B"), ("A", "C")], 1);
        demand.connections.pair_min.insert(("A", "C").into(), 1);
        let solution = Combined::new(420).solve(&topology, &demand, &Limits::default()).unwrap();
        assert!(!solution.is_feasible);
        assert_eq!(solution.total_paths(), 0);
    }
    #[test]
    fn it_measures_minimums_under_worst_group() {
        let topology = ring();
        let ab = topology.link_by_id("A-B").unwrap().clone();
        let pair = SourceDestPair::from(("A", "C"));
        let mut connections = needing(1);
        connections.dst_min.insert(Node::new("C"), 1);
        let mut allocation = Allocation::new(vec![vec![Failure::link(ab, 0.1)]], connections, 100);
        let paths = crate::algorithm::base::compute_k_paths(&topology, &pair.src, &pair.dst, 2);
        let mut paths = paths.into_iter();
        allocation.add(&pair, paths.next().unwrap()).unwrap();
        // A-B-C alone is lost with A-B
        assert!(!allocation.is_sufficient());
        allocation.add(&pair, paths.next().unwrap()).unwrap();
        assert!(allocation.is_sufficient());
    }
    #[test]
    fn it_bounds_failure_enumeration() {
        let topology = grid();
        let demand = demand(&[("0", "8")], 1)
            .with_failures(link_failures(&topology), 3);
        let limits = Limits { max_failure_groups: 10, ..Limits::default() };
        let result = Combined::new(420).solve(&topology, &demand, &limits);
        assert!(matches!(result, Err(Error::ResourceBudgetExceeded { .. })));
    }
    #[test]
    fn it_never_loses_survivors_when_adding() {
        let topology = grid();
        let failures = link_failures(&topology);
        let limits = Limits::default();
        let mut rng = ChaChaRng::seed_from_u64(7);
        let groups = generate_failure_groups(2, &failures, &limits, &mut rng).unwrap();
        let mut allocation = Allocation::new(groups, needing(3), limits.max_iterations);
        let pair = SourceDestPair::from(("0", "8"));
        let paths = crate::algorithm::base::compute_k_paths(&topology, &pair.src, &pair.dst, 10);
        let mut last = allocation.survivors();
        for path in paths {
            allocation.add(&pair, path).unwrap();
            assert!(allocation.survivors() >= last);
            last = allocation.survivors();
        }
        assert_eq!(allocation.total(), 10);
    }
    #[test]
    fn it_duplicates_paths_of_worst_groups() {
        let (a, b, c) = (Node::new("A"), Node::new("B"), Node::new("C"));
        let (ab, bc) = (Link::between(&a, &b, 1), Link::between(&b, &c, 1));
        let ac = Link::between(&a, &c, 1);
        let groups = vec![vec![Failure::link(ab.clone(), 0.1)], vec![Failure::link(ac.clone(), 0.1)]];
        let mut allocation = Allocation::new(groups, needing(2), 100);
        allocation.add(&("A", "C").into(), Path::new(vec![ab, bc])).unwrap();
        allocation.add(&("A", "C").into(), Path::new(vec![ac])).unwrap();
        assert!(!allocation.is_sufficient());
        allocation.augment().unwrap();
        assert_eq!(allocation.total(), 4);
        assert!(allocation.is_sufficient());
        let chosen = allocation.into_chosen_paths(&[("A", "C").into()]);
        assert_eq!(chosen[&SourceDestPair::from(("A", "C"))].len(), 4);
    }
    #[test]
    fn it_enforces_iteration_budget() {
        let mut allocation = Allocation::new(vec![vec![]], needing(1), 1);
        let path = Path::new(vec![Link::between(&Node::new("A"), &Node::new("B"), 1)]);
        allocation.add(&("A", "B").into(), path.clone()).unwrap();
        assert!(matches!(allocation.add(&("A", "B").into(), path),
                         Err(Error::ResourceBudgetExceeded { .. })));
    }
}
