use std::collections::BTreeMap;
use std::fmt;
use hashbrown::HashMap;

use crate::network::{Path, SourceDestPair};


/// Pair -> path id -> path. Ids are `"1"`, `"2"`, ... per pair.
pub type ChosenPathSet = HashMap<SourceDestPair, BTreeMap<String, Path>>;

#[derive(Clone, Debug, Default)]
pub struct Solution {
    pub chosen_paths: ChosenPathSet,
    pub is_feasible: bool,
    pub running_time_seconds: f64,
}

impl Solution {
    pub fn new(chosen_paths: ChosenPathSet, is_feasible: bool) -> Self {
        Solution { chosen_paths, is_feasible, running_time_seconds: 0.0 }
    }
    /// Every pair mapped to no path at all.
    pub fn infeasible(pairs: &[SourceDestPair]) -> Self {
        Solution::new(empty_path_set(pairs), false)
    }
    pub fn paths(&self, pair: &SourceDestPair) -> Vec<&Path> {
        self.chosen_paths.get(pair)
            .map(|paths| sorted_by_id(paths).into_iter().map(|(_, p)| p).collect())
            .unwrap_or_default()
    }
    pub fn count(&self, pair: &SourceDestPair) -> usize {
        self.chosen_paths.get(pair).map_or(0, BTreeMap::len)
    }
    pub fn total_paths(&self) -> usize {
        self.chosen_paths.values().map(BTreeMap::len).sum()
    }
    pub fn pairs(&self) -> Vec<&SourceDestPair> {
        let mut pairs: Vec<_> = self.chosen_paths.keys().collect();
        pairs.sort();
        pairs
    }
}

pub fn empty_path_set(pairs: &[SourceDestPair]) -> ChosenPathSet {
    pairs.iter()
        .map(|pair| (pair.clone(), BTreeMap::new()))
        .collect()
}

/// Appends `path` under the next free id of its pair.
pub fn insert_path(chosen: &mut ChosenPathSet, pair: &SourceDestPair, path: Path) {
    let paths = chosen.entry(pair.clone()).or_default();
    let id = (paths.len() + 1).to_string();
    paths.insert(id, path);
}

/// Path ids in numeric order, so `"10"` comes after `"9"`.
pub fn sorted_by_id(paths: &BTreeMap<String, Path>) -> Vec<(&String, &Path)> {
    let mut sorted: Vec<_> = paths.iter().collect();
    sorted.sort_by(|a, b| (a.0.len(), a.0).cmp(&(b.0.len(), b.0)));
    sorted
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = if self.is_feasible { "feasible" } else { "infeasible" };
        writeln!(f, "the solution is {} with {} paths, found in {:.6} s",
                 outcome, self.total_paths(), self.running_time_seconds)?;
        for pair in self.pairs() {
            writeln!(f, "- pair {}", pair)?;
            for (id, path) in sorted_by_id(&self.chosen_paths[pair]) {
                writeln!(f, "  - path #{} {} with weight {}", id, path, path.total_weight())?;
            }
        }
        Ok(())
    }
}
