use hashbrown::HashSet;
use itertools::Itertools;
use num::integer::gcd;
use rand::seq::SliceRandom;
use rand_chacha::ChaChaRng;

use crate::network::{Element, Failure, FailureGroup};
use crate::utils::config::Limits;
use crate::utils::error::{Error, Result};


/// Keeps one failure per physical link: the first of a forward/reverse pair
/// in input order. Exact duplicates go too.
pub fn filter_reverse_links(failures: &[Failure]) -> Vec<Failure> {
    let mut seen_nodes = HashSet::new();
    let mut seen_links = HashSet::new();
    failures.iter()
        .filter(|failure| match &failure.element {
            Element::Node(node) => seen_nodes.insert(node.id().to_owned()),
            Element::Link(link) => {
                if seen_links.contains(&link.id) {
                    return false;
                }
                seen_links.insert(link.id.clone());
                if let Some(reverse) = link.reverse_id() {
                    seen_links.insert(reverse);
                }
                true
            },
        })
        .cloned()
        .collect()
}

/// Every simultaneous-failure scenario of size `k`. A set no larger than
/// `k` makes a single shuffled group; `k == 0` makes one empty group.
pub fn generate_failure_groups(
    k: usize,
    failures: &[Failure],
    limits: &Limits,
    rng: &mut ChaChaRng,
) -> Result<Vec<FailureGroup>> {
    let mut filtered = filter_reverse_links(failures);
    let n = filtered.len();
    if n > limits.max_failure_set {
        return Err(Error::budget("failure set", limits.max_failure_set, n as u64));
    }
    if k > limits.max_failures_allowed {
        return Err(Error::budget("simultaneous failures", limits.max_failures_allowed, k as u64));
    }
    if k == 0 {
        return Ok(vec![vec![]]);
    }
    if n <= k {
        filtered.shuffle(rng);
        return Ok(vec![filtered]);
    }
    match binomial(n, k) {
        Some(count) if count <= limits.max_failure_groups as u64 => {},
        count => {
            let requested = count.unwrap_or(u64::MAX);
            return Err(Error::budget("failure groups", limits.max_failure_groups, requested));
        },
    }
    Ok(filtered.into_iter().combinations(k).collect())
}

/// `C(n, k)`, or `None` when it overflows.
pub fn binomial(n: usize, k: usize) -> Option<u64> {
    if k > n { return Some(0) }
    let k = k.min(n - k) as u64;
    let n = n as u64;
    let mut result: u64 = 1;
    for i in 1..=k {
        let (mut num, mut den) = (n - k + i, i);
        let g = gcd(result, den);
        result /= g;
        den /= g;
        let g = gcd(num, den);
        num /= g;
        den /= g;
        debug_assert_eq!(den, 1);
        result = result.checked_mul(num)?;
    }
    Some(result)
}
