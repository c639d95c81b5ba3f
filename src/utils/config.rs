use serde::Deserialize;
use argh::FromArgs;

/// Survivable path computation for connection demands under failures
#[derive(FromArgs)]
pub struct Arguments {
    #[argh(positional)]
    pub network: String,
    #[argh(positional)]
    pub demand: String,
    /// path to configuration file
    #[argh(option, short='c', default="String::from(\"data/config/default.yaml\")")]
    pub config: String,
    /// override algorithm used to choose paths (combined, yens or spf)
    #[argh(option, short='a')]
    pub algorithm: Option<String>,
    /// override the largest number of simultaneous failures accepted
    #[argh(option, short='f')]
    pub failures: Option<usize>,
    /// override random seed for shuffling failure groups
    #[argh(option, short='s')]
    pub seed: Option<u64>,
    /// write the solution as JSON to this file
    #[argh(option, short='j')]
    pub json: Option<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub name: String,
    pub algorithm: String,
    #[serde(default)]
    pub risk: bool,
    pub seed: u64,
    #[serde(default)]
    pub limits: Limits,
}

/// Caps on the combinatorial parts of a solve.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Limits {
    pub max_failure_set: usize,
    pub max_failures_allowed: usize,
    pub max_failure_groups: usize,
    pub max_iterations: usize,
    pub max_k: usize,
}

const FAILURES_CEILING: usize = 16;

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_failure_set: 64,
            max_failures_allowed: 4,
            max_failure_groups: 100_000,
            max_iterations: 10_000,
            max_k: crate::MAX_K,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            name: String::from("default"),
            algorithm: String::from("combined"),
            risk: false,
            seed: 420,
            limits: Limits::default(),
        }
    }
}

impl Config {
    pub fn override_from_args(&mut self, args: &Arguments) {
        if let Some(algorithm) = &args.algorithm {
            self.algorithm = algorithm.clone();
        }
        if let Some(failures) = args.failures {
            self.limits.max_failures_allowed = num::clamp(failures, 0, FAILURES_CEILING);
        }
        if let Some(seed) = args.seed {
            self.seed = seed;
        }
    }
}
