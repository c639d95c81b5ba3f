use std::time::Instant;
use log::info;
use crate::algorithm::{Algorithm, AlgorithmEnum, Combined, KSP, SPF};
use crate::component::{Demand, Solution};
use crate::network::Topology;
use crate::utils::config::Config;
use crate::utils::error::{Error, Result};


/// Owns the configured routing strategy and runs demands through it.
pub struct Controller {
    pub algorithm: AlgorithmEnum,
    pub config: Config,
}


impl Controller {
    pub fn new(config: Config) -> Result<Self> {
        let algorithm: AlgorithmEnum = match config.algorithm.as_str() {
            "combined"     => Combined::new(config.seed).into(),
            "yens" | "ksp" => KSP::new().into(),
            "spf"          => SPF::new(config.risk).into(),
            other          => return Err(Error::UnknownAlgorithm(other.to_owned())),
        };
        Ok(Controller { algorithm, config })
    }
    pub fn solve(&mut self, topology: &Topology, demand: &Demand) -> Result<Solution> {
        demand.validate(topology)?;
        let start = Instant::now();
        let mut solution = self.algorithm.solve(topology, demand, &self.config.limits)?;
        solution.running_time_seconds = start.elapsed().as_secs_f64();
        info!("demand {} solved by {} in {:.6} s: {} with {} paths",
              demand.id, self.config.algorithm, solution.running_time_seconds,
              if solution.is_feasible { "feasible" } else { "infeasible" },
              solution.total_paths());
        Ok(solution)
    }
    /// Demands are independent; the first error aborts the batch.
    pub fn solve_all(&mut self, topology: &Topology, demands: &[Demand]) -> Result<Vec<Solution>> {
        demands.iter()
            .map(|demand| self.solve(topology, demand))
            .collect()
    }
}
