// src/simulation/config.rs

use serde::Serialize;

use crate::error::{SimError, SimResult};
use crate::model::person::Floor;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationConfig {
    pub num_floors: Floor,
    pub num_elevators: usize,
    pub elevator_capacity: usize,
    /// Only read by renderers; never changes what the simulation does.
    pub visualize: bool,
    /// Seed for the run's random source.
    pub seed: u64,
}

impl SimulationConfig {
    pub fn validate(&self) -> SimResult<()> {
        if self.num_floors < 2 {
            return Err(SimError::Config(format!(
                "num_floors must be at least 2, got {}",
                self.num_floors
            )));
        }
        if self.num_elevators == 0 {
            return Err(SimError::Config(
                "num_elevators must be at least 1".to_string(),
            ));
        }
        if self.elevator_capacity == 0 {
            return Err(SimError::Config(
                "elevator_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_floors: 6,
            num_elevators: 6,
            elevator_capacity: 3,
            visualize: false,
            seed: 42,
        }
    }
}
