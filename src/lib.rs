//! Round-based simulation of elevators carrying people between floors.
//!
//! Each round runs five stages in order: new arrivals join the floor queues,
//! passengers at their target floor get off, waiting people board, a
//! [`MovingAlgorithm`](strategy::traits::MovingAlgorithm) moves every car one
//! step, and everyone still travelling waits one more round. Arrivals come from
//! a pluggable [`ArrivalGenerator`](strategy::traits::ArrivalGenerator).

pub mod error;
pub mod io;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use error::{SimError, SimResult};
pub use simulation::config::SimulationConfig;
pub use simulation::engine::{RoundRecord, Simulation};
pub use simulation::stats::SimulationStats;
