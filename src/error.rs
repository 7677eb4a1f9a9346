// src/error.rs

use thiserror::Error;

use crate::model::person::Floor;
use crate::strategy::traits::Direction;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("a simulation needs at least one round, got {0}")]
    InvalidRounds(usize),

    #[error("arrival table line {line}: {message}")]
    ArrivalParse { line: u64, message: String },

    #[error("round {round}: floor {floor} is outside the building (1..={max_floor})")]
    FloorOutOfRange {
        round: usize,
        floor: Floor,
        max_floor: Floor,
    },

    #[error("moving algorithm returned {got} directions for {expected} elevators")]
    DirectionCountMismatch { expected: usize, got: usize },

    #[error("elevator {elevator} cannot move {direction:?} from floor {floor}")]
    InvalidMove {
        elevator: usize,
        floor: Floor,
        direction: Direction,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;
