// src/simulation/renderer.rs

use std::time::Duration;

use tracing::info;

use crate::model::elevator::Elevator;
use crate::model::person::{Person, PersonArena};
use crate::model::waiting::WaitingMap;
use crate::strategy::traits::Direction;

/// Callbacks invoked by [`Simulation::run`][crate::simulation::engine::Simulation::run]
/// as each round unfolds.
///
/// A renderer only watches. Nothing it does feeds back into the simulation,
/// and every method defaults to doing nothing.
pub trait Renderer {
    fn render_header(&mut self, _round: usize) {}

    /// Called after the round's arrivals have joined the queues.
    fn show_arrivals(&mut self, _waiting: &WaitingMap, _people: &PersonArena) {}

    fn show_boarding(&mut self, _person: &Person, _elevator: usize) {}

    fn show_disembarking(&mut self, _person: &Person, _elevator: usize) {}

    /// `elevators` have already moved by `directions`.
    fn show_elevator_moves(&mut self, _elevators: &[Elevator], _directions: &[Direction]) {}

    /// Pause between rounds.
    fn wait(&mut self, _units: u32) {}
}

pub struct NoopRenderer;

impl Renderer for NoopRenderer {}

/// Writes the run to the log and paces it in real time.
///
/// Does nothing unless `visualize` is set.
pub struct ConsoleRenderer {
    visualize: bool,
    pace: Duration,
}

impl ConsoleRenderer {
    pub fn new(visualize: bool, pace: Duration) -> Self {
        Self { visualize, pace }
    }
}

impl Renderer for ConsoleRenderer {
    fn render_header(&mut self, round: usize) {
        if self.visualize {
            info!("---------- round {round} ----------");
        }
    }

    fn show_arrivals(&mut self, waiting: &WaitingMap, people: &PersonArena) {
        if !self.visualize {
            return;
        }
        for (floor, queue) in waiting.iter().filter(|(_, q)| !q.is_empty()) {
            let angers: Vec<u8> = queue.iter().map(|id| people.get(*id).anger_level()).collect();
            info!(floor, waiting = queue.len(), ?angers, "queue");
        }
    }

    fn show_boarding(&mut self, person: &Person, elevator: usize) {
        if self.visualize {
            info!(elevator, start = person.start, target = person.target, "boarded");
        }
    }

    fn show_disembarking(&mut self, person: &Person, elevator: usize) {
        if self.visualize {
            info!(
                elevator,
                floor = person.target,
                wait_time = person.wait_time,
                "arrived"
            );
        }
    }

    fn show_elevator_moves(&mut self, elevators: &[Elevator], directions: &[Direction]) {
        if !self.visualize {
            return;
        }
        for (index, (elevator, direction)) in elevators.iter().zip(directions).enumerate() {
            info!(
                elevator = index,
                floor = elevator.current_floor,
                ?direction,
                fullness = elevator.fullness(),
                "moved"
            );
        }
    }

    fn wait(&mut self, units: u32) {
        if self.visualize && !self.pace.is_zero() {
            std::thread::sleep(self.pace * units);
        }
    }
}
