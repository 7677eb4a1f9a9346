// src/simulation/engine.rs

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{SimError, SimResult};
use crate::model::elevator::Elevator;
use crate::model::person::{PersonArena, PersonId};
use crate::model::waiting::WaitingMap;
use crate::simulation::config::SimulationConfig;
use crate::simulation::renderer::{NoopRenderer, Renderer};
use crate::simulation::stats::SimulationStats;
use crate::strategy::traits::{ArrivalGenerator, MovingAlgorithm};

// We make this Serialize so it can be written to CSV
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundRecord {
    pub round: usize,
    pub new_arrivals: usize,
    pub disembarked: usize,
    pub boarded: usize,
    pub waiting: usize,
    pub riding: usize,
    pub completed: usize,
    pub mean_fullness: f32,
    pub max_anger: u8,
}

pub struct Simulation {
    config: SimulationConfig,

    // The two policies
    arrival_generator: Box<dyn ArrivalGenerator>,
    moving_algorithm: Box<dyn MovingAlgorithm>,

    renderer: Box<dyn Renderer>,

    // Every run restarts from a copy of `initial_rng`
    initial_rng: ChaCha8Rng,
    rng: ChaCha8Rng,

    // Building state
    pub people: PersonArena,
    pub waiting: WaitingMap,
    pub elevators: Vec<Elevator>,
    pub completed: Vec<PersonId>,
    pub total_arrivals: usize,

    pub history: Vec<RoundRecord>,
}

impl Simulation {
    pub fn new(
        config: SimulationConfig,
        arrival_generator: Box<dyn ArrivalGenerator>,
        moving_algorithm: Box<dyn MovingAlgorithm>,
    ) -> SimResult<Self> {
        config.validate()?;

        if arrival_generator.max_floor() > config.num_floors {
            return Err(SimError::Config(format!(
                "arrival generator uses floors up to {} but the building has {}",
                arrival_generator.max_floor(),
                config.num_floors
            )));
        }

        let elevators = (0..config.num_elevators)
            .map(|_| Elevator::new(config.elevator_capacity))
            .collect();
        let rng = ChaCha8Rng::seed_from_u64(config.seed);

        Ok(Self {
            waiting: WaitingMap::new(config.num_floors),
            config,
            arrival_generator,
            moving_algorithm,
            renderer: Box::new(NoopRenderer),
            initial_rng: rng.clone(),
            rng,
            people: PersonArena::new(),
            elevators,
            completed: Vec::new(),
            total_arrivals: 0,
            history: Vec::new(),
        })
    }

    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Replaces the seeded random source.
    pub fn with_rng(mut self, rng: ChaCha8Rng) -> Self {
        self.initial_rng = rng.clone();
        self.rng = rng;
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Runs `num_rounds` rounds from an empty building and summarizes them.
    pub fn run(&mut self, num_rounds: usize) -> SimResult<SimulationStats> {
        if num_rounds < 1 {
            return Err(SimError::InvalidRounds(num_rounds));
        }

        self.reset();
        info!(
            num_rounds,
            floors = self.config.num_floors,
            elevators = self.config.num_elevators,
            capacity = self.config.elevator_capacity,
            "starting simulation"
        );

        for round in 0..num_rounds {
            self.step(round)?;
        }

        let stats = self.stats(num_rounds);
        info!(?stats, "simulation finished");
        Ok(stats)
    }

    /// Puts the building back in its starting state: nobody around, every
    /// elevator empty on floor 1.
    pub fn reset(&mut self) {
        self.people.clear();
        self.waiting.clear();
        for elevator in &mut self.elevators {
            elevator.clear();
        }
        self.completed.clear();
        self.total_arrivals = 0;
        self.history.clear();
        self.rng = self.initial_rng.clone();
    }

    /// Plays a single round. Each stage finishes before the next starts.
    pub fn step(&mut self, round: usize) -> SimResult<()> {
        self.renderer.render_header(round);

        // Stage 1: new arrivals join the queues
        let new_arrivals = self.generate_arrivals(round)?;

        // Stage 2: passengers at their floor get off
        let disembarked = self.handle_leaving();

        // Stage 3: waiting people get on
        let boarded = self.handle_boarding();

        // Stage 4: the moving algorithm decides, then everyone moves at once
        self.move_elevators()?;

        // Stage 5: everyone still on the way waits one more round
        self.handle_wait_time();

        self.renderer.wait(1);

        debug!(
            round,
            new_arrivals,
            disembarked,
            boarded,
            waiting = self.waiting.total_waiting(),
            "round complete"
        );
        self.record_history(round, new_arrivals, disembarked, boarded);
        Ok(())
    }

    fn generate_arrivals(&mut self, round: usize) -> SimResult<usize> {
        let arrivals = self.arrival_generator.generate(round, &mut self.rng);
        let max_floor = self.config.num_floors;

        // Check everything before touching the queues
        for (floor, people) in &arrivals {
            let floors = std::iter::once(*floor)
                .chain(people.iter().flat_map(|p| [p.start, p.target]));
            for floor in floors {
                if !self.waiting.contains_floor(floor) {
                    return Err(SimError::FloorOutOfRange {
                        round,
                        floor,
                        max_floor,
                    });
                }
            }
        }

        let mut count = 0;
        for (floor, people) in arrivals {
            for person in people {
                let id = self.people.spawn(person);
                self.waiting.push(floor, id);
                count += 1;
            }
        }
        self.total_arrivals += count;

        self.renderer.show_arrivals(&self.waiting, &self.people);
        Ok(count)
    }

    fn handle_leaving(&mut self) -> usize {
        let mut count = 0;
        for (index, elevator) in self.elevators.iter_mut().enumerate() {
            for id in elevator.disembark(&self.people) {
                self.renderer.show_disembarking(self.people.get(id), index);
                self.completed.push(id);
                count += 1;
            }
        }
        count
    }

    fn handle_boarding(&mut self) -> usize {
        let mut count = 0;
        for floor in 1..=self.config.num_floors {
            let queue = self.waiting.take(floor);
            let mut still_waiting = Vec::with_capacity(queue.len());

            for id in queue {
                let start = self.people.get(id).start;
                let open = self
                    .elevators
                    .iter()
                    .position(|e| e.current_floor == start && !e.is_full());

                match open {
                    Some(index) => {
                        self.elevators[index].board(id);
                        self.renderer.show_boarding(self.people.get(id), index);
                        count += 1;
                    }
                    None => still_waiting.push(id),
                }
            }

            self.waiting.replace(floor, still_waiting);
        }
        count
    }

    fn move_elevators(&mut self) -> SimResult<()> {
        let max_floor = self.config.num_floors;
        let directions = self.moving_algorithm.move_elevators(
            &self.elevators,
            &self.waiting,
            &self.people,
            max_floor,
            &mut self.rng,
        );

        if directions.is_empty() {
            return Ok(());
        }
        if directions.len() != self.elevators.len() {
            return Err(SimError::DirectionCountMismatch {
                expected: self.elevators.len(),
                got: directions.len(),
            });
        }

        // Validate the whole batch before applying any of it
        for (index, (elevator, direction)) in self.elevators.iter().zip(&directions).enumerate() {
            if !direction.is_valid_at(elevator.current_floor, max_floor) {
                return Err(SimError::InvalidMove {
                    elevator: index,
                    floor: elevator.current_floor,
                    direction: *direction,
                });
            }
        }

        for (elevator, direction) in self.elevators.iter_mut().zip(&directions) {
            elevator.apply(*direction);
        }

        self.renderer.show_elevator_moves(&self.elevators, &directions);
        Ok(())
    }

    fn handle_wait_time(&mut self) {
        for (_, queue) in self.waiting.iter() {
            for id in queue {
                self.people.get_mut(*id).increase_wait_time();
            }
        }
        for elevator in &self.elevators {
            for id in elevator.passengers() {
                self.people.get_mut(*id).increase_wait_time();
            }
        }
    }

    fn record_history(&mut self, round: usize, new_arrivals: usize, disembarked: usize, boarded: usize) {
        let riding: usize = self.elevators.iter().map(|e| e.passengers().len()).sum();
        let mean_fullness = self.elevators.iter().map(Elevator::fullness).sum::<f32>()
            / self.elevators.len() as f32;

        let max_anger = self
            .waiting
            .iter()
            .flat_map(|(_, queue)| queue.iter())
            .chain(self.elevators.iter().flat_map(|e| e.passengers().iter()))
            .map(|id| self.people.get(*id).anger_level())
            .max()
            .unwrap_or(0);

        self.history.push(RoundRecord {
            round,
            new_arrivals,
            disembarked,
            boarded,
            waiting: self.waiting.total_waiting(),
            riding,
            completed: self.completed.len(),
            mean_fullness,
            max_anger,
        });
    }

    /// Statistics over everyone who has completed their trip so far.
    pub fn stats(&self, num_rounds: usize) -> SimulationStats {
        SimulationStats::calculate(
            num_rounds,
            self.total_arrivals,
            self.completed.iter().map(|id| self.people.get(*id).wait_time),
        )
    }
}
