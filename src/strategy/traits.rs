// src/strategy/traits.rs

use std::collections::BTreeMap;
use std::fmt::Debug;

use rand::RngCore;
use serde::Serialize;

use crate::model::elevator::Elevator;
use crate::model::person::{Floor, Person, PersonArena};
use crate::model::waiting::WaitingMap;

/// New people for one round, keyed by the floor they start on.
pub type Arrivals = BTreeMap<Floor, Vec<Person>>;

/// Decides who shows up in the building each round.
///
/// We require `Send` + `Sync` so a configured simulation can be moved to a worker thread.
pub trait ArrivalGenerator: Debug + Send + Sync {
    /// Highest floor this generator will ever put a person on or send them to.
    fn max_floor(&self) -> Floor;

    /// The people arriving at `round`, grouped by start floor.
    ///
    /// Floors where nobody arrives may be left out.
    fn generate(&mut self, round: usize, rng: &mut dyn RngCore) -> Arrivals;
}

/// Groups people by start floor, keeping arrival order within each floor.
pub fn group_by_start(people: Vec<Person>) -> Arrivals {
    let mut arrivals = Arrivals::new();
    for person in people {
        arrivals.entry(person.start).or_default().push(person);
    }
    arrivals
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    Up,
    Stay,
    Down,
}

impl Direction {
    const ALL: [Direction; 3] = [Direction::Stay, Direction::Down, Direction::Up];

    /// The single step that brings `from` closer to `to`.
    pub fn toward(from: Floor, to: Floor) -> Self {
        if to > from {
            Direction::Up
        } else if to < from {
            Direction::Down
        } else {
            Direction::Stay
        }
    }

    /// A car on the ground floor cannot go down, one on the top floor cannot go up.
    pub fn is_valid_at(self, floor: Floor, max_floor: Floor) -> bool {
        match self {
            Direction::Up => floor < max_floor,
            Direction::Down => floor > 1,
            Direction::Stay => true,
        }
    }

    pub fn valid_at(floor: Floor, max_floor: Floor) -> Vec<Direction> {
        Self::ALL
            .into_iter()
            .filter(|d| d.is_valid_at(floor, max_floor))
            .collect()
    }
}

/// Decides where every elevator goes next.
pub trait MovingAlgorithm: Debug + Send + Sync {
    /// Returns one direction per elevator, in the same order as `elevators`.
    ///
    /// An empty vector means nobody moves this round.
    ///
    /// # Arguments
    /// * `elevators` - All cars, before any of them has moved this round.
    /// * `waiting` - Who is standing on each floor.
    /// * `people` - Lookup for the ids held by `elevators` and `waiting`.
    /// * `max_floor` - The top floor of the building.
    /// * `rng` - The run's shared random source.
    fn move_elevators(
        &mut self,
        elevators: &[Elevator],
        waiting: &WaitingMap,
        people: &PersonArena,
        max_floor: Floor,
        rng: &mut dyn RngCore,
    ) -> Vec<Direction>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_by_start_keeps_arrival_order() {
        let people = vec![
            Person::new(3, 1),
            Person::new(1, 2),
            Person::new(3, 5),
            Person::new(1, 4),
        ];
        let arrivals = group_by_start(people);

        assert_eq!(arrivals.keys().copied().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(arrivals[&1], vec![Person::new(1, 2), Person::new(1, 4)]);
        assert_eq!(arrivals[&3], vec![Person::new(3, 1), Person::new(3, 5)]);
    }

    #[test]
    fn boundary_floors_limit_directions() {
        assert_eq!(
            Direction::valid_at(1, 5),
            vec![Direction::Stay, Direction::Up]
        );
        assert_eq!(
            Direction::valid_at(5, 5),
            vec![Direction::Stay, Direction::Down]
        );
        assert_eq!(Direction::valid_at(3, 5).len(), 3);
    }

    #[test]
    fn toward_compares_floors() {
        assert_eq!(Direction::toward(2, 5), Direction::Up);
        assert_eq!(Direction::toward(5, 2), Direction::Down);
        assert_eq!(Direction::toward(4, 4), Direction::Stay);
    }
}
