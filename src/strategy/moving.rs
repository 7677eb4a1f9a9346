// src/strategy/moving.rs

use rand::seq::SliceRandom;
use rand::RngCore;

use crate::model::elevator::Elevator;
use crate::model::person::{Floor, PersonArena};
use crate::model::waiting::WaitingMap;
use crate::strategy::traits::{Direction, MovingAlgorithm};

// =========================================================================
// 1. Random Algorithm
// =========================================================================

/// Every elevator picks any legal direction, uniformly at random.
#[derive(Debug, Clone, Default)]
pub struct RandomAlgorithm;

impl RandomAlgorithm {
    pub fn new() -> Self {
        Self
    }
}

impl MovingAlgorithm for RandomAlgorithm {
    fn move_elevators(
        &mut self,
        elevators: &[Elevator],
        _waiting: &WaitingMap,
        _people: &PersonArena,
        max_floor: Floor,
        rng: &mut dyn RngCore,
    ) -> Vec<Direction> {
        elevators
            .iter()
            .map(|elevator| {
                Direction::valid_at(elevator.current_floor, max_floor)
                    .choose(rng)
                    .copied()
                    .unwrap_or(Direction::Stay)
            })
            .collect()
    }
}

// =========================================================================
// 2. Pushy Passenger
// =========================================================================

/// Serves whoever got on first.
///
/// An empty elevator heads for the lowest floor where someone is waiting. A
/// loaded one heads for the target of its longest-riding passenger.
#[derive(Debug, Clone, Default)]
pub struct PushyPassenger;

impl PushyPassenger {
    pub fn new() -> Self {
        Self
    }
}

impl MovingAlgorithm for PushyPassenger {
    fn move_elevators(
        &mut self,
        elevators: &[Elevator],
        waiting: &WaitingMap,
        people: &PersonArena,
        _max_floor: Floor,
        _rng: &mut dyn RngCore,
    ) -> Vec<Direction> {
        let lowest_waiting = waiting.lowest_occupied();

        elevators
            .iter()
            .map(|elevator| {
                let goal = match elevator.first_passenger() {
                    Some(id) => Some(people.get(id).target),
                    None => lowest_waiting,
                };
                goal.map_or(Direction::Stay, |floor| {
                    Direction::toward(elevator.current_floor, floor)
                })
            })
            .collect()
    }
}

// =========================================================================
// 3. Short Sighted
// =========================================================================

/// Goes wherever is closest.
///
/// An empty elevator heads for the nearest floor with people waiting; a
/// loaded one for the nearest passenger target. "Nearest" means first in
/// [`scan_order`], so at equal distance the floor below wins.
#[derive(Debug, Clone, Default)]
pub struct ShortSighted;

impl ShortSighted {
    pub fn new() -> Self {
        Self
    }
}

/// Floors ordered by how soon they are reached when looking outward from
/// `current`: the current floor, then one below, one above, two below, two
/// above, and so on. Floors outside `1..=max_floor` are skipped.
pub fn scan_order(current: Floor, max_floor: Floor) -> Vec<Floor> {
    let current = i64::from(current);
    let max = i64::from(max_floor);

    let mut floors = vec![current];
    for distance in 1..max {
        floors.push(current - distance);
        floors.push(current + distance);
    }

    floors
        .into_iter()
        .filter(|floor| (1..=max).contains(floor))
        .map(|floor| floor as Floor)
        .collect()
}

impl MovingAlgorithm for ShortSighted {
    fn move_elevators(
        &mut self,
        elevators: &[Elevator],
        waiting: &WaitingMap,
        people: &PersonArena,
        max_floor: Floor,
        _rng: &mut dyn RngCore,
    ) -> Vec<Direction> {
        let anyone_waiting = waiting.has_waiting();

        elevators
            .iter()
            .map(|elevator| {
                let here = elevator.current_floor;
                let mut scan = scan_order(here, max_floor).into_iter();

                let goal = if elevator.is_empty() {
                    if !anyone_waiting {
                        return Direction::Stay;
                    }
                    scan.find(|floor| !waiting.at(*floor).is_empty())
                } else {
                    let targets: Vec<Floor> = elevator
                        .passengers()
                        .iter()
                        .map(|id| people.get(*id).target)
                        .collect();
                    scan.find(|floor| targets.contains(floor))
                };

                Direction::toward(here, goal.unwrap_or(here))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::person::{Person, PersonId};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn elevator_at(floor: Floor, capacity: usize) -> Elevator {
        let mut elevator = Elevator::new(capacity);
        elevator.current_floor = floor;
        elevator
    }

    fn wait_at(waiting: &mut WaitingMap, people: &mut PersonArena, start: Floor, target: Floor) {
        let id = people.spawn(Person::new(start, target));
        waiting.push(start, id);
    }

    fn ride(elevator: &mut Elevator, people: &mut PersonArena, target: Floor) -> PersonId {
        let id = people.spawn(Person::new(elevator.current_floor, target));
        assert!(elevator.board(id));
        id
    }

    fn decide(
        algorithm: &mut dyn MovingAlgorithm,
        elevators: &[Elevator],
        waiting: &WaitingMap,
        people: &PersonArena,
        max_floor: Floor,
    ) -> Vec<Direction> {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        algorithm.move_elevators(elevators, waiting, people, max_floor, &mut rng)
    }

    #[test]
    fn scan_order_alternates_down_then_up() {
        assert_eq!(scan_order(3, 5), vec![3, 2, 4, 1, 5]);
        assert_eq!(scan_order(1, 4), vec![1, 2, 3, 4]);
        assert_eq!(scan_order(4, 4), vec![4, 3, 2, 1]);
        assert_eq!(scan_order(2, 6), vec![2, 1, 3, 4, 5, 6]);
    }

    #[test]
    fn random_algorithm_never_leaves_the_building() {
        let elevators = vec![elevator_at(1, 1), elevator_at(3, 1), elevator_at(5, 1)];
        let waiting = WaitingMap::new(5);
        let people = PersonArena::new();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut algorithm = RandomAlgorithm::new();

        let mut seen_middle = std::collections::HashSet::new();
        for _ in 0..200 {
            let directions = algorithm.move_elevators(&elevators, &waiting, &people, 5, &mut rng);
            assert_eq!(directions.len(), 3);
            assert_ne!(directions[0], Direction::Down);
            assert_ne!(directions[2], Direction::Up);
            seen_middle.insert(directions[1]);
        }
        assert_eq!(seen_middle.len(), 3);
    }

    #[test]
    fn pushy_empty_elevator_heads_for_lowest_waiting_floor() {
        let mut people = PersonArena::new();
        let mut waiting = WaitingMap::new(6);
        wait_at(&mut waiting, &mut people, 4, 1);
        wait_at(&mut waiting, &mut people, 2, 6);

        let elevators = vec![elevator_at(1, 2), elevator_at(2, 2), elevator_at(5, 2)];
        let directions = decide(&mut PushyPassenger::new(), &elevators, &waiting, &people, 6);

        assert_eq!(
            directions,
            vec![Direction::Up, Direction::Stay, Direction::Down]
        );
    }

    #[test]
    fn pushy_empty_elevator_stays_when_nobody_waits() {
        let people = PersonArena::new();
        let waiting = WaitingMap::new(4);
        let elevators = vec![elevator_at(3, 1)];
        let directions = decide(&mut PushyPassenger::new(), &elevators, &waiting, &people, 4);
        assert_eq!(directions, vec![Direction::Stay]);
    }

    #[test]
    fn pushy_follows_first_passenger() {
        let mut people = PersonArena::new();
        let mut waiting = WaitingMap::new(6);
        wait_at(&mut waiting, &mut people, 1, 2);

        let mut elevator = elevator_at(3, 3);
        ride(&mut elevator, &mut people, 6);
        ride(&mut elevator, &mut people, 2);

        let directions = decide(&mut PushyPassenger::new(), &[elevator], &waiting, &people, 6);
        assert_eq!(directions, vec![Direction::Up]);
    }

    #[test]
    fn short_sighted_finds_distant_waiting_floor() {
        let mut people = PersonArena::new();
        let mut waiting = WaitingMap::new(5);
        wait_at(&mut waiting, &mut people, 5, 1);

        let elevators = vec![elevator_at(3, 1)];
        let directions = decide(&mut ShortSighted::new(), &elevators, &waiting, &people, 5);
        assert_eq!(directions, vec![Direction::Up]);
    }

    #[test]
    fn short_sighted_prefers_lower_floor_on_a_tie() {
        let mut people = PersonArena::new();
        let mut waiting = WaitingMap::new(5);
        wait_at(&mut waiting, &mut people, 2, 5);
        wait_at(&mut waiting, &mut people, 4, 1);

        let elevators = vec![elevator_at(3, 1)];
        let directions = decide(&mut ShortSighted::new(), &elevators, &waiting, &people, 5);
        assert_eq!(directions, vec![Direction::Down]);
    }

    #[test]
    fn short_sighted_stays_when_people_wait_on_its_floor() {
        let mut people = PersonArena::new();
        let mut waiting = WaitingMap::new(5);
        wait_at(&mut waiting, &mut people, 3, 5);
        wait_at(&mut waiting, &mut people, 2, 5);

        let elevators = vec![elevator_at(3, 1)];
        let directions = decide(&mut ShortSighted::new(), &elevators, &waiting, &people, 5);
        assert_eq!(directions, vec![Direction::Stay]);
    }

    #[test]
    fn short_sighted_loaded_elevator_picks_nearest_target() {
        let mut people = PersonArena::new();
        let waiting = WaitingMap::new(7);

        let mut elevator = elevator_at(4, 3);
        ride(&mut elevator, &mut people, 7);
        ride(&mut elevator, &mut people, 6);
        ride(&mut elevator, &mut people, 1);

        let directions = decide(&mut ShortSighted::new(), &[elevator], &waiting, &people, 7);
        assert_eq!(directions, vec![Direction::Up]);
    }

    #[test]
    fn short_sighted_loaded_elevator_ignores_waiting_people() {
        let mut people = PersonArena::new();
        let mut waiting = WaitingMap::new(5);
        wait_at(&mut waiting, &mut people, 3, 1);

        let mut elevator = elevator_at(2, 2);
        ride(&mut elevator, &mut people, 1);

        let directions = decide(&mut ShortSighted::new(), &[elevator], &waiting, &people, 5);
        assert_eq!(directions, vec![Direction::Down]);
    }
}
