// src/strategy/arrivals.rs

use std::io::Read;
use std::path::Path;

use rand::seq::index;
use rand::RngCore;

use crate::error::{SimError, SimResult};
use crate::io::arrivals::{load_arrival_table, parse_arrival_table, ArrivalTable};
use crate::model::person::{Floor, Person};
use crate::strategy::traits::{group_by_start, ArrivalGenerator, Arrivals};

fn check_max_floor(max_floor: Floor) -> SimResult<()> {
    if max_floor < 2 {
        return Err(SimError::Config(format!(
            "a building needs at least 2 floors, got {max_floor}"
        )));
    }
    Ok(())
}

// =========================================================================
// 1. Random Arrivals
// =========================================================================

/// Sends the same number of random people into the building every round.
///
/// Each person gets two different floors drawn uniformly; the first is where
/// they start and the second is where they want to go. With no count
/// configured nobody ever arrives.
#[derive(Debug, Clone)]
pub struct RandomArrivals {
    max_floor: Floor,
    num_people: Option<usize>,
}

impl RandomArrivals {
    pub fn new(max_floor: Floor, num_people: Option<usize>) -> SimResult<Self> {
        check_max_floor(max_floor)?;
        Ok(Self {
            max_floor,
            num_people,
        })
    }

    fn generate_people(&self, count: usize, rng: &mut dyn RngCore) -> Vec<Person> {
        (0..count)
            .map(|_| {
                let floors = index::sample(rng, self.max_floor as usize, 2);
                Person::new(floors.index(0) as Floor + 1, floors.index(1) as Floor + 1)
            })
            .collect()
    }
}

impl ArrivalGenerator for RandomArrivals {
    fn max_floor(&self) -> Floor {
        self.max_floor
    }

    fn generate(&mut self, _round: usize, rng: &mut dyn RngCore) -> Arrivals {
        match self.num_people {
            Some(count) => group_by_start(self.generate_people(count, rng)),
            None => Arrivals::new(),
        }
    }
}

// =========================================================================
// 2. File Arrivals
// =========================================================================

/// Replays arrivals recorded in an arrival table.
///
/// The whole table is parsed and checked up front, so a bad file is reported
/// before the first round runs.
#[derive(Debug, Clone)]
pub struct FileArrivals {
    max_floor: Floor,
    table: ArrivalTable,
}

impl FileArrivals {
    pub fn from_path(max_floor: Floor, path: &Path) -> SimResult<Self> {
        Self::from_table(max_floor, load_arrival_table(path)?)
    }

    pub fn from_reader<R: Read>(max_floor: Floor, reader: R) -> SimResult<Self> {
        Self::from_table(max_floor, parse_arrival_table(reader)?)
    }

    pub fn from_table(max_floor: Floor, table: ArrivalTable) -> SimResult<Self> {
        check_max_floor(max_floor)?;

        for (round, pairs) in &table {
            for (start, target) in pairs {
                for floor in [*start, *target] {
                    if floor < 1 || floor > max_floor {
                        return Err(SimError::FloorOutOfRange {
                            round: *round,
                            floor,
                            max_floor,
                        });
                    }
                }
            }
        }

        Ok(Self { max_floor, table })
    }

    pub fn table(&self) -> &ArrivalTable {
        &self.table
    }
}

impl ArrivalGenerator for FileArrivals {
    fn max_floor(&self) -> Floor {
        self.max_floor
    }

    fn generate(&mut self, round: usize, _rng: &mut dyn RngCore) -> Arrivals {
        match self.table.get(&round) {
            Some(pairs) => group_by_start(
                pairs
                    .iter()
                    .map(|(start, target)| Person::new(*start, *target))
                    .collect(),
            ),
            None => Arrivals::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::arrivals::write_arrival_table;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::io::Cursor;

    #[test]
    fn random_arrivals_without_count_is_always_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut generator = RandomArrivals::new(5, None).unwrap();
        for round in [0, 1, 17, 1000] {
            assert!(generator.generate(round, &mut rng).is_empty());
        }
    }

    #[test]
    fn random_arrivals_use_distinct_floors_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut generator = RandomArrivals::new(4, Some(25)).unwrap();

        for round in 0..20 {
            let arrivals = generator.generate(round, &mut rng);
            let total: usize = arrivals.values().map(Vec::len).sum();
            assert_eq!(total, 25);

            for (floor, people) in &arrivals {
                for person in people {
                    assert_eq!(person.start, *floor);
                    assert_ne!(person.start, person.target);
                    assert!((1..=4).contains(&person.start));
                    assert!((1..=4).contains(&person.target));
                    assert_eq!(person.wait_time, 0);
                }
            }
        }
    }

    #[test]
    fn random_arrivals_are_reproducible_with_a_seed() {
        let mut a = RandomArrivals::new(8, Some(3)).unwrap();
        let mut b = RandomArrivals::new(8, Some(3)).unwrap();
        let mut rng_a = ChaCha8Rng::seed_from_u64(99);
        let mut rng_b = ChaCha8Rng::seed_from_u64(99);

        for round in 0..10 {
            assert_eq!(a.generate(round, &mut rng_a), b.generate(round, &mut rng_b));
        }
    }

    #[test]
    fn single_floor_building_is_rejected() {
        assert!(RandomArrivals::new(1, Some(1)).is_err());
        assert!(FileArrivals::from_table(1, ArrivalTable::new()).is_err());
    }

    #[test]
    fn file_arrivals_replay_the_table() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut generator = FileArrivals::from_reader(5, Cursor::new("0,3,1,1,5,3,2\n2,2,4\n")).unwrap();

        let first = generator.generate(0, &mut rng);
        assert_eq!(first[&1], vec![Person::new(1, 5)]);
        assert_eq!(first[&3], vec![Person::new(3, 1), Person::new(3, 2)]);

        assert!(generator.generate(1, &mut rng).is_empty());
        assert_eq!(generator.generate(2, &mut rng)[&2], vec![Person::new(2, 4)]);
    }

    #[test]
    fn file_arrivals_reject_floors_above_the_roof() {
        let err = FileArrivals::from_reader(3, Cursor::new("0,1,2\n4,2,9\n")).unwrap_err();
        assert!(matches!(
            err,
            SimError::FloorOutOfRange {
                round: 4,
                floor: 9,
                max_floor: 3
            }
        ));
    }

    #[test]
    fn malformed_file_fails_at_construction() {
        assert!(FileArrivals::from_reader(5, Cursor::new("0,1,two\n")).is_err());
    }

    #[test]
    fn recorded_pairs_replay_in_order() {
        let pairs = vec![(1, 3), (4, 2), (1, 2), (3, 4)];
        let mut table = ArrivalTable::new();
        table.insert(5, pairs.clone());

        let mut buffer = Vec::new();
        write_arrival_table(&mut buffer, &table).unwrap();
        let generator = FileArrivals::from_reader(4, Cursor::new(buffer)).unwrap();

        assert_eq!(generator.table()[&5], pairs);
    }
}
