// src/model/person.rs

use serde::Serialize;

/// Floors are numbered from 1 up to the building's top floor.
pub type Floor = u32;

/// Stable handle to a person stored in a [`PersonArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PersonId(pub usize);

/// A rider travelling from `start` to `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Person {
    pub start: Floor,
    pub target: Floor,
    /// Rounds spent so far, both waiting on a floor and riding.
    pub wait_time: u32,
}

impl Person {
    pub fn new(start: Floor, target: Floor) -> Self {
        Self {
            start,
            target,
            wait_time: 0,
        }
    }

    pub fn increase_wait_time(&mut self) {
        self.wait_time += 1;
    }

    /// How annoyed this person is, from 0 (calm) to 4 (furious).
    ///
    /// Buckets: 0-2 rounds -> 0, 3-4 -> 1, 5-6 -> 2, 7-8 -> 3, 9+ -> 4.
    pub fn anger_level(&self) -> u8 {
        match self.wait_time {
            0..=2 => 0,
            3..=4 => 1,
            5..=6 => 2,
            7..=8 => 3,
            _ => 4,
        }
    }
}

/// Single owner of every person in a run.
///
/// The waiting map, elevators and completed list refer to people by
/// [`PersonId`], so each person's wait time has exactly one home.
#[derive(Debug, Clone, Default)]
pub struct PersonArena {
    people: Vec<Person>,
}

impl PersonArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, person: Person) -> PersonId {
        let id = PersonId(self.people.len());
        self.people.push(person);
        id
    }

    /// Panics if `id` was not issued by this arena.
    pub fn get(&self, id: PersonId) -> &Person {
        &self.people[id.0]
    }

    pub fn get_mut(&mut self, id: PersonId) -> &mut Person {
        &mut self.people[id.0]
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn clear(&mut self) {
        self.people.clear();
    }
}
