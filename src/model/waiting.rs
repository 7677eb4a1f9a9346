// src/model/waiting.rs

use crate::model::person::{Floor, PersonId};

/// People standing on each floor, in the order they arrived.
///
/// Every floor from 1 to the top has a queue, even when it is empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaitingMap {
    floors: Vec<Vec<PersonId>>,
}

impl WaitingMap {
    pub fn new(num_floors: Floor) -> Self {
        Self {
            floors: vec![Vec::new(); num_floors as usize],
        }
    }

    pub fn num_floors(&self) -> Floor {
        self.floors.len() as Floor
    }

    pub fn contains_floor(&self, floor: Floor) -> bool {
        floor >= 1 && floor <= self.num_floors()
    }

    /// The queue on `floor`; empty for floors outside the building.
    pub fn at(&self, floor: Floor) -> &[PersonId] {
        match self.index(floor) {
            Some(i) => &self.floors[i],
            None => &[],
        }
    }

    /// Appends to the back of the floor's queue. Returns false for an unknown floor.
    pub fn push(&mut self, floor: Floor, person: PersonId) -> bool {
        match self.index(floor) {
            Some(i) => {
                self.floors[i].push(person);
                true
            }
            None => false,
        }
    }

    /// Empties a floor's queue and hands it back.
    pub fn take(&mut self, floor: Floor) -> Vec<PersonId> {
        match self.index(floor) {
            Some(i) => std::mem::take(&mut self.floors[i]),
            None => Vec::new(),
        }
    }

    pub fn replace(&mut self, floor: Floor, queue: Vec<PersonId>) {
        if let Some(i) = self.index(floor) {
            self.floors[i] = queue;
        }
    }

    /// `(floor, queue)` pairs from the ground floor up.
    pub fn iter(&self) -> impl Iterator<Item = (Floor, &[PersonId])> + '_ {
        self.floors
            .iter()
            .enumerate()
            .map(|(i, queue)| (i as Floor + 1, queue.as_slice()))
    }

    pub fn lowest_occupied(&self) -> Option<Floor> {
        self.iter()
            .find(|(_, queue)| !queue.is_empty())
            .map(|(floor, _)| floor)
    }

    pub fn has_waiting(&self) -> bool {
        self.floors.iter().any(|queue| !queue.is_empty())
    }

    pub fn total_waiting(&self) -> usize {
        self.floors.iter().map(Vec::len).sum()
    }

    pub fn clear(&mut self) {
        for queue in &mut self.floors {
            queue.clear();
        }
    }

    fn index(&self, floor: Floor) -> Option<usize> {
        if self.contains_floor(floor) {
            Some(floor as usize - 1)
        } else {
            None
        }
    }
}
