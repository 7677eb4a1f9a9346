// src/model/elevator.rs

use crate::model::person::{Floor, PersonArena, PersonId};
use crate::strategy::traits::Direction;

/// A single elevator car. Every car starts empty on floor 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Elevator {
    pub current_floor: Floor,
    pub max_capacity: usize,

    // Boarding order: the front is whoever got on first.
    passengers: Vec<PersonId>,
}

impl Elevator {
    pub fn new(max_capacity: usize) -> Self {
        Self {
            current_floor: 1,
            max_capacity,
            passengers: Vec::with_capacity(max_capacity),
        }
    }

    pub fn passengers(&self) -> &[PersonId] {
        &self.passengers
    }

    /// The passenger who has been aboard the longest.
    pub fn first_passenger(&self) -> Option<PersonId> {
        self.passengers.first().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.passengers.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.passengers.len() >= self.max_capacity
    }

    /// Fraction of capacity in use, between 0.0 and 1.0.
    pub fn fullness(&self) -> f32 {
        self.passengers.len() as f32 / self.max_capacity as f32
    }

    /// Adds a passenger at the back. Returns false (and does nothing) when full.
    pub fn board(&mut self, person: PersonId) -> bool {
        if self.is_full() {
            return false;
        }
        self.passengers.push(person);
        true
    }

    /// Removes every passenger whose target is the current floor.
    ///
    /// Returns them in boarding order; the rest keep their relative order.
    pub fn disembark(&mut self, people: &PersonArena) -> Vec<PersonId> {
        let floor = self.current_floor;
        let (leaving, staying): (Vec<PersonId>, Vec<PersonId>) = self
            .passengers
            .iter()
            .copied()
            .partition(|id| people.get(*id).target == floor);
        self.passengers = staying;
        leaving
    }

    pub fn apply(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.current_floor += 1,
            Direction::Down => self.current_floor -= 1,
            Direction::Stay => {}
        }
    }

    pub fn clear(&mut self) {
        self.current_floor = 1;
        self.passengers.clear();
    }
}
