// src/simulation/stats.rs

use serde::Serialize;

/// Reported for the time statistics when nobody reached their floor.
pub const UNDEFINED_TIME: i64 = -1;

/// Summary of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SimulationStats {
    pub num_iterations: usize,
    /// Everyone generated, whether or not they arrived.
    pub total_people: usize,
    pub people_completed: usize,
    pub max_time: i64,
    pub min_time: i64,
    /// Rounded toward zero.
    pub avg_time: i64,
}

impl SimulationStats {
    /// Builds the summary from the wait times of everyone who completed their trip.
    pub fn calculate<I>(num_iterations: usize, total_people: usize, completed_wait_times: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        let times: Vec<i64> = completed_wait_times.into_iter().map(i64::from).collect();

        let (max_time, min_time, avg_time) = if times.is_empty() {
            (UNDEFINED_TIME, UNDEFINED_TIME, UNDEFINED_TIME)
        } else {
            let sum: i64 = times.iter().sum();
            (
                times.iter().copied().max().unwrap_or(UNDEFINED_TIME),
                times.iter().copied().min().unwrap_or(UNDEFINED_TIME),
                sum / times.len() as i64,
            )
        };

        Self {
            num_iterations,
            total_people,
            people_completed: times.len(),
            max_time,
            min_time,
            avg_time,
        }
    }
}
