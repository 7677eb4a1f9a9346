pub mod arrivals;
pub mod moving;
pub mod traits;
