pub mod elevator;
pub mod person;
pub mod waiting;
