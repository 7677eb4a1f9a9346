pub mod config;
pub mod engine;
pub mod renderer;
pub mod stats;
