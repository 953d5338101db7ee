//! Driving the controllers: deterministic stepping and the tokio scheduler

pub mod director;
pub mod runtime;

pub use director::{HomeSimulation, SimulationReport};
pub use runtime::{start, SimulationHandle};
