//! SimBot Events - household event lifecycle engine
//!
//! Disasters, home malfunctions and intruders spawn on a simulated clock,
//! are detected and handled by the household robots, and are archived once
//! resolved.

pub mod core;
pub mod entity;
pub mod events;
pub mod simulation;
pub mod world;
