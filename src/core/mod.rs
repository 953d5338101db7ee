pub mod clock;
pub mod config;
pub mod error;
pub mod random;
pub mod types;

pub use clock::{SimClock, TimePeriod};
