//! Household event lifecycle
//!
//! Disasters, home malfunctions and intruders share one generic controller
//! (`engine`) parameterised by a static catalog of event profiles and a
//! per-category rules hook.

pub mod catalog;
pub mod disaster;
pub mod engine;
pub mod home;
pub mod model;
pub mod responders;
pub mod security;

pub use catalog::{profile, EventProfile};
pub use disaster::DisasterRules;
pub use engine::{view_of, CategoryRules, EventController};
pub use home::HomeEventRules;
pub use model::{EventKind, HistoryEntry, LiveEvent, LiveEventView, Phase, Severity};
pub use security::{set_alarm_manually, SecurityRules};
