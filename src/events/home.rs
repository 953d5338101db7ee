//! Home-malfunction category: plumbing leaks, power outages, pests
//!
//! Unary severity, resolved after a fixed repair time. The household is
//! told as soon as the repair is done, before the clean-up dwell.

use crate::core::types::EventCategory;
use crate::events::catalog::EventProfile;
use crate::events::engine::CategoryRules;
use crate::events::model::{LiveEvent, Notification, NotificationLevel};
use crate::world::access::WorldAccess;

#[derive(Debug, Clone, Copy, Default)]
pub struct HomeEventRules;

impl CategoryRules for HomeEventRules {
    fn category(&self) -> EventCategory {
        EventCategory::HomeEvent
    }

    fn on_resolution_started(&mut self, _event: &LiveEvent, profile: &EventProfile, world: &mut dyn WorldAccess) {
        let now = world.sim_minutes();
        world.notify(Notification {
            at: now,
            level: NotificationLevel::Success,
            title: "Event Resolved".to_string(),
            message: format!("{} has been fixed!", profile.label),
        });
    }
}
