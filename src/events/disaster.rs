//! Disaster category: fire, flood, earthquake
//!
//! Disasters are the only category that escalates and the only one gated
//! by a progress accumulator; both behaviours come from the catalog, so the
//! rules themselves need no hooks beyond the category tag.

use crate::core::types::EventCategory;
use crate::events::engine::CategoryRules;

#[derive(Debug, Clone, Copy, Default)]
pub struct DisasterRules;

impl CategoryRules for DisasterRules {
    fn category(&self) -> EventCategory {
        EventCategory::Disaster
    }
}
