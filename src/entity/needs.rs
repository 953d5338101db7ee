//! Robot and room need meters
//!
//! Every meter is a percentage in [0, 100]. Adjustments clamp rather than
//! reject, so callers can apply raw deltas from the event catalog.

use serde::{Deserialize, Serialize};

pub const NEED_MIN: f32 = 0.0;
pub const NEED_MAX: f32 = 100.0;

pub fn clamp_percent(value: f32) -> f32 {
    value.clamp(NEED_MIN, NEED_MAX)
}

/// Robot needs touched by event resolution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RobotNeeds {
    /// 100 = fully rested
    pub energy: f32,
    /// 100 = delighted
    pub happiness: f32,
    /// 100 = socially satisfied
    pub social: f32,
    /// 0 = engaged, 100 = bored stiff
    pub boredom: f32,
}

impl Default for RobotNeeds {
    fn default() -> Self {
        Self {
            energy: 85.0,
            happiness: 70.0,
            social: 50.0,
            boredom: 10.0,
        }
    }
}

impl RobotNeeds {
    /// Apply a signed delta to one need, clamped to [0, 100]
    pub fn adjust(&mut self, need: NeedType, delta: f32) {
        let slot = match need {
            NeedType::Energy => &mut self.energy,
            NeedType::Happiness => &mut self.happiness,
            NeedType::Social => &mut self.social,
            NeedType::Boredom => &mut self.boredom,
        };
        *slot = clamp_percent(*slot + delta);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NeedType {
    Energy,
    Happiness,
    Social,
    Boredom,
}

/// Cleanliness and tidiness of a single room
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomNeeds {
    pub cleanliness: f32,
    pub tidiness: f32,
}

impl Default for RoomNeeds {
    fn default() -> Self {
        Self {
            cleanliness: 85.0,
            tidiness: 84.0,
        }
    }
}

impl RoomNeeds {
    pub fn new(cleanliness: f32, tidiness: f32) -> Self {
        Self {
            cleanliness: clamp_percent(cleanliness),
            tidiness: clamp_percent(tidiness),
        }
    }

    /// Apply signed deltas; damage is negative, restoration positive
    pub fn apply(&mut self, cleanliness: f32, tidiness: f32) {
        self.cleanliness = clamp_percent(self.cleanliness + cleanliness);
        self.tidiness = clamp_percent(self.tidiness + tidiness);
    }
}
