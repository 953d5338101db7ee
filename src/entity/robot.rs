//! Household robot state as seen by the event controllers

use serde::{Deserialize, Serialize};

use crate::core::types::{RobotId, Vec3};
use crate::entity::needs::RobotNeeds;
use crate::entity::tasks::TaskQueue;

/// What the robot's own scheduler is doing right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RobotActivity {
    #[default]
    Idle,
    Walking,
    Working,
}

/// Mood tag shown alongside the robot's thought
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RobotMood {
    Happy,
    #[default]
    Content,
    Focused,
    Curious,
    Routine,
    Tired,
    Lonely,
    Bored,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Robot {
    pub id: RobotId,
    pub position: Vec3,
    /// Battery percentage, 0-100
    pub battery: f32,
    pub is_charging: bool,
    pub activity: RobotActivity,
    pub mood: RobotMood,
    pub thought: String,
    pub needs: RobotNeeds,
    pub tasks: TaskQueue,
}

impl Robot {
    pub fn new(id: RobotId) -> Self {
        Self {
            id,
            position: start_position(id),
            battery: 100.0,
            is_charging: false,
            activity: RobotActivity::Idle,
            mood: RobotMood::Content,
            thought: format!("{} online. Scanning home.", display_name(id)),
            needs: RobotNeeds::default(),
            tasks: TaskQueue::new(),
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_battery(mut self, battery: f32) -> Self {
        self.battery = battery.clamp(0.0, 100.0);
        self
    }

    pub fn charging(mut self, is_charging: bool) -> Self {
        self.is_charging = is_charging;
        self
    }
}

/// Spawn point in the default house
pub fn start_position(id: RobotId) -> Vec3 {
    match id {
        RobotId::Sim => Vec3::new(0.0, 0.0, -2.0),
        RobotId::Chef => Vec3::new(8.0, 0.0, -12.0),
        RobotId::Sparkle => Vec3::new(8.0, 0.0, 8.0),
    }
}

pub fn display_name(id: RobotId) -> &'static str {
    match id {
        RobotId::Sim => "Sim",
        RobotId::Chef => "Chef",
        RobotId::Sparkle => "Sparkle",
    }
}
