//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Simulated minutes (simulation time unit)
///
/// Fractional because the clock advances by `rate * real_seconds`.
pub type SimMinutes = f64;

/// Unique identifier for live events and their history entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub Uuid);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Build an id from externally supplied random bytes (seeded runs)
    pub fn from_random_bytes(bytes: [u8; 16]) -> Self {
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The household robots
///
/// `RobotId::ALL` is the fixed iteration order used by responder selection
/// and rallies. Assignment order is stable, not rotating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RobotId {
    Sim,
    Chef,
    Sparkle,
}

impl RobotId {
    pub const ALL: [RobotId; 3] = [RobotId::Sim, RobotId::Chef, RobotId::Sparkle];

    pub fn as_str(&self) -> &'static str {
        match self {
            RobotId::Sim => "sim",
            RobotId::Chef => "chef",
            RobotId::Sparkle => "sparkle",
        }
    }
}

impl std::fmt::Display for RobotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rooms of the house
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoomId {
    LivingRoom,
    Kitchen,
    Hallway,
    Laundry,
    Bedroom,
    Bathroom,
    Yard,
}

impl RoomId {
    /// Rooms with tracked cleanliness/tidiness
    pub const INDOOR: [RoomId; 6] = [
        RoomId::LivingRoom,
        RoomId::Kitchen,
        RoomId::Hallway,
        RoomId::Laundry,
        RoomId::Bedroom,
        RoomId::Bathroom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomId::LivingRoom => "living-room",
            RoomId::Kitchen => "kitchen",
            RoomId::Hallway => "hallway",
            RoomId::Laundry => "laundry",
            RoomId::Bedroom => "bedroom",
            RoomId::Bathroom => "bathroom",
            RoomId::Yard => "yard",
        }
    }

    /// Human-readable room name used in banners and diary lines
    pub fn display_name(&self) -> &'static str {
        match self {
            RoomId::LivingRoom => "Living Room",
            RoomId::Kitchen => "Kitchen",
            RoomId::Hallway => "Hallway",
            RoomId::Laundry => "Laundry",
            RoomId::Bedroom => "Bedroom",
            RoomId::Bathroom => "Bathroom",
            RoomId::Yard => "Yard",
        }
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RoomId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "living-room" => Ok(RoomId::LivingRoom),
            "kitchen" => Ok(RoomId::Kitchen),
            "hallway" => Ok(RoomId::Hallway),
            "laundry" => Ok(RoomId::Laundry),
            "bedroom" => Ok(RoomId::Bedroom),
            "bathroom" => Ok(RoomId::Bathroom),
            "yard" => Ok(RoomId::Yard),
            other => Err(format!("unknown room: {other}")),
        }
    }
}

/// Event categories, one live event slot each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventCategory {
    Disaster,
    HomeEvent,
    Intruder,
}

impl EventCategory {
    pub const ALL: [EventCategory; 3] = [
        EventCategory::Disaster,
        EventCategory::HomeEvent,
        EventCategory::Intruder,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Disaster => "disaster",
            EventCategory::HomeEvent => "home-event",
            EventCategory::Intruder => "intruder",
        }
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alarm panel state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlarmState {
    #[default]
    Disarmed,
    ArmedAway,
    ArmedHome,
    Triggered,
}

impl AlarmState {
    pub fn is_armed(&self) -> bool {
        matches!(self, AlarmState::ArmedAway | AlarmState::ArmedHome)
    }
}

impl std::str::FromStr for AlarmState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disarmed" => Ok(AlarmState::Disarmed),
            "armed-away" => Ok(AlarmState::ArmedAway),
            "armed-home" => Ok(AlarmState::ArmedHome),
            "triggered" => Ok(AlarmState::Triggered),
            other => Err(format!("unknown alarm state: {other}")),
        }
    }
}

/// 3D position (y is up; the floor plane is x/z)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Distance from the world origin on the floor plane
    pub fn floor_length(&self) -> f32 {
        (self.x * self.x + self.z * self.z).sqrt()
    }

    /// Distance to a floor-plane point
    pub fn floor_distance(&self, x: f32, z: f32) -> f32 {
        let dx = self.x - x;
        let dz = self.z - z;
        (dx * dx + dz * dz).sqrt()
    }
}
