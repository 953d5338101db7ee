//! Capability traits through which controllers read and mutate the world
//!
//! Controllers never own room, robot or sink state. Every read and write
//! goes through these traits so a controller can be driven against the
//! in-process `HomeWorld` or any test double.

use crate::core::types::{AlarmState, EventCategory, RobotId, RoomId, SimMinutes};
use crate::entity::needs::RoomNeeds;
use crate::entity::robot::{Robot, RobotMood};
use crate::events::model::{DiaryEntry, HistoryEntry, LiveEventView, Notification, SecurityLogEntry};
use crate::world::layout::HouseLayout;

pub trait ClockReader {
    fn sim_minutes(&self) -> SimMinutes;

    /// Simulated minutes per real second; 0 means paused
    fn sim_rate(&self) -> f64;

    fn is_paused(&self) -> bool {
        self.sim_rate() <= 0.0
    }
}

pub trait RoomStateReader {
    fn layout(&self) -> &HouseLayout;

    fn room_needs(&self, room: RoomId) -> Option<RoomNeeds>;

    /// Rooms with a need record
    fn tracked_rooms(&self) -> Vec<RoomId>;
}

pub trait RoomStateWriter {
    /// Apply signed deltas, clamped to [0, 100]
    ///
    /// Returns false when the room has no need record; the caller treats
    /// that as a skipped side effect.
    fn adjust_room(&mut self, room: RoomId, cleanliness: f32, tidiness: f32) -> bool;
}

pub trait RobotStateReader {
    fn robot(&self, id: RobotId) -> Option<&Robot>;

    /// Robots in `RobotId::ALL` order, skipping any that are absent
    fn robots(&self) -> Vec<&Robot> {
        RobotId::ALL.iter().filter_map(|id| self.robot(*id)).collect()
    }
}

pub trait RobotStateWriter {
    fn set_thought(&mut self, id: RobotId, thought: String);

    fn set_mood(&mut self, id: RobotId, mood: RobotMood);

    /// Drop the robot's queued autonomous tasks
    fn clear_queued_tasks(&mut self, id: RobotId);

    /// Signed happiness/boredom deltas, clamped to [0, 100]
    fn adjust_needs(&mut self, id: RobotId, happiness: f32, boredom: f32);
}

/// Output sinks
pub trait EventLog {
    fn notify(&mut self, notification: Notification);

    fn record_security(&mut self, entry: SecurityLogEntry);

    fn write_diary(&mut self, entry: DiaryEntry);

    fn archive(&mut self, entry: HistoryEntry);
}

/// Per-category live-event slots visible to every controller
pub trait LiveEventBoard {
    fn live(&self, category: EventCategory) -> Option<&LiveEventView>;

    /// Replace (or clear with `None`) the category's slot
    fn publish(&mut self, category: EventCategory, view: Option<LiveEventView>);
}

pub trait SecurityPanel {
    fn camera_installed(&self, room: RoomId) -> bool;

    fn alarm_state(&self) -> AlarmState;

    fn set_alarm_state(&mut self, state: AlarmState);

    fn patrol_enabled(&self) -> bool;
}

/// Everything a controller tick may touch
pub trait WorldAccess:
    ClockReader
    + RoomStateReader
    + RoomStateWriter
    + RobotStateReader
    + RobotStateWriter
    + EventLog
    + LiveEventBoard
    + SecurityPanel
{
}

impl<T> WorldAccess for T where
    T: ClockReader
        + RoomStateReader
        + RoomStateWriter
        + RobotStateReader
        + RobotStateWriter
        + EventLog
        + LiveEventBoard
        + SecurityPanel
{
}
