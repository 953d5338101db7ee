//! HomeWorld - in-process world state shared by the event controllers

use ahash::{AHashMap, AHashSet};
use std::collections::VecDeque;

use crate::core::clock::SimClock;
use crate::core::config::EngineConfig;
use crate::core::types::{AlarmState, EventCategory, RobotId, RoomId, SimMinutes};
use crate::entity::needs::{NeedType, RoomNeeds};
use crate::entity::robot::{Robot, RobotMood};
use crate::events::model::{DiaryEntry, HistoryEntry, LiveEventView, Notification, SecurityLogEntry};
use crate::world::access::{
    ClockReader, EventLog, LiveEventBoard, RobotStateReader, RobotStateWriter, RoomStateReader,
    RoomStateWriter, SecurityPanel,
};
use crate::world::layout::HouseLayout;

/// Rooms, robots, alarm panel and output sinks of one household
pub struct HomeWorld {
    pub clock: SimClock,
    layout: HouseLayout,
    rooms: AHashMap<RoomId, RoomNeeds>,
    robots: AHashMap<RobotId, Robot>,
    live: AHashMap<EventCategory, LiveEventView>,
    cameras: AHashSet<RoomId>,
    alarm: AlarmState,
    patrol_enabled: bool,
    log_cap: usize,
    histories: AHashMap<EventCategory, VecDeque<HistoryEntry>>,
    notifications: VecDeque<Notification>,
    security_log: VecDeque<SecurityLogEntry>,
    diary: VecDeque<DiaryEntry>,
}

impl HomeWorld {
    pub fn new(config: &EngineConfig) -> Self {
        let rooms = RoomId::INDOOR
            .iter()
            .map(|room| (*room, RoomNeeds::default()))
            .collect();
        let robots = RobotId::ALL.iter().map(|id| (*id, Robot::new(*id))).collect();

        Self {
            clock: SimClock::new(config.clock.start_minutes, config.clock.minutes_per_second),
            layout: HouseLayout::default(),
            rooms,
            robots,
            live: AHashMap::new(),
            cameras: config.security.installed_cameras.iter().copied().collect(),
            alarm: config.security.initial_alarm,
            patrol_enabled: config.security.patrol_enabled,
            log_cap: config.history_cap,
            histories: AHashMap::new(),
            notifications: VecDeque::new(),
            security_log: VecDeque::new(),
            diary: VecDeque::new(),
        }
    }

    pub fn robot_mut(&mut self, id: RobotId) -> Option<&mut Robot> {
        self.robots.get_mut(&id)
    }

    /// Stop tracking a room; later side effects on it are skipped
    pub fn untrack_room(&mut self, room: RoomId) -> Option<RoomNeeds> {
        self.rooms.remove(&room)
    }

    pub fn install_camera(&mut self, room: RoomId) {
        self.cameras.insert(room);
    }

    /// Resolved events of a category, oldest first
    pub fn history(&self, category: EventCategory) -> Vec<&HistoryEntry> {
        self.histories
            .get(&category)
            .map(|log| log.iter().collect())
            .unwrap_or_default()
    }

    pub fn notifications(&self) -> impl Iterator<Item = &Notification> + '_ {
        self.notifications.iter()
    }

    pub fn security_log(&self) -> impl Iterator<Item = &SecurityLogEntry> + '_ {
        self.security_log.iter()
    }

    pub fn diary(&self) -> impl Iterator<Item = &DiaryEntry> + '_ {
        self.diary.iter()
    }

    pub fn live_events(&self) -> Vec<&LiveEventView> {
        EventCategory::ALL
            .iter()
            .filter_map(|category| self.live.get(category))
            .collect()
    }
}

fn push_capped<T>(log: &mut VecDeque<T>, item: T, cap: usize) {
    log.push_back(item);
    while log.len() > cap {
        log.pop_front();
    }
}

impl ClockReader for HomeWorld {
    fn sim_minutes(&self) -> SimMinutes {
        self.clock.minutes()
    }

    fn sim_rate(&self) -> f64 {
        self.clock.rate()
    }
}

impl RoomStateReader for HomeWorld {
    fn layout(&self) -> &HouseLayout {
        &self.layout
    }

    fn room_needs(&self, room: RoomId) -> Option<RoomNeeds> {
        self.rooms.get(&room).copied()
    }

    fn tracked_rooms(&self) -> Vec<RoomId> {
        let mut rooms: Vec<RoomId> = self.rooms.keys().copied().collect();
        rooms.sort();
        rooms
    }
}

impl RoomStateWriter for HomeWorld {
    fn adjust_room(&mut self, room: RoomId, cleanliness: f32, tidiness: f32) -> bool {
        match self.rooms.get_mut(&room) {
            Some(needs) => {
                needs.apply(cleanliness, tidiness);
                true
            }
            None => false,
        }
    }
}

impl RobotStateReader for HomeWorld {
    fn robot(&self, id: RobotId) -> Option<&Robot> {
        self.robots.get(&id)
    }
}

impl RobotStateWriter for HomeWorld {
    fn set_thought(&mut self, id: RobotId, thought: String) {
        if let Some(robot) = self.robots.get_mut(&id) {
            robot.thought = thought;
        }
    }

    fn set_mood(&mut self, id: RobotId, mood: RobotMood) {
        if let Some(robot) = self.robots.get_mut(&id) {
            robot.mood = mood;
        }
    }

    fn clear_queued_tasks(&mut self, id: RobotId) {
        if let Some(robot) = self.robots.get_mut(&id) {
            robot.tasks.clear_autonomous();
        }
    }

    fn adjust_needs(&mut self, id: RobotId, happiness: f32, boredom: f32) {
        if let Some(robot) = self.robots.get_mut(&id) {
            robot.needs.adjust(NeedType::Happiness, happiness);
            robot.needs.adjust(NeedType::Boredom, boredom);
        }
    }
}

impl EventLog for HomeWorld {
    fn notify(&mut self, notification: Notification) {
        push_capped(&mut self.notifications, notification, self.log_cap);
    }

    fn record_security(&mut self, entry: SecurityLogEntry) {
        push_capped(&mut self.security_log, entry, self.log_cap);
    }

    fn write_diary(&mut self, entry: DiaryEntry) {
        push_capped(&mut self.diary, entry, self.log_cap);
    }

    fn archive(&mut self, entry: HistoryEntry) {
        let log = self.histories.entry(entry.category).or_default();
        push_capped(log, entry, self.log_cap);
    }
}

impl LiveEventBoard for HomeWorld {
    fn live(&self, category: EventCategory) -> Option<&LiveEventView> {
        self.live.get(&category)
    }

    fn publish(&mut self, category: EventCategory, view: Option<LiveEventView>) {
        match view {
            Some(view) => {
                self.live.insert(category, view);
            }
            None => {
                self.live.remove(&category);
            }
        }
    }
}

impl SecurityPanel for HomeWorld {
    fn camera_installed(&self, room: RoomId) -> bool {
        self.cameras.contains(&room)
    }

    fn alarm_state(&self) -> AlarmState {
        self.alarm
    }

    fn set_alarm_state(&mut self, state: AlarmState) {
        self.alarm = state;
    }

    fn patrol_enabled(&self) -> bool {
        self.patrol_enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::EventId;
    use crate::events::model::EventKind;

    fn world() -> HomeWorld {
        HomeWorld::new(&EngineConfig::default())
    }

    #[test]
    fn test_indoor_rooms_tracked_yard_not() {
        let world = world();
        assert_eq!(world.tracked_rooms().len(), 6);
        assert!(world.room_needs(RoomId::Yard).is_none());
    }

    #[test]
    fn test_adjust_missing_room_is_skipped() {
        let mut world = world();
        assert!(!world.adjust_room(RoomId::Yard, -10.0, -10.0));
        assert!(world.adjust_room(RoomId::Kitchen, -200.0, 50.0));
        let kitchen = world.room_needs(RoomId::Kitchen).unwrap();
        assert_eq!(kitchen.cleanliness, 0.0);
        assert_eq!(kitchen.tidiness, 100.0);
    }

    #[test]
    fn test_history_is_capped_oldest_first_dropped() {
        let mut config = EngineConfig::default();
        config.history_cap = 2;
        let mut world = HomeWorld::new(&config);

        for i in 0..3 {
            world.archive(HistoryEntry {
                id: EventId::new(),
                kind: EventKind::PowerOutage,
                category: EventCategory::HomeEvent,
                room: RoomId::Hallway,
                started_at: i as f64,
                resolved_at: i as f64 + 1.0,
                detected_by: RobotId::Sim,
                responders: vec![RobotId::Sim],
                peak_severity: None,
            });
        }

        let history = world.history(EventCategory::HomeEvent);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].started_at, 1.0);
        assert!(world.history(EventCategory::Disaster).is_empty());
    }

    #[test]
    fn test_robots_listed_in_fixed_order() {
        let world = world();
        let ids: Vec<RobotId> = world.robots().iter().map(|r| r.id).collect();
        assert_eq!(ids, RobotId::ALL.to_vec());
    }
}
