//! Home security: intruders, cameras, the alarm panel and night patrol
//!
//! Intruders spawn only at night (by default). A camera in the target room
//! may spot the intruder on arrival, which shortens detection. An armed
//! alarm trips when a robot confirms the intruder and halves the flee time.
//!
//! The ambient hook also runs the night routines every tick: auto-arming a
//! disarmed panel when night falls, and walking the patrol route.

use tracing::{debug, info};

use crate::core::clock::is_night;
use crate::core::config::{CategoryTuning, SecurityConfig};
use crate::core::random::RandomSource;
use crate::core::types::{AlarmState, EventCategory, SimMinutes};
use crate::entity::robot::{display_name, RobotActivity};
use crate::events::catalog::EventProfile;
use crate::events::engine::CategoryRules;
use crate::events::model::{LiveEvent, Notification, NotificationLevel, SecurityLogEntry, SecurityLogKind};
use crate::world::access::WorldAccess;

#[derive(Debug, Clone)]
pub struct SecurityRules {
    config: SecurityConfig,
    was_night: bool,
    patrol_index: usize,
    last_patrol: SimMinutes,
}

impl SecurityRules {
    pub fn new(config: SecurityConfig) -> Self {
        Self {
            config,
            was_night: false,
            patrol_index: 0,
            last_patrol: 0.0,
        }
    }

    /// Index of the next room on the patrol route
    pub fn patrol_index(&self) -> usize {
        self.patrol_index
    }

    fn auto_arm(&mut self, world: &mut dyn WorldAccess, now: SimMinutes, night: bool) {
        if night && !self.was_night && self.config.auto_arm_at_night && world.alarm_state() == AlarmState::Disarmed {
            set_alarm(world, AlarmState::ArmedHome);
            world.record_security(SecurityLogEntry {
                at: now,
                kind: SecurityLogKind::AlarmArm,
                message: "Alarm auto-armed for night mode".to_string(),
                room: None,
            });
            world.notify(Notification {
                at: now,
                level: NotificationLevel::Info,
                title: "Security".to_string(),
                message: "Alarm auto-armed for night.".to_string(),
            });
        }
        self.was_night = night;
    }

    fn patrol(&mut self, world: &mut dyn WorldAccess, now: SimMinutes) {
        if now - self.last_patrol < self.config.patrol_wait_minutes || self.config.patrol_route.is_empty() {
            return;
        }

        let route = &self.config.patrol_route;
        let room = route[self.patrol_index % route.len()];
        self.patrol_index = (self.patrol_index + 1) % route.len();
        self.last_patrol = now;

        let min_battery = self.config.patrol_min_battery;
        let patroller = world
            .robots()
            .into_iter()
            .find(|r| r.activity == RobotActivity::Idle && !r.is_charging && r.battery > min_battery)
            .map(|r| r.id);

        let Some(robot) = patroller else {
            debug!(room = %room, "no robot free to patrol");
            return;
        };

        world.set_thought(robot, format!("Patrolling {}... all clear so far.", room.display_name()));
        world.record_security(SecurityLogEntry {
            at: now,
            kind: SecurityLogKind::PatrolCheck,
            message: format!("{} checked {}", display_name(robot), room.display_name()),
            room: Some(room),
        });
    }
}

impl Default for SecurityRules {
    fn default() -> Self {
        Self::new(SecurityConfig::default())
    }
}

impl CategoryRules for SecurityRules {
    fn category(&self) -> EventCategory {
        EventCategory::Intruder
    }

    fn ambient(&mut self, world: &mut dyn WorldAccess, live: Option<&LiveEvent>) {
        let now = world.sim_minutes();
        let night = is_night(now);

        self.auto_arm(world, now, night);

        if world.patrol_enabled() && night && live.is_none() {
            self.patrol(world, now);
        }
    }

    fn may_spawn(&self, world: &dyn WorldAccess) -> bool {
        !self.config.night_only_intruders || is_night(world.sim_minutes())
    }

    fn on_spawn(
        &mut self,
        event: &mut LiveEvent,
        profile: &EventProfile,
        world: &mut dyn WorldAccess,
        rng: &mut dyn RandomSource,
    ) {
        let room = event.room.display_name();
        event.camera_detected = world.camera_installed(event.room) && rng.unit() > profile.stealth;

        if event.camera_detected {
            world.record_security(SecurityLogEntry {
                at: event.started_at,
                kind: SecurityLogKind::CameraMotion,
                message: format!("{} Camera detected motion in {room}: {}!", profile.emoji, profile.label),
                room: Some(event.room),
            });
        }
        world.record_security(SecurityLogEntry {
            at: event.started_at,
            kind: SecurityLogKind::IntruderDetected,
            message: format!("{} {} detected in {room}!", profile.emoji, profile.label),
            room: Some(event.room),
        });
    }

    fn detection_dwell(&self, event: &LiveEvent, tuning: &CategoryTuning) -> f64 {
        if event.camera_detected {
            tuning.sensor_detection_dwell
        } else {
            tuning.detection_dwell
        }
    }

    fn on_detected(&mut self, event: &mut LiveEvent, profile: &EventProfile, world: &mut dyn WorldAccess) {
        if !world.alarm_state().is_armed() {
            return;
        }

        let now = world.sim_minutes();
        set_alarm(world, AlarmState::Triggered);
        event.alarm_triggered = true;

        world.record_security(SecurityLogEntry {
            at: now,
            kind: SecurityLogKind::AlarmTrigger,
            message: "ALARM TRIGGERED — intruder detected!".to_string(),
            room: Some(event.room),
        });
        world.notify(Notification {
            at: now,
            level: NotificationLevel::Warning,
            title: "ALARM TRIGGERED".to_string(),
            message: format!("{} {} in {}!", profile.emoji, profile.label, event.room.display_name()),
        });
    }

    fn on_resolved(&mut self, event: &LiveEvent, profile: &EventProfile, world: &mut dyn WorldAccess) {
        let now = world.sim_minutes();
        world.record_security(SecurityLogEntry {
            at: now,
            kind: SecurityLogKind::IntruderResolved,
            message: format!(
                "{} {} chased away from {}",
                profile.emoji,
                profile.label,
                event.room.display_name()
            ),
            room: Some(event.room),
        });
    }
}

fn set_alarm(world: &mut dyn WorldAccess, state: AlarmState) {
    let previous = world.alarm_state();
    if previous != state {
        world.set_alarm_state(state);
        info!(from = ?previous, to = ?state, "alarm state changed");
    }
}

/// Change the alarm from the control panel, logging arm/disarm entries
pub fn set_alarm_manually(world: &mut dyn WorldAccess, state: AlarmState) {
    let now = world.sim_minutes();
    let (kind, message) = match state {
        AlarmState::Disarmed => (SecurityLogKind::AlarmDisarm, "Alarm disarmed"),
        AlarmState::ArmedAway => (SecurityLogKind::AlarmArm, "Alarm armed (away)"),
        AlarmState::ArmedHome => (SecurityLogKind::AlarmArm, "Alarm armed (home)"),
        AlarmState::Triggered => (SecurityLogKind::AlarmTrigger, "Alarm triggered manually"),
    };
    set_alarm(world, state);
    world.record_security(SecurityLogEntry {
        at: now,
        kind,
        message: message.to_string(),
        room: None,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::MINUTES_PER_DAY;
    use crate::core::config::EngineConfig;
    use crate::core::random::ScriptedRandom;
    use crate::core::types::{RobotId, RoomId};
    use crate::events::engine::EventController;
    use crate::events::model::{EventKind, Phase};
    use crate::world::access::{RobotStateReader, SecurityPanel};
    use crate::world::state::HomeWorld;

    const NIGHT: f64 = 23.0 * 60.0;

    fn setup(start: f64, config: EngineConfig, roll: f64) -> (HomeWorld, EventController<SecurityRules>) {
        let mut config = config;
        config.clock.start_minutes = start;
        let world = HomeWorld::new(&config);
        let controller = EventController::new(
            SecurityRules::new(config.security.clone()),
            &config,
            Box::new(ScriptedRandom::constant(roll)),
            start,
        );
        (world, controller)
    }

    fn security_kinds(world: &HomeWorld) -> Vec<SecurityLogKind> {
        world.security_log().map(|e| e.kind).collect()
    }

    #[test]
    fn test_auto_arm_on_entering_night() {
        let (mut world, mut controller) = setup(21.0 * 60.0 + 58.0, EngineConfig::default(), 0.5);

        world.clock.advance_minutes(1.0);
        controller.tick(&mut world);
        assert_eq!(world.alarm_state(), AlarmState::Disarmed);

        world.clock.advance_minutes(1.0);
        controller.tick(&mut world);
        assert_eq!(world.alarm_state(), AlarmState::ArmedHome);
        assert_eq!(security_kinds(&world), vec![SecurityLogKind::AlarmArm]);

        // Only the transition arms; a manual disarm sticks for the night
        set_alarm_manually(&mut world, AlarmState::Disarmed);
        world.clock.advance_minutes(1.0);
        controller.tick(&mut world);
        assert_eq!(world.alarm_state(), AlarmState::Disarmed);
    }

    #[test]
    fn test_no_intruders_during_the_day() {
        let mut config = EngineConfig::default();
        config.intruder.trigger_min_minutes = 0.0;
        config.intruder.trigger_max_minutes = 0.0;
        let (mut world, mut controller) = setup(10.0 * 60.0, config, 0.5);

        for _ in 0..60 {
            world.clock.advance_minutes(1.0);
            controller.tick(&mut world);
        }
        assert!(controller.live().is_none());
    }

    #[test]
    fn test_camera_detection_beats_stealth() {
        // prankster stealth is 0.4
        let (mut world, mut controller) = setup(NIGHT, EngineConfig::default(), 0.9);
        assert!(!world.camera_installed(RoomId::Bedroom));
        world.install_camera(RoomId::Bedroom);

        controller
            .trigger(EventKind::Prankster, Some(RoomId::Bedroom), &mut world)
            .unwrap();
        let event = controller.live().unwrap();
        assert!(event.camera_detected);
        assert_eq!(
            security_kinds(&world),
            vec![SecurityLogKind::CameraMotion, SecurityLogKind::IntruderDetected]
        );
    }

    #[test]
    fn test_camera_miss_when_roll_below_stealth() {
        let (mut world, mut controller) = setup(NIGHT, EngineConfig::default(), 0.2);
        controller
            .trigger(EventKind::Burglar, Some(RoomId::LivingRoom), &mut world)
            .unwrap();
        assert!(!controller.live().unwrap().camera_detected);
    }

    #[test]
    fn test_camera_detection_shortens_detection_dwell() {
        let (mut world, mut controller) = setup(NIGHT, EngineConfig::default(), 0.99);
        controller
            .trigger(EventKind::Burglar, Some(RoomId::LivingRoom), &mut world)
            .unwrap();
        assert!(controller.live().unwrap().camera_detected);

        world.clock.advance_minutes(0.5);
        controller.tick(&mut world);
        assert_eq!(controller.live().unwrap().phase, Phase::Response);
    }

    #[test]
    fn test_unarmed_alarm_does_not_trigger() {
        let mut config = EngineConfig::default();
        config.security.auto_arm_at_night = false;
        let (mut world, mut controller) = setup(NIGHT, config, 0.5);
        controller
            .trigger(EventKind::Raccoon, Some(RoomId::Kitchen), &mut world)
            .unwrap();

        for _ in 0..2 {
            world.clock.advance_minutes(1.0);
            controller.tick(&mut world);
        }

        let event = controller.live().unwrap();
        assert_eq!(event.phase, Phase::Response);
        assert!(!event.alarm_triggered);
        assert_eq!(world.alarm_state(), AlarmState::Disarmed);
    }

    #[test]
    fn test_patrol_walks_route_with_first_idle_robot() {
        let mut config = EngineConfig::default();
        config.security.patrol_enabled = true;
        let (mut world, mut controller) = setup(NIGHT, config, 0.5);
        if let Some(sim) = world.robot_mut(RobotId::Sim) {
            sim.activity = RobotActivity::Working;
        }

        world.clock.advance_minutes(1.0);
        controller.tick(&mut world);

        let chef = world.robot(RobotId::Chef).unwrap();
        assert_eq!(chef.thought, "Patrolling Hallway... all clear so far.");
        assert_eq!(controller.rules().patrol_index(), 1);

        // Next check waits for the per-room dwell
        world.clock.advance_minutes(1.0);
        controller.tick(&mut world);
        assert_eq!(controller.rules().patrol_index(), 1);

        world.clock.advance_minutes(2.0);
        controller.tick(&mut world);
        assert_eq!(controller.rules().patrol_index(), 2);
        let chef = world.robot(RobotId::Chef).unwrap();
        assert_eq!(chef.thought, "Patrolling Living Room... all clear so far.");
    }

    #[test]
    fn test_patrol_index_advances_without_patroller() {
        let mut config = EngineConfig::default();
        config.security.patrol_enabled = true;
        let (mut world, mut controller) = setup(MINUTES_PER_DAY + NIGHT, config, 0.5);
        for id in RobotId::ALL {
            if let Some(robot) = world.robot_mut(id) {
                robot.battery = 10.0;
            }
        }

        world.clock.advance_minutes(1.0);
        controller.tick(&mut world);

        assert_eq!(controller.rules().patrol_index(), 1);
        assert!(!security_kinds(&world).contains(&SecurityLogKind::PatrolCheck));
    }
}
