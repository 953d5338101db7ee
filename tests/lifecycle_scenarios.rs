//! End-to-end lifecycle scenarios
//!
//! Each scenario drives a single controller against an in-process
//! `HomeWorld` in one-minute steps and checks the observable side effects:
//! - disaster detection, escalation and room damage
//! - intruder detection tripping an armed alarm
//! - home-event resolution and archival
//! - detection and rally dropping autonomous work but keeping player commands
//! - events in an untracked room still running to archival

use simbot_events::core::config::EngineConfig;
use simbot_events::core::random::SeededRandom;
use simbot_events::core::types::{AlarmState, EventCategory, RobotId, RoomId};
use simbot_events::entity::tasks::{Task, TaskKind, TaskPriority};
use simbot_events::entity::RobotMood;
use simbot_events::events::model::{EventKind, Phase, SecurityLogKind, Severity};
use simbot_events::events::{CategoryRules, DisasterRules, EventController, HomeEventRules, SecurityRules};
use simbot_events::world::access::{LiveEventBoard, RobotStateReader, RoomStateReader, SecurityPanel};
use simbot_events::world::HomeWorld;

fn controller<R: CategoryRules>(rules: R, config: &EngineConfig, seed: u64) -> EventController<R> {
    EventController::new(
        rules,
        config,
        Box::new(SeededRandom::seed_from_u64(seed)),
        config.clock.start_minutes,
    )
}

fn step<R: CategoryRules>(world: &mut HomeWorld, controller: &mut EventController<R>) {
    world.clock.advance_minutes(1.0);
    controller.tick(world);
}

// ============================================================================
// Disaster
// ============================================================================

#[test]
fn test_fire_detected_by_robot_in_room_then_escalates() {
    let mut config = EngineConfig::default();
    config.clock.start_minutes = 0.0;
    let mut world = HomeWorld::new(&config);
    let mut fire = controller(DisasterRules, &config, 1);

    fire.trigger(EventKind::Fire, Some(RoomId::Kitchen), &mut world)
        .unwrap();
    let spawned = world.room_needs(RoomId::Kitchen).unwrap();
    assert_eq!(spawned.cleanliness, 65.0);

    step(&mut world, &mut fire);
    let event = fire.live().unwrap();
    assert_eq!(event.phase, Phase::Response);
    // Chef starts in the kitchen
    assert_eq!(event.detected_by, Some(RobotId::Chef));
    assert_eq!(world.robot(RobotId::Chef).unwrap().mood, RobotMood::Focused);

    for _ in 2..8 {
        step(&mut world, &mut fire);
        assert_eq!(fire.live().unwrap().severity, Severity::MIN);
    }

    step(&mut world, &mut fire);
    let event = fire.live().unwrap();
    assert_eq!(event.severity, Severity::new(2));
    assert!(event.progress < 100.0);

    let escalated = world.room_needs(RoomId::Kitchen).unwrap();
    assert_eq!(spawned.cleanliness - escalated.cleanliness, 20.0);
    assert_eq!(spawned.tidiness - escalated.tidiness, 15.0);

    let board = world.live(EventCategory::Disaster).unwrap();
    assert_eq!(board.severity, 2);
    assert_eq!(board.phase, "response");
}

// ============================================================================
// Intruder
// ============================================================================

#[test]
fn test_armed_alarm_trips_with_detection() {
    let mut config = EngineConfig::default();
    config.clock.start_minutes = 23.0 * 60.0;
    config.security.initial_alarm = AlarmState::ArmedAway;
    let mut world = HomeWorld::new(&config);
    let mut intruder = controller(SecurityRules::new(config.security.clone()), &config, 21);

    intruder
        .trigger(EventKind::Burglar, Some(RoomId::LivingRoom), &mut world)
        .unwrap();

    let mut detected = false;
    for _ in 0..3 {
        step(&mut world, &mut intruder);
        let event = intruder.live().unwrap();
        if event.phase == Phase::Response {
            assert!(event.alarm_triggered);
            assert_eq!(world.alarm_state(), AlarmState::Triggered);
            detected = true;
            break;
        }
        assert!(!event.alarm_triggered);
        assert_eq!(world.alarm_state(), AlarmState::ArmedAway);
    }
    assert!(detected);

    for _ in 0..20 {
        step(&mut world, &mut intruder);
    }
    assert!(intruder.live().is_none());

    let kinds: Vec<_> = world.security_log().map(|e| e.kind).collect();
    assert!(kinds.contains(&SecurityLogKind::AlarmTrigger));
    assert_eq!(kinds.last(), Some(&SecurityLogKind::IntruderResolved));
    assert!(world
        .notifications()
        .any(|n| n.title == "ALARM TRIGGERED"));

    // No automatic reset once the intruder is gone
    assert_eq!(world.alarm_state(), AlarmState::Triggered);
}

// ============================================================================
// Home events
// ============================================================================

#[test]
fn test_home_event_archived_after_resolution_dwell() {
    let mut config = EngineConfig::default();
    config.clock.start_minutes = 600.0;
    let mut world = HomeWorld::new(&config);
    let mut home = controller(HomeEventRules, &config, 4);

    let id = home
        .trigger(EventKind::PlumbingLeak, Some(RoomId::Bathroom), &mut world)
        .unwrap();

    let mut resolution_entered = None;
    let mut archived_at = None;
    for _ in 0..40 {
        step(&mut world, &mut home);
        match home.live() {
            Some(event) if event.phase == Phase::Resolution && resolution_entered.is_none() => {
                resolution_entered = Some(world.clock.minutes());
            }
            None => {
                archived_at = Some(world.clock.minutes());
                break;
            }
            _ => {}
        }
    }

    let entered = resolution_entered.unwrap();
    let archived = archived_at.unwrap();
    assert_eq!(archived - entered, 2.0);
    assert!(world.live(EventCategory::HomeEvent).is_none());

    let history = world.history(EventCategory::HomeEvent);
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, id);
    assert_eq!(history[0].resolved_at, archived);
    assert_eq!(history[0].peak_severity, None);
    assert_eq!(world.diary().count(), 1);
}

#[test]
fn test_untracked_room_event_still_archives() {
    let mut config = EngineConfig::default();
    config.clock.start_minutes = 600.0;
    let mut world = HomeWorld::new(&config);
    let mut home = controller(HomeEventRules, &config, 5);
    assert!(world.untrack_room(RoomId::Kitchen).is_some());

    let id = home
        .trigger(EventKind::PlumbingLeak, Some(RoomId::Kitchen), &mut world)
        .unwrap();
    for _ in 0..60 {
        step(&mut world, &mut home);
        if home.live().is_none() {
            break;
        }
    }

    assert!(home.live().is_none());
    assert!(world.room_needs(RoomId::Kitchen).is_none());
    let history = world.history(EventCategory::HomeEvent);
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, id);
    assert_eq!(world.diary().count(), 1);
}

// ============================================================================
// Task queues
// ============================================================================

fn queue_mixed_work(world: &mut HomeWorld) {
    for id in RobotId::ALL {
        let robot = world.robot_mut(id).unwrap();
        robot.tasks.push(Task::new(TaskKind::Cleaning, TaskPriority::Normal, 0.0));
        robot
            .tasks
            .push(Task::new(TaskKind::Cooking, TaskPriority::Normal, 0.0).from_player());
    }
}

fn queued(world: &HomeWorld, id: RobotId) -> usize {
    world.robot(id).unwrap().tasks.len()
}

#[test]
fn test_detection_and_rally_keep_player_commands() {
    let mut config = EngineConfig::default();
    config.clock.start_minutes = 0.0;
    let mut world = HomeWorld::new(&config);
    let mut fire = controller(DisasterRules, &config, 1);
    queue_mixed_work(&mut world);

    fire.trigger(EventKind::Fire, Some(RoomId::Kitchen), &mut world)
        .unwrap();
    step(&mut world, &mut fire);

    // Only the detector drops its autonomous work at detection
    assert_eq!(fire.live().unwrap().detected_by, Some(RobotId::Chef));
    assert_eq!(queued(&world, RobotId::Chef), 1);
    assert_eq!(queued(&world, RobotId::Sim), 2);
    assert_eq!(queued(&world, RobotId::Sparkle), 2);

    step(&mut world, &mut fire);
    step(&mut world, &mut fire);
    assert_eq!(fire.live().unwrap().responding.len(), RobotId::ALL.len());

    for id in RobotId::ALL {
        let tasks = &world.robot(id).unwrap().tasks;
        assert_eq!(tasks.len(), 1, "{id} kept autonomous work");
        assert!(!tasks.current().unwrap().is_autonomous());
    }
}
