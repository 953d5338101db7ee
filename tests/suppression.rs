//! Cross-category spawn suppression
//!
//! Controllers only see each other through the live-event board. With the
//! default matrix a disaster waits for a home event to clear, an intruder
//! waits for both, and a home event ignores everything.

use simbot_events::core::config::{EngineConfig, SuppressionConfig};
use simbot_events::core::random::SeededRandom;
use simbot_events::core::types::{EventCategory, RoomId};
use simbot_events::events::model::EventKind;
use simbot_events::events::{CategoryRules, DisasterRules, EventController, HomeEventRules, SecurityRules};
use simbot_events::world::access::LiveEventBoard;
use simbot_events::world::HomeWorld;

const NIGHT: f64 = 23.0 * 60.0;

/// Config whose controllers want to spawn on every tick
fn eager(start: f64, suppression: SuppressionConfig) -> EngineConfig {
    let mut config = EngineConfig::default();
    config.clock.start_minutes = start;
    config.suppression = suppression;
    for tuning in [&mut config.disaster, &mut config.home_event, &mut config.intruder] {
        tuning.trigger_min_minutes = 0.0;
        tuning.trigger_max_minutes = 0.0;
    }
    config
}

fn controller<R: CategoryRules>(rules: R, config: &EngineConfig, seed: u64) -> EventController<R> {
    EventController::new(
        rules,
        config,
        Box::new(SeededRandom::seed_from_u64(seed)),
        config.clock.start_minutes,
    )
}

#[test]
fn test_disaster_waits_for_home_event() {
    let config = eager(600.0, SuppressionConfig::default());
    let mut world = HomeWorld::new(&config);
    let mut disaster = controller(DisasterRules, &config, 1);
    let mut home = controller(HomeEventRules, &config, 2);

    home.trigger(EventKind::PowerOutage, Some(RoomId::Hallway), &mut world)
        .unwrap();

    while home.live().is_some() {
        world.clock.advance_minutes(1.0);
        disaster.tick(&mut world);
        assert!(disaster.live().is_none());
        assert!(world.live(EventCategory::Disaster).is_none());
        home.tick(&mut world);
    }

    world.clock.advance_minutes(1.0);
    disaster.tick(&mut world);
    assert!(disaster.live().is_some());
}

#[test]
fn test_home_event_ignores_live_disaster_by_default() {
    let config = eager(600.0, SuppressionConfig::default());
    let mut world = HomeWorld::new(&config);
    let mut disaster = controller(DisasterRules, &config, 1);
    let mut home = controller(HomeEventRules, &config, 2);

    disaster
        .trigger(EventKind::Flood, Some(RoomId::Laundry), &mut world)
        .unwrap();
    world.clock.advance_minutes(1.0);
    home.tick(&mut world);

    assert!(home.live().is_some());
    assert!(disaster.live().is_some());
}

#[test]
fn test_symmetric_matrix_blocks_home_event() {
    let config = eager(600.0, SuppressionConfig::symmetric());
    let mut world = HomeWorld::new(&config);
    let mut disaster = controller(DisasterRules, &config, 1);
    let mut home = controller(HomeEventRules, &config, 2);

    disaster
        .trigger(EventKind::Earthquake, None, &mut world)
        .unwrap();
    for _ in 0..5 {
        world.clock.advance_minutes(1.0);
        home.tick(&mut world);
        assert!(home.live().is_none());
    }
}

#[test]
fn test_intruder_waits_for_disaster_and_home_event() {
    let config = eager(NIGHT, SuppressionConfig::default());
    let mut world = HomeWorld::new(&config);
    let mut disaster = controller(DisasterRules, &config, 1);
    let mut home = controller(HomeEventRules, &config, 2);
    let mut intruder = controller(SecurityRules::new(config.security.clone()), &config, 3);

    disaster
        .trigger(EventKind::Fire, Some(RoomId::Kitchen), &mut world)
        .unwrap();
    world.clock.advance_minutes(1.0);
    intruder.tick(&mut world);
    assert!(intruder.live().is_none());

    home.trigger(EventKind::PestInvasion, None, &mut world).unwrap();

    // Run the disaster to completion; the home event keeps blocking
    while disaster.live().is_some() {
        world.clock.advance_minutes(0.25);
        disaster.tick(&mut world);
        intruder.tick(&mut world);
        assert!(intruder.live().is_none());
    }
    assert!(home.live().is_some());

    while home.live().is_some() {
        world.clock.advance_minutes(1.0);
        home.tick(&mut world);
    }
    world.clock.advance_minutes(1.0);
    intruder.tick(&mut world);
    assert!(intruder.live().is_some());
}

#[test]
fn test_forced_trigger_bypasses_suppression() {
    let config = eager(NIGHT, SuppressionConfig::default());
    let mut world = HomeWorld::new(&config);
    let mut home = controller(HomeEventRules, &config, 2);
    let mut intruder = controller(SecurityRules::new(config.security.clone()), &config, 3);

    home.trigger(EventKind::PlumbingLeak, None, &mut world).unwrap();
    intruder
        .trigger(EventKind::Raccoon, Some(RoomId::Laundry), &mut world)
        .unwrap();
    assert!(intruder.live().is_some());
}
