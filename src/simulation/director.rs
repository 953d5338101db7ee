//! Deterministic driver for the three event controllers
//!
//! `HomeSimulation` owns the world and one controller per category. `step`
//! advances the clock by a fixed number of sim-minutes and ticks every
//! controller once, in disaster, home-event, intruder order. The tokio
//! runtime uses the finer-grained `advance_clock`/`tick_category` pair so
//! each controller can run on its own cadence.

use serde::Serialize;
use tracing::info;

use crate::core::clock::TimePeriod;
use crate::core::config::EngineConfig;
use crate::core::error::Result;
use crate::core::random::SeededRandom;
use crate::core::types::{AlarmState, EventCategory, EventId, RoomId, SimMinutes};
use crate::events::disaster::DisasterRules;
use crate::events::engine::EventController;
use crate::events::home::HomeEventRules;
use crate::events::model::{
    DiaryEntry, EventKind, HistoryEntry, LiveEvent, LiveEventView, Notification, SecurityLogEntry,
};
use crate::events::security::{set_alarm_manually, SecurityRules};
use crate::world::access::SecurityPanel;
use crate::world::state::HomeWorld;

pub struct HomeSimulation {
    pub world: HomeWorld,
    config: EngineConfig,
    disaster: EventController<DisasterRules>,
    home: EventController<HomeEventRules>,
    intruder: EventController<SecurityRules>,
}

impl HomeSimulation {
    /// Build the world and controllers from a validated configuration
    ///
    /// Each controller draws from its own fork of the root RNG, so a seeded
    /// run replays regardless of how often the other controllers tick.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;

        let mut root = SeededRandom::from_optional_seed(config.seed);
        let epoch = config.clock.start_minutes;
        let world = HomeWorld::new(&config);

        let disaster = EventController::new(DisasterRules, &config, Box::new(root.fork()), epoch);
        let home = EventController::new(HomeEventRules, &config, Box::new(root.fork()), epoch);
        let intruder = EventController::new(
            SecurityRules::new(config.security.clone()),
            &config,
            Box::new(root.fork()),
            epoch,
        );

        info!(
            seed = ?config.seed,
            start = epoch,
            rate = config.clock.minutes_per_second,
            "home simulation created"
        );

        Ok(Self {
            world,
            config,
            disaster,
            home,
            intruder,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn now(&self) -> SimMinutes {
        self.world.clock.minutes()
    }

    /// Advance the clock by `minutes` and tick every controller once
    pub fn step(&mut self, minutes: SimMinutes) {
        self.world.clock.advance_minutes(minutes);
        for category in EventCategory::ALL {
            self.tick_category(category);
        }
    }

    /// Repeated `step`s of `step_minutes` until `total` sim-minutes pass
    pub fn run_for(&mut self, total: SimMinutes, step_minutes: SimMinutes) {
        if step_minutes <= 0.0 || self.world.clock.is_paused() {
            return;
        }
        let end = self.now() + total;
        while self.now() + step_minutes <= end + f64::EPSILON {
            self.step(step_minutes);
        }
    }

    /// Advance the clock by real elapsed seconds at the current rate
    pub fn advance_clock(&mut self, real_seconds: f64) {
        self.world.clock.advance(real_seconds);
    }

    pub fn tick_category(&mut self, category: EventCategory) {
        match category {
            EventCategory::Disaster => self.disaster.tick(&mut self.world),
            EventCategory::HomeEvent => self.home.tick(&mut self.world),
            EventCategory::Intruder => self.intruder.tick(&mut self.world),
        }
    }

    /// Spawn `kind` now through its category's controller
    pub fn force(&mut self, kind: EventKind, room: Option<RoomId>) -> Result<EventId> {
        match kind.category() {
            EventCategory::Disaster => self.disaster.trigger(kind, room, &mut self.world),
            EventCategory::HomeEvent => self.home.trigger(kind, room, &mut self.world),
            EventCategory::Intruder => self.intruder.trigger(kind, room, &mut self.world),
        }
    }

    /// Simulated minutes per real second; 0 pauses every controller
    pub fn set_rate(&mut self, rate: f64) {
        self.world.clock.set_rate(rate);
        info!(rate = self.world.clock.rate(), "simulation rate changed");
    }

    pub fn set_alarm(&mut self, state: AlarmState) {
        set_alarm_manually(&mut self.world, state);
    }

    pub fn live_event(&self, category: EventCategory) -> Option<&LiveEvent> {
        match category {
            EventCategory::Disaster => self.disaster.live(),
            EventCategory::HomeEvent => self.home.live(),
            EventCategory::Intruder => self.intruder.live(),
        }
    }

    /// Board snapshots of every live event, in category order
    pub fn live_views(&self) -> Vec<LiveEventView> {
        self.world.live_events().into_iter().cloned().collect()
    }

    pub fn report(&self) -> SimulationReport {
        SimulationReport {
            ended_at: self.now(),
            day: self.world.clock.day(),
            period: self.world.clock.time_period(),
            alarm: self.world.alarm_state(),
            live: self.live_views(),
            disasters: self.history(EventCategory::Disaster),
            home_events: self.history(EventCategory::HomeEvent),
            intruders: self.history(EventCategory::Intruder),
            notifications: self.world.notifications().cloned().collect(),
            security_log: self.world.security_log().cloned().collect(),
            diary: self.world.diary().cloned().collect(),
        }
    }

    fn history(&self, category: EventCategory) -> Vec<HistoryEntry> {
        self.world.history(category).into_iter().cloned().collect()
    }
}

/// Serializable dump of everything a run produced
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub ended_at: SimMinutes,
    pub day: u64,
    pub period: TimePeriod,
    pub alarm: AlarmState,
    pub live: Vec<LiveEventView>,
    pub disasters: Vec<HistoryEntry>,
    pub home_events: Vec<HistoryEntry>,
    pub intruders: Vec<HistoryEntry>,
    pub notifications: Vec<Notification>,
    pub security_log: Vec<SecurityLogEntry>,
    pub diary: Vec<DiaryEntry>,
}
