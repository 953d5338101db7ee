//! Generic event lifecycle engine
//!
//! One `EventController` per category drives at most one live event
//! through detection, response and resolution. Category differences live
//! in the static catalog (impacts, gating, escalation) and in a small set
//! of `CategoryRules` hooks.
//!
//! All timing is measured from absolute sim-minute stamps, so a missed
//! tick is absorbed by the next one. A paused clock makes `tick` a no-op.

use tracing::{debug, info, trace};

use crate::core::clock::format_clock;
use crate::core::config::{CategoryTuning, EngineConfig, SecurityConfig};
use crate::core::error::{Result, SimBotError};
use crate::core::random::{pick, RandomSource};
use crate::core::types::{EventCategory, EventId, RobotId, RoomId, SimMinutes};
use crate::entity::robot::RobotMood;
use crate::events::catalog::{self, EventProfile, ResponseGate, ThoughtPool};
use crate::events::model::{
    DiaryEntry, EventKind, LiveEvent, LiveEventView, Notification, NotificationLevel, Phase,
    Severity,
};
use crate::events::responders::{metric_for, rally_candidates, select_detector, DistanceMetric};
use crate::world::access::WorldAccess;

/// Category-specific policy hooks
///
/// Every hook has a no-op default; a category overrides only what differs.
pub trait CategoryRules: Send {
    fn category(&self) -> EventCategory;

    /// Runs on every unpaused tick before the lifecycle step
    fn ambient(&mut self, _world: &mut dyn WorldAccess, _live: Option<&LiveEvent>) {}

    /// Extra spawn condition on top of the trigger delay and suppression
    fn may_spawn(&self, _world: &dyn WorldAccess) -> bool {
        true
    }

    /// Called once the new event exists and its room damage is applied
    fn on_spawn(
        &mut self,
        _event: &mut LiveEvent,
        _profile: &EventProfile,
        _world: &mut dyn WorldAccess,
        _rng: &mut dyn RandomSource,
    ) {
    }

    fn detection_dwell(&self, _event: &LiveEvent, tuning: &CategoryTuning) -> f64 {
        tuning.detection_dwell
    }

    /// Called in the same tick the event enters the response phase
    fn on_detected(&mut self, _event: &mut LiveEvent, _profile: &EventProfile, _world: &mut dyn WorldAccess) {}

    /// Called in the tick the response gate opens and resolution begins
    fn on_resolution_started(&mut self, _event: &LiveEvent, _profile: &EventProfile, _world: &mut dyn WorldAccess) {}

    /// Called just before the event is archived
    fn on_resolved(&mut self, _event: &LiveEvent, _profile: &EventProfile, _world: &mut dyn WorldAccess) {}
}

/// Intruder flee-time parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FleeTuning {
    pub floor_minutes: f64,
    pub per_responder: f64,
    pub alarm_multiplier: f64,
}

impl FleeTuning {
    pub fn from_security(security: &SecurityConfig) -> Self {
        Self {
            floor_minutes: security.flee_floor_minutes,
            per_responder: security.flee_per_responder,
            alarm_multiplier: security.alarm_flee_multiplier,
        }
    }

    /// `max(floor, base × (multiplier if alarm) − responders × per_responder)`
    pub fn resolve_minutes(&self, base_minutes: f64, alarm_triggered: bool, responders: usize) -> f64 {
        let base = if alarm_triggered {
            base_minutes * self.alarm_multiplier
        } else {
            base_minutes
        };
        (base - responders as f64 * self.per_responder).max(self.floor_minutes)
    }
}

pub struct EventController<R: CategoryRules> {
    rules: R,
    tuning: CategoryTuning,
    blocked_by: Vec<EventCategory>,
    rally_battery_floor: f32,
    flee: FleeTuning,
    metric: Box<dyn DistanceMetric>,
    rng: Box<dyn RandomSource + Send>,
    live: Option<LiveEvent>,
    last_trigger: SimMinutes,
    next_delay: SimMinutes,
    phase_started: SimMinutes,
    last_escalation: SimMinutes,
}

impl<R: CategoryRules> EventController<R> {
    /// `epoch` is the sim-minute the first trigger delay counts from
    pub fn new(
        rules: R,
        config: &EngineConfig,
        mut rng: Box<dyn RandomSource + Send>,
        epoch: SimMinutes,
    ) -> Self {
        let category = rules.category();
        let tuning = config.tuning(category).clone();
        let next_delay = rng.range(tuning.trigger_min_minutes, tuning.trigger_max_minutes);

        Self {
            rules,
            tuning,
            blocked_by: config.suppression.blocked_by(category).to_vec(),
            rally_battery_floor: config.rally_battery_floor,
            flee: FleeTuning::from_security(&config.security),
            metric: metric_for(config.responder_distance),
            rng,
            live: None,
            last_trigger: epoch,
            next_delay,
            phase_started: epoch,
            last_escalation: epoch,
        }
    }

    /// Swap the responder distance metric
    pub fn with_metric(mut self, metric: Box<dyn DistanceMetric>) -> Self {
        self.metric = metric;
        self
    }

    pub fn category(&self) -> EventCategory {
        self.rules.category()
    }

    pub fn live(&self) -> Option<&LiveEvent> {
        self.live.as_ref()
    }

    /// Sim-minutes after the last trigger before the next spawn attempt
    pub fn next_delay(&self) -> SimMinutes {
        self.next_delay
    }

    pub fn last_trigger(&self) -> SimMinutes {
        self.last_trigger
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn tick(&mut self, world: &mut dyn WorldAccess) {
        if world.is_paused() {
            trace!(category = %self.category(), "paused, tick skipped");
            return;
        }
        let now = world.sim_minutes();

        self.rules.ambient(world, self.live.as_ref());

        match self.live.take() {
            None => self.try_spawn(now, world),
            Some(mut event) => {
                if self.advance(&mut event, now, world) {
                    self.live = Some(event);
                }
            }
        }
    }

    /// Spawn a specific event now, bypassing the delay and suppression
    ///
    /// A random target room is used when `room` is `None`.
    pub fn trigger(
        &mut self,
        kind: EventKind,
        room: Option<RoomId>,
        world: &mut dyn WorldAccess,
    ) -> Result<EventId> {
        let category = self.category();
        if kind.category() != category {
            return Err(SimBotError::CategoryMismatch {
                kind: kind.to_string(),
                category: category.to_string(),
            });
        }
        if self.live.is_some() {
            return Err(SimBotError::EventAlreadyLive(category.to_string()));
        }

        let profile = catalog::profile(kind);
        let room = match room {
            Some(room) if profile.target_rooms.contains(&room) => room,
            Some(room) => {
                return Err(SimBotError::RoomNotTargeted {
                    kind: kind.to_string(),
                    room: room.to_string(),
                })
            }
            None => *pick(self.rng.as_mut(), profile.target_rooms)
                .ok_or_else(|| SimBotError::UnknownEventKind(kind.to_string()))?,
        };

        let now = world.sim_minutes();
        Ok(self.spawn(kind, room, now, world))
    }

    fn try_spawn(&mut self, now: SimMinutes, world: &mut dyn WorldAccess) {
        if now - self.last_trigger < self.next_delay {
            return;
        }
        if let Some(blocker) = self.blocked_by.iter().find(|c| world.live(**c).is_some()) {
            debug!(category = %self.category(), blocker = %blocker, "spawn suppressed");
            return;
        }
        if !self.rules.may_spawn(&*world) {
            return;
        }

        let category = self.category();
        let Some(&kind) = pick(self.rng.as_mut(), EventKind::of_category(category)) else {
            return;
        };
        let Some(&room) = pick(self.rng.as_mut(), catalog::profile(kind).target_rooms) else {
            return;
        };
        self.spawn(kind, room, now, world);
    }

    fn spawn(&mut self, kind: EventKind, room: RoomId, now: SimMinutes, world: &mut dyn WorldAccess) -> EventId {
        let profile = catalog::profile(kind);
        let mut event = LiveEvent::new(self.rng.event_id(), kind, room, now);

        let (cleanliness, tidiness) = profile.impact(Severity::MIN);
        apply_room_delta(world, room, cleanliness, tidiness);

        self.rules.on_spawn(&mut event, profile, world, self.rng.as_mut());

        world.notify(Notification {
            at: now,
            level: NotificationLevel::Warning,
            title: format!("{} {}", profile.emoji, profile.label),
            message: profile.banner(room.display_name(), event.severity),
        });

        self.last_trigger = now;
        self.next_delay = self
            .rng
            .range(self.tuning.trigger_min_minutes, self.tuning.trigger_max_minutes);
        self.phase_started = now;
        self.last_escalation = now;

        info!(
            category = %self.category(),
            kind = %kind,
            room = %room,
            next_delay = self.next_delay,
            "event spawned"
        );

        let id = event.id;
        self.publish(&event, world);
        self.live = Some(event);
        id
    }

    /// Step the live event; returns false once it has been archived
    fn advance(&mut self, event: &mut LiveEvent, now: SimMinutes, world: &mut dyn WorldAccess) -> bool {
        let profile = catalog::profile(event.kind);
        let phase_age = now - self.phase_started;

        match event.phase {
            Phase::Detection => {
                if phase_age >= self.rules.detection_dwell(event, &self.tuning) {
                    self.detect(event, profile, now, world);
                }
                true
            }
            Phase::Response => {
                self.respond(event, profile, now, phase_age, world);
                true
            }
            Phase::Resolution => {
                if phase_age >= self.tuning.resolution_dwell {
                    self.resolve(event, profile, now, world);
                    return false;
                }
                true
            }
        }
    }

    fn detect(&mut self, event: &mut LiveEvent, profile: &EventProfile, now: SimMinutes, world: &mut dyn WorldAccess) {
        let detector = {
            let robots = world.robots();
            select_detector(event.room, &robots, world.layout(), self.metric.as_ref())
        };

        let thought = self.pick_thought(&profile.detection_thoughts, detector);
        world.set_thought(detector, thought);
        world.set_mood(detector, RobotMood::Focused);
        world.clear_queued_tasks(detector);

        event.phase = Phase::Response;
        event.detected_by = Some(detector);
        event.responding = vec![detector];
        self.rules.on_detected(event, profile, world);
        self.phase_started = now;

        info!(category = %self.category(), kind = %event.kind, detector = %detector, "event detected");
        self.publish(event, world);
    }

    fn respond(
        &mut self,
        event: &mut LiveEvent,
        profile: &EventProfile,
        now: SimMinutes,
        phase_age: SimMinutes,
        world: &mut dyn WorldAccess,
    ) {
        // Gates below count only responders engaged before this tick
        let engaged = event.responding.len();

        if phase_age >= self.tuning.rally_dwell && event.responding.len() < RobotId::ALL.len() {
            let recruits = rally_candidates(&event.responding, &world.robots(), self.rally_battery_floor);
            for robot in recruits {
                let thought = self.pick_thought(&profile.response_thoughts, robot);
                world.set_thought(robot, thought);
                world.set_mood(robot, RobotMood::Focused);
                world.clear_queued_tasks(robot);
                if event.add_responder(robot) {
                    debug!(kind = %event.kind, robot = %robot, "robot joined response");
                }
            }
        }

        if let Some(escalation) = profile.escalation {
            if now - self.last_escalation >= escalation.after_minutes {
                if let Some(next) = event.severity.escalated() {
                    let (cleanliness, tidiness) = profile.escalation_delta(event.severity, next);
                    apply_room_delta(world, event.room, cleanliness, tidiness);

                    if next == Severity::MAX {
                        if let Some((cleanliness, tidiness)) = escalation.collateral_at_max {
                            for room in world.tracked_rooms() {
                                if room != event.room {
                                    world.adjust_room(room, cleanliness, tidiness);
                                }
                            }
                        }
                    }

                    event.raise_severity(next);
                    self.last_escalation = now;
                    info!(kind = %event.kind, room = %event.room, severity = %next, "event escalated");
                }
            }
        }

        let complete = match profile.gate {
            ResponseGate::Progress { per_responder } => {
                event.progress = (event.progress + engaged as f32 * per_responder).clamp(0.0, 100.0);
                event.progress >= 100.0
            }
            ResponseGate::FixedDuration { minutes } => phase_age >= minutes,
            ResponseGate::Flee { base_minutes } => {
                phase_age >= self.flee.resolve_minutes(base_minutes, event.alarm_triggered, engaged)
            }
        };

        if complete {
            event.phase = Phase::Resolution;
            self.phase_started = now;
            self.rules.on_resolution_started(event, profile, world);
            info!(category = %self.category(), kind = %event.kind, "event entering resolution");
        }
        self.publish(event, world);
    }

    fn resolve(&mut self, event: &mut LiveEvent, profile: &EventProfile, now: SimMinutes, world: &mut dyn WorldAccess) {
        let category = self.category();
        let detector = event.detected_by.unwrap_or(RobotId::Sim);

        let thought = self.pick_thought(&profile.resolution_thoughts, detector);
        world.set_thought(detector, thought.clone());
        world.set_mood(detector, RobotMood::Happy);

        apply_room_delta(
            world,
            event.room,
            self.tuning.restore_cleanliness,
            self.tuning.restore_tidiness,
        );

        world.write_diary(DiaryEntry {
            at: now,
            robot: detector,
            mood: RobotMood::Focused,
            text: format!(
                "{} - {} {} in {}! {}",
                format_clock(now),
                profile.emoji,
                profile.severity_label(event.peak_severity),
                event.room.display_name(),
                thought
            ),
        });

        for robot in &event.responding {
            world.adjust_needs(
                *robot,
                self.tuning.responder_happiness,
                -self.tuning.responder_boredom_relief,
            );
        }

        self.rules.on_resolved(event, profile, world);

        event.resolved_at = Some(now);
        world.archive(event.to_history(now));
        world.publish(category, None);

        info!(
            category = %category,
            kind = %event.kind,
            room = %event.room,
            duration = now - event.started_at,
            "event resolved"
        );
    }

    fn pick_thought(&mut self, pool: &ThoughtPool, robot: RobotId) -> String {
        pick(self.rng.as_mut(), pool.for_robot(robot))
            .map(|s| (*s).to_string())
            .unwrap_or_default()
    }

    fn publish(&self, event: &LiveEvent, world: &mut dyn WorldAccess) {
        world.publish(event.category(), Some(view_of(event)));
    }
}

/// Board snapshot of a live event
pub fn view_of(event: &LiveEvent) -> LiveEventView {
    let profile = catalog::profile(event.kind);
    let category = event.category();
    LiveEventView {
        id: event.id,
        kind: event.kind,
        category,
        phase: event.phase.label(category).to_string(),
        room: event.room,
        severity: event.severity.level(),
        progress: event.progress,
        responders: event.responding.clone(),
        banner: profile.banner(event.room.display_name(), event.severity),
    }
}

fn apply_room_delta(world: &mut dyn WorldAccess, room: RoomId, cleanliness: f32, tidiness: f32) {
    if !world.adjust_room(room, cleanliness, tidiness) {
        debug!(room = %room, "room has no need record, side effect skipped");
    }
}
