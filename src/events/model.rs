//! Event records: live events, history entries and sink payloads

use serde::{Deserialize, Serialize};

use crate::core::error::SimBotError;
use crate::core::types::{EventCategory, EventId, RobotId, RoomId, SimMinutes};
use crate::entity::robot::RobotMood;

/// Every event type across the three categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    Fire,
    Flood,
    Earthquake,
    PlumbingLeak,
    PowerOutage,
    PestInvasion,
    Burglar,
    Raccoon,
    Prankster,
}

impl EventKind {
    pub const ALL: [EventKind; 9] = [
        EventKind::Fire,
        EventKind::Flood,
        EventKind::Earthquake,
        EventKind::PlumbingLeak,
        EventKind::PowerOutage,
        EventKind::PestInvasion,
        EventKind::Burglar,
        EventKind::Raccoon,
        EventKind::Prankster,
    ];

    pub const DISASTERS: [EventKind; 3] = [EventKind::Fire, EventKind::Flood, EventKind::Earthquake];
    pub const HOME_EVENTS: [EventKind; 3] = [
        EventKind::PlumbingLeak,
        EventKind::PowerOutage,
        EventKind::PestInvasion,
    ];
    pub const INTRUDERS: [EventKind; 3] = [EventKind::Burglar, EventKind::Raccoon, EventKind::Prankster];

    pub fn of_category(category: EventCategory) -> &'static [EventKind] {
        match category {
            EventCategory::Disaster => &Self::DISASTERS,
            EventCategory::HomeEvent => &Self::HOME_EVENTS,
            EventCategory::Intruder => &Self::INTRUDERS,
        }
    }

    pub fn category(&self) -> EventCategory {
        match self {
            EventKind::Fire | EventKind::Flood | EventKind::Earthquake => EventCategory::Disaster,
            EventKind::PlumbingLeak | EventKind::PowerOutage | EventKind::PestInvasion => {
                EventCategory::HomeEvent
            }
            EventKind::Burglar | EventKind::Raccoon | EventKind::Prankster => EventCategory::Intruder,
        }
    }

    /// Position in `ALL`, used to index the static catalog
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Fire => "fire",
            EventKind::Flood => "flood",
            EventKind::Earthquake => "earthquake",
            EventKind::PlumbingLeak => "plumbing-leak",
            EventKind::PowerOutage => "power-outage",
            EventKind::PestInvasion => "pest-invasion",
            EventKind::Burglar => "burglar",
            EventKind::Raccoon => "raccoon",
            EventKind::Prankster => "prankster",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventKind {
    type Err = SimBotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| SimBotError::UnknownEventKind(s.to_string()))
    }
}

/// Three-phase lifecycle shared by every category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    Detection,
    Response,
    Resolution,
}

impl Phase {
    /// Category-specific phase name
    pub fn label(&self, category: EventCategory) -> &'static str {
        match (category, self) {
            (EventCategory::Intruder, Phase::Detection) => "detected",
            (EventCategory::Intruder, Phase::Response) => "responding",
            (EventCategory::Intruder, Phase::Resolution) => "resolved",
            (_, Phase::Detection) => "detection",
            (_, Phase::Response) => "response",
            (_, Phase::Resolution) => "resolution",
        }
    }
}

/// Event severity, 1 to 3
///
/// Only disasters escalate; other categories stay at severity 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Severity(u8);

impl Severity {
    pub const MIN: Severity = Severity(1);
    pub const MAX: Severity = Severity(3);

    pub fn new(level: u8) -> Self {
        Self(level.clamp(Self::MIN.0, Self::MAX.0))
    }

    pub fn level(&self) -> u8 {
        self.0
    }

    /// Zero-based index into per-severity tables
    pub fn index(&self) -> usize {
        usize::from(self.0 - 1)
    }

    /// Next severity up, or `None` at the cap
    pub fn escalated(&self) -> Option<Severity> {
        (*self < Self::MAX).then(|| Severity(self.0 + 1))
    }
}

impl Default for Severity {
    fn default() -> Self {
        Self::MIN
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The single live event of a category, owned by its controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveEvent {
    pub id: EventId,
    pub kind: EventKind,
    pub phase: Phase,
    pub room: RoomId,
    pub severity: Severity,
    /// Highest severity reached; never decreases
    pub peak_severity: Severity,
    /// 0-100, advanced during response by progress-gated kinds
    pub progress: f32,
    pub started_at: SimMinutes,
    pub resolved_at: Option<SimMinutes>,
    pub detected_by: Option<RobotId>,
    /// Ordered, duplicate-free, only ever grows
    pub responding: Vec<RobotId>,
    pub camera_detected: bool,
    pub alarm_triggered: bool,
}

impl LiveEvent {
    pub fn new(id: EventId, kind: EventKind, room: RoomId, now: SimMinutes) -> Self {
        Self {
            id,
            kind,
            phase: Phase::Detection,
            room,
            severity: Severity::MIN,
            peak_severity: Severity::MIN,
            progress: 0.0,
            started_at: now,
            resolved_at: None,
            detected_by: None,
            responding: Vec::new(),
            camera_detected: false,
            alarm_triggered: false,
        }
    }

    pub fn category(&self) -> EventCategory {
        self.kind.category()
    }

    /// Add a responder unless already engaged
    pub fn add_responder(&mut self, robot: RobotId) -> bool {
        if self.responding.contains(&robot) {
            return false;
        }
        self.responding.push(robot);
        true
    }

    pub fn raise_severity(&mut self, severity: Severity) {
        self.severity = severity;
        self.peak_severity = self.peak_severity.max(severity);
    }

    /// Immutable archive record, stamped with the resolution time
    pub fn to_history(&self, resolved_at: SimMinutes) -> HistoryEntry {
        let category = self.category();
        HistoryEntry {
            id: self.id,
            kind: self.kind,
            category,
            room: self.room,
            started_at: self.started_at,
            resolved_at,
            detected_by: self.detected_by.unwrap_or(RobotId::Sim),
            responders: self.responding.clone(),
            peak_severity: (category == EventCategory::Disaster).then_some(self.peak_severity),
        }
    }
}

/// Read-only snapshot published on the live-event board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveEventView {
    pub id: EventId,
    pub kind: EventKind,
    pub category: EventCategory,
    pub phase: String,
    pub room: RoomId,
    pub severity: u8,
    pub progress: f32,
    pub responders: Vec<RobotId>,
    pub banner: String,
}

/// Archived summary of a resolved event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: EventId,
    pub kind: EventKind,
    pub category: EventCategory,
    pub room: RoomId,
    pub started_at: SimMinutes,
    pub resolved_at: SimMinutes,
    pub detected_by: RobotId,
    pub responders: Vec<RobotId>,
    /// Disasters only
    pub peak_severity: Option<Severity>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
}

/// User-facing toast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub at: SimMinutes,
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SecurityLogKind {
    CameraMotion,
    AlarmTrigger,
    AlarmArm,
    AlarmDisarm,
    PatrolCheck,
    IntruderDetected,
    IntruderResolved,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityLogEntry {
    pub at: SimMinutes,
    pub kind: SecurityLogKind,
    pub message: String,
    pub room: Option<RoomId>,
}

/// Diary line attributed to a robot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub at: SimMinutes,
    pub robot: RobotId,
    pub mood: RobotMood,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_index_matches_all_order() {
        for (i, kind) in EventKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("pest-invasion".parse::<EventKind>().unwrap(), EventKind::PestInvasion);
        assert!(matches!(
            "meteor".parse::<EventKind>(),
            Err(SimBotError::UnknownEventKind(_))
        ));
    }

    #[test]
    fn test_category_kinds_round_trip() {
        for category in EventCategory::ALL {
            for kind in EventKind::of_category(category) {
                assert_eq!(kind.category(), category);
            }
        }
    }

    #[test]
    fn test_intruder_phase_labels() {
        assert_eq!(Phase::Detection.label(EventCategory::Intruder), "detected");
        assert_eq!(Phase::Response.label(EventCategory::Disaster), "response");
        assert_eq!(Phase::Resolution.label(EventCategory::HomeEvent), "resolution");
    }

    #[test]
    fn test_severity_caps_at_three() {
        let s = Severity::new(2);
        assert_eq!(s.escalated(), Some(Severity::MAX));
        assert_eq!(Severity::MAX.escalated(), None);
        assert_eq!(Severity::new(9), Severity::MAX);
        assert_eq!(Severity::new(0), Severity::MIN);
    }

    #[test]
    fn test_add_responder_rejects_duplicates() {
        let mut event = LiveEvent::new(EventId::new(), EventKind::Fire, RoomId::Kitchen, 0.0);
        assert!(event.add_responder(RobotId::Chef));
        assert!(!event.add_responder(RobotId::Chef));
        assert_eq!(event.responding, vec![RobotId::Chef]);
    }

    #[test]
    fn test_history_defaults_detector_and_peak() {
        let mut event = LiveEvent::new(EventId::new(), EventKind::Flood, RoomId::Bathroom, 10.0);
        event.raise_severity(Severity::new(3));
        let entry = event.to_history(42.0);
        assert_eq!(entry.detected_by, RobotId::Sim);
        assert_eq!(entry.peak_severity, Some(Severity::MAX));
        assert_eq!(entry.resolved_at, 42.0);

        let leak = LiveEvent::new(EventId::new(), EventKind::PlumbingLeak, RoomId::Kitchen, 0.0);
        assert_eq!(leak.to_history(5.0).peak_severity, None);
    }
}
