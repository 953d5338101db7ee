//! Engine configuration with documented constants
//!
//! All tuning numbers for the event controllers are collected here. The
//! defaults reproduce the observed pacing of the household simulation; a
//! TOML file may override any subset of them.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{Result, SimBotError};
use crate::core::types::{AlarmState, EventCategory, RoomId};

/// Per-category timing and side-effect tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTuning {
    /// Lower bound of the random trigger delay (sim-minutes)
    ///
    /// The delay is redrawn uniformly from [min, max) on every trigger,
    /// including the very first.
    pub trigger_min_minutes: f64,

    /// Upper bound of the random trigger delay (sim-minutes)
    pub trigger_max_minutes: f64,

    /// Dwell in the detection phase before a robot notices the event
    pub detection_dwell: f64,

    /// Detection dwell when a sensor (camera) already saw the event
    ///
    /// Only intruders roll camera detection; other categories never use it.
    pub sensor_detection_dwell: f64,

    /// Time in the response phase before the rest of the household rallies
    pub rally_dwell: f64,

    /// Dwell in the resolution phase before archival
    pub resolution_dwell: f64,

    /// Cleanliness restored to the affected room on resolution
    ///
    /// A partial clean-up: usually less than the damage inflicted, though
    /// mild kinds (power outage, prankster) can end above their pre-event
    /// level.
    pub restore_cleanliness: f32,

    /// Tidiness restored to the affected room on resolution
    pub restore_tidiness: f32,

    /// Happiness granted to every responder on resolution
    pub responder_happiness: f32,

    /// Boredom removed from every responder on resolution
    pub responder_boredom_relief: f32,
}

impl CategoryTuning {
    pub fn disaster() -> Self {
        Self {
            trigger_min_minutes: 90.0,
            trigger_max_minutes: 150.0,
            detection_dwell: 1.0,
            sensor_detection_dwell: 1.0,
            rally_dwell: 2.0,
            resolution_dwell: 2.0,
            restore_cleanliness: 20.0,
            restore_tidiness: 15.0,
            responder_happiness: 12.0,
            responder_boredom_relief: 20.0,
        }
    }

    pub fn home_event() -> Self {
        Self {
            trigger_min_minutes: 30.0,
            trigger_max_minutes: 60.0,
            detection_dwell: 1.0,
            sensor_detection_dwell: 1.0,
            rally_dwell: 3.0,
            resolution_dwell: 2.0,
            restore_cleanliness: 15.0,
            restore_tidiness: 10.0,
            responder_happiness: 8.0,
            responder_boredom_relief: 15.0,
        }
    }

    pub fn intruder() -> Self {
        Self {
            trigger_min_minutes: 90.0,
            trigger_max_minutes: 180.0,
            detection_dwell: 1.5,
            sensor_detection_dwell: 0.5,
            rally_dwell: 2.0,
            resolution_dwell: 2.0,
            restore_cleanliness: 10.0,
            restore_tidiness: 8.0,
            responder_happiness: 10.0,
            responder_boredom_relief: 20.0,
        }
    }

    fn validate(&self, category: EventCategory) -> Result<()> {
        if self.trigger_min_minutes < 0.0 || self.trigger_max_minutes < self.trigger_min_minutes {
            return Err(SimBotError::InvalidConfig(format!(
                "{}: trigger interval [{}, {}) is inverted or negative",
                category, self.trigger_min_minutes, self.trigger_max_minutes
            )));
        }

        let dwells = [
            self.detection_dwell,
            self.sensor_detection_dwell,
            self.rally_dwell,
            self.resolution_dwell,
        ];
        if dwells.iter().any(|d| *d < 0.0) {
            return Err(SimBotError::InvalidConfig(format!(
                "{}: phase dwells must be non-negative",
                category
            )));
        }

        Ok(())
    }
}

/// Which live categories block a category from spawning
///
/// The default keeps the observed asymmetry: a disaster waits for a live
/// home event, an intruder waits for either, a home event waits for nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuppressionConfig {
    pub disaster: Vec<EventCategory>,
    pub home_event: Vec<EventCategory>,
    pub intruder: Vec<EventCategory>,
}

impl Default for SuppressionConfig {
    fn default() -> Self {
        Self {
            disaster: vec![EventCategory::HomeEvent],
            home_event: Vec::new(),
            intruder: vec![EventCategory::Disaster, EventCategory::HomeEvent],
        }
    }
}

impl SuppressionConfig {
    /// Every category blocks every other one
    pub fn symmetric() -> Self {
        Self {
            disaster: vec![EventCategory::HomeEvent, EventCategory::Intruder],
            home_event: vec![EventCategory::Disaster, EventCategory::Intruder],
            intruder: vec![EventCategory::Disaster, EventCategory::HomeEvent],
        }
    }

    pub fn blocked_by(&self, category: EventCategory) -> &[EventCategory] {
        match category {
            EventCategory::Disaster => &self.disaster,
            EventCategory::HomeEvent => &self.home_event,
            EventCategory::Intruder => &self.intruder,
        }
    }
}

/// Distance metric used by responder selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DistanceMode {
    /// Robot's own distance from the world origin (observed behaviour)
    #[default]
    Origin,
    /// Robot's distance to the event room's centre
    RoomCenter,
}

/// Simulated clock settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Sim-minute value at start (480 = Day 1, 08:00)
    pub start_minutes: f64,
    /// Simulated minutes per real second; 0 starts paused
    pub minutes_per_second: f64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            start_minutes: 480.0,
            minutes_per_second: 1.0,
        }
    }
}

/// Wall-clock polling cadence for the runtime scheduler
///
/// Controllers run on independent intervals; none is synchronised to
/// another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CadenceConfig {
    pub clock_ms: u64,
    pub disaster_ms: u64,
    pub home_event_ms: u64,
    pub intruder_ms: u64,
}

impl Default for CadenceConfig {
    fn default() -> Self {
        Self {
            clock_ms: 250,
            disaster_ms: 3000,
            home_event_ms: 3000,
            intruder_ms: 3000,
        }
    }
}

impl CadenceConfig {
    pub fn for_category(&self, category: EventCategory) -> u64 {
        match category {
            EventCategory::Disaster => self.disaster_ms,
            EventCategory::HomeEvent => self.home_event_ms,
            EventCategory::Intruder => self.intruder_ms,
        }
    }
}

/// Home security settings (cameras, alarm, patrol, intruder flee rules)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub installed_cameras: Vec<RoomId>,
    pub initial_alarm: AlarmState,
    /// Arm a disarmed alarm (armed-home) when the clock enters night
    pub auto_arm_at_night: bool,
    /// Intruders only spawn between 22:00 and 06:00
    pub night_only_intruders: bool,
    pub patrol_enabled: bool,
    pub patrol_route: Vec<RoomId>,
    /// Sim-minutes spent checking each patrol room
    pub patrol_wait_minutes: f64,
    /// Patrollers need strictly more battery than this
    pub patrol_min_battery: f32,
    /// Intruders never leave sooner than this once confronted
    pub flee_floor_minutes: f64,
    /// Minutes each responder shaves off the flee time
    pub flee_per_responder: f64,
    /// Flee-time multiplier once the alarm has triggered
    pub alarm_flee_multiplier: f64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            installed_cameras: vec![RoomId::Hallway, RoomId::LivingRoom],
            initial_alarm: AlarmState::Disarmed,
            auto_arm_at_night: true,
            night_only_intruders: true,
            patrol_enabled: false,
            patrol_route: vec![
                RoomId::Hallway,
                RoomId::LivingRoom,
                RoomId::Kitchen,
                RoomId::Hallway,
                RoomId::Bedroom,
                RoomId::Bathroom,
                RoomId::Laundry,
                RoomId::Hallway,
            ],
            patrol_wait_minutes: 3.0,
            patrol_min_battery: 15.0,
            flee_floor_minutes: 3.0,
            flee_per_responder: 1.5,
            alarm_flee_multiplier: 0.5,
        }
    }
}

/// Configuration for the event engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seed for the ChaCha random source (absent = entropy)
    pub seed: Option<u64>,

    /// Entries kept per category history log; oldest are dropped
    pub history_cap: usize,

    /// Rallies skip robots at or below this battery percentage
    pub rally_battery_floor: f32,

    pub responder_distance: DistanceMode,
    pub clock: ClockConfig,
    pub cadence: CadenceConfig,
    pub disaster: CategoryTuning,
    pub home_event: CategoryTuning,
    pub intruder: CategoryTuning,
    pub suppression: SuppressionConfig,
    pub security: SecurityConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            history_cap: 50,
            rally_battery_floor: 5.0,
            responder_distance: DistanceMode::Origin,
            clock: ClockConfig::default(),
            cadence: CadenceConfig::default(),
            disaster: CategoryTuning::disaster(),
            home_event: CategoryTuning::home_event(),
            intruder: CategoryTuning::intruder(),
            suppression: SuppressionConfig::default(),
            security: SecurityConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn tuning(&self, category: EventCategory) -> &CategoryTuning {
        match category {
            EventCategory::Disaster => &self.disaster,
            EventCategory::HomeEvent => &self.home_event,
            EventCategory::Intruder => &self.intruder,
        }
    }

    /// Parse a TOML document layered over the defaults
    ///
    /// Tables merge key by key, so `[disaster]\nrally_dwell = 4.0` keeps
    /// every other disaster default.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let overrides: toml::Table = toml::from_str(content)?;
        let mut merged = toml::Value::try_from(Self::default())
            .map_err(|e| SimBotError::InvalidConfig(format!("default config: {e}")))?;
        merge_tables(&mut merged, toml::Value::Table(overrides));

        let config: Self = merged.try_into()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.history_cap == 0 {
            return Err(SimBotError::InvalidConfig("history_cap must be at least 1".into()));
        }

        for category in EventCategory::ALL {
            self.tuning(category).validate(category)?;
            if self.suppression.blocked_by(category).contains(&category) {
                return Err(SimBotError::InvalidConfig(format!(
                    "{category} cannot suppress itself"
                )));
            }
        }

        if self.clock.minutes_per_second < 0.0 {
            return Err(SimBotError::InvalidConfig("clock rate must be non-negative".into()));
        }

        let cadence = &self.cadence;
        if [cadence.clock_ms, cadence.disaster_ms, cadence.home_event_ms, cadence.intruder_ms]
            .contains(&0)
        {
            return Err(SimBotError::InvalidConfig("cadence intervals must be non-zero".into()));
        }

        let security = &self.security;
        if security.patrol_route.is_empty() {
            return Err(SimBotError::InvalidConfig("patrol_route must not be empty".into()));
        }
        if security.patrol_wait_minutes <= 0.0 {
            return Err(SimBotError::InvalidConfig("patrol_wait_minutes must be positive".into()));
        }
        if security.flee_floor_minutes < 0.0 || !(0.0..=1.0).contains(&security.alarm_flee_multiplier) {
            return Err(SimBotError::InvalidConfig(
                "flee floor must be non-negative and alarm multiplier within [0, 1]".into(),
            ));
        }

        Ok(())
    }
}

fn merge_tables(base: &mut toml::Value, overrides: toml::Value) {
    match (base, overrides) {
        (toml::Value::Table(base), toml::Value::Table(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(existing) if existing.is_table() && value.is_table() => {
                        merge_tables(existing, value);
                    }
                    _ => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overrides) => *base = overrides,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            seed = 99
            history_cap = 10

            [disaster]
            rally_dwell = 4.0

            [security]
            patrol_enabled = true
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, Some(99));
        assert_eq!(config.history_cap, 10);
        assert_eq!(config.disaster.rally_dwell, 4.0);
        assert_eq!(config.disaster.trigger_min_minutes, 90.0);
        assert_eq!(config.home_event, CategoryTuning::home_event());
        assert!(config.security.patrol_enabled);
        assert!(config.security.auto_arm_at_night);
    }

    #[test]
    fn test_enum_values_parse_kebab_case() {
        let config = EngineConfig::from_toml_str(
            r#"
            responder_distance = "room-center"

            [suppression]
            home_event = ["disaster"]

            [security]
            initial_alarm = "armed-away"
            installed_cameras = ["kitchen"]
            "#,
        )
        .unwrap();

        assert_eq!(config.responder_distance, DistanceMode::RoomCenter);
        assert_eq!(config.suppression.home_event, vec![EventCategory::Disaster]);
        assert_eq!(config.security.initial_alarm, AlarmState::ArmedAway);
        assert_eq!(config.security.installed_cameras, vec![RoomId::Kitchen]);
    }

    #[test]
    fn test_inverted_interval_rejected() {
        let result = EngineConfig::from_toml_str(
            r#"
            [home_event]
            trigger_min_minutes = 60.0
            trigger_max_minutes = 30.0
            "#,
        );
        assert!(matches!(result, Err(SimBotError::InvalidConfig(_))));
    }

    #[test]
    fn test_self_suppression_rejected() {
        let mut config = EngineConfig::default();
        config.suppression.disaster.push(EventCategory::Disaster);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let result = EngineConfig::from_toml_str("seed = [");
        assert!(matches!(result, Err(SimBotError::ConfigParse(_))));
    }

    #[test]
    fn test_default_suppression_is_asymmetric() {
        let s = SuppressionConfig::default();
        assert_eq!(s.blocked_by(EventCategory::Disaster), &[EventCategory::HomeEvent]);
        assert!(s.blocked_by(EventCategory::HomeEvent).is_empty());
        assert_eq!(s.blocked_by(EventCategory::Intruder).len(), 2);
    }
}
