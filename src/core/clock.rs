//! Simulated clock for the event controllers
//!
//! All event timing (trigger delays, phase dwells, escalation windows) is
//! measured in simulated minutes. The clock is advanced externally at a
//! variable rate; a rate of 0 pauses the simulation and every controller
//! tick becomes a no-op.

use serde::{Deserialize, Serialize};

use crate::core::types::SimMinutes;

pub const MINUTES_PER_DAY: f64 = 24.0 * 60.0;

/// Time of day periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimePeriod {
    Morning,    // 06:00-12:00
    Afternoon,  // 12:00-18:00
    Evening,    // 18:00-22:00
    Night,      // 22:00-06:00
}

impl TimePeriod {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => TimePeriod::Morning,
            12..=17 => TimePeriod::Afternoon,
            18..=21 => TimePeriod::Evening,
            _ => TimePeriod::Night, // 22-23, 0-5
        }
    }
}

/// Monotonic simulated-minutes counter with a playback rate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimClock {
    minutes: SimMinutes,
    /// Simulated minutes per real second (0 = paused)
    rate: f64,
}

impl SimClock {
    pub fn new(start_minutes: SimMinutes, rate: f64) -> Self {
        Self {
            minutes: start_minutes,
            rate: rate.max(0.0),
        }
    }

    /// Advance by real elapsed seconds at the current rate
    pub fn advance(&mut self, real_seconds: f64) {
        if real_seconds > 0.0 {
            self.minutes += self.rate * real_seconds;
        }
    }

    /// Advance by simulated minutes directly (deterministic stepping)
    ///
    /// Ignored while paused so that a paused simulation never moves.
    pub fn advance_minutes(&mut self, minutes: SimMinutes) {
        if self.rate > 0.0 && minutes > 0.0 {
            self.minutes += minutes;
        }
    }

    pub fn minutes(&self) -> SimMinutes {
        self.minutes
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn set_rate(&mut self, rate: f64) {
        self.rate = rate.max(0.0);
    }

    pub fn is_paused(&self) -> bool {
        self.rate <= 0.0
    }

    pub fn day(&self) -> u64 {
        (self.minutes / MINUTES_PER_DAY).floor() as u64 + 1
    }

    pub fn hour(&self) -> u32 {
        hour_of(self.minutes)
    }

    pub fn time_period(&self) -> TimePeriod {
        TimePeriod::from_hour(self.hour())
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

fn wrap_minutes(minutes: SimMinutes) -> SimMinutes {
    let wrapped = minutes % MINUTES_PER_DAY;
    if wrapped >= 0.0 {
        wrapped
    } else {
        wrapped + MINUTES_PER_DAY
    }
}

/// Hour of day (0-23) for an absolute sim-minute value
pub fn hour_of(minutes: SimMinutes) -> u32 {
    (wrap_minutes(minutes) / 60.0).floor() as u32
}

/// Night runs from 22:00 to 06:00
pub fn is_night(minutes: SimMinutes) -> bool {
    let hour = hour_of(minutes);
    hour >= 22 || hour < 6
}

/// `HH:MM` for an absolute sim-minute value
pub fn format_clock(minutes: SimMinutes) -> String {
    let wrapped = wrap_minutes(minutes);
    let hours = (wrapped / 60.0).floor() as u32;
    let mins = (wrapped % 60.0).floor() as u32;
    format!("{:02}:{:02}", hours, mins)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_period_from_hour() {
        assert_eq!(TimePeriod::from_hour(6), TimePeriod::Morning);
        assert_eq!(TimePeriod::from_hour(11), TimePeriod::Morning);
        assert_eq!(TimePeriod::from_hour(12), TimePeriod::Afternoon);
        assert_eq!(TimePeriod::from_hour(17), TimePeriod::Afternoon);
        assert_eq!(TimePeriod::from_hour(18), TimePeriod::Evening);
        assert_eq!(TimePeriod::from_hour(21), TimePeriod::Evening);
        assert_eq!(TimePeriod::from_hour(22), TimePeriod::Night);
        assert_eq!(TimePeriod::from_hour(5), TimePeriod::Night);
    }

    #[test]
    fn test_clock_advances_at_rate() {
        let mut clock = SimClock::new(0.0, 2.0);
        clock.advance(3.0);
        assert!((clock.minutes() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_paused_clock_does_not_move() {
        let mut clock = SimClock::new(100.0, 0.0);
        clock.advance(10.0);
        clock.advance_minutes(5.0);
        assert!(clock.is_paused());
        assert_eq!(clock.minutes(), 100.0);
    }

    #[test]
    fn test_night_window() {
        assert!(is_night(22.0 * 60.0));
        assert!(is_night(3.0 * 60.0));
        assert!(!is_night(6.0 * 60.0));
        assert!(!is_night(21.0 * 60.0 + 59.0));
        // Next day wraps
        assert!(is_night(MINUTES_PER_DAY + 23.0 * 60.0));
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0.0), "00:00");
        assert_eq!(format_clock(615.5), "10:15");
        assert_eq!(format_clock(MINUTES_PER_DAY + 61.0), "01:01");
    }

    #[test]
    fn test_day_counter() {
        let clock = SimClock::new(MINUTES_PER_DAY * 2.0 + 5.0, 1.0);
        assert_eq!(clock.day(), 3);
        assert_eq!(clock.hour(), 0);
        assert_eq!(clock.time_period(), TimePeriod::Night);
    }
}
