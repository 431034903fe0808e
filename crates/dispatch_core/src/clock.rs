//! Wall-clock abstraction for peak-hour determination.
//!
//! The engine never reads the system time directly: it goes through the
//! [WallClock] resource, so tests pin the time of day with [FixedTime].

use bevy_ecs::prelude::Resource;
use chrono::{Local, Timelike};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Peak windows in minutes past midnight, both ends inclusive.
const PEAK_WINDOWS: [(u32, u32); 2] = [(7 * 60, 10 * 60), (17 * 60, 20 * 60)];

/// Supplies the current time of day.
pub trait TimeSource: Send + Sync {
    fn minutes_past_midnight(&self) -> u32;
}

/// Reads the local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTime;

impl TimeSource for LocalTime {
    fn minutes_past_midnight(&self) -> u32 {
        let now = Local::now();
        now.hour() * 60 + now.minute()
    }
}

/// A pinned time of day, for deterministic tests and scripted runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedTime(pub u32);

impl FixedTime {
    pub fn at(hour: u32, minute: u32) -> Self {
        Self((hour * 60 + minute) % MINUTES_PER_DAY)
    }
}

impl TimeSource for FixedTime {
    fn minutes_past_midnight(&self) -> u32 {
        self.0 % MINUTES_PER_DAY
    }
}

/// Resource wrapper for the time source trait object.
#[derive(Resource)]
pub struct WallClock(pub Box<dyn TimeSource>);

impl WallClock {
    pub fn new(source: Box<dyn TimeSource>) -> Self {
        Self(source)
    }

    pub fn local() -> Self {
        Self::new(Box::new(LocalTime))
    }
}

impl std::ops::Deref for WallClock {
    type Target = dyn TimeSource;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// Peak iff the time falls in 07:00–10:00 or 17:00–20:00, inclusive both ends.
pub fn is_peak(minutes_past_midnight: u32) -> bool {
    PEAK_WINDOWS
        .iter()
        .any(|&(start, end)| minutes_past_midnight >= start && minutes_past_midnight <= end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_window_ends_are_inclusive() {
        assert!(is_peak(FixedTime::at(7, 0).0));
        assert!(is_peak(FixedTime::at(10, 0).0));
        assert!(is_peak(FixedTime::at(17, 0).0));
        assert!(is_peak(FixedTime::at(20, 0).0));
    }

    #[test]
    fn minutes_outside_windows_are_off_peak() {
        assert!(!is_peak(FixedTime::at(6, 59).0));
        assert!(!is_peak(FixedTime::at(10, 1).0));
        assert!(!is_peak(FixedTime::at(12, 0).0));
        assert!(!is_peak(FixedTime::at(16, 59).0));
        assert!(!is_peak(FixedTime::at(20, 1).0));
        assert!(!is_peak(FixedTime::at(0, 0).0));
    }

    #[test]
    fn fixed_time_wraps_past_midnight() {
        assert_eq!(FixedTime::at(25, 30).minutes_past_midnight(), 90);
    }
}
