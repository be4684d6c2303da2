use std::sync::Mutex;

use chrono::Duration;
use fairground_core::Timestamp;
use fairground_ports::Clock;

/// Manually advanced clock for deterministic tests
///
/// Time only moves when [`advance`] or [`set`] is called, so test code can
/// step through ticks, news firings and pauses without sleeping.
///
/// [`advance`]: ManualClock::advance
/// [`set`]: ManualClock::set
pub struct ManualClock {
    current: Mutex<Timestamp>,
}

impl ManualClock {
    /// Create a clock frozen at the given instant
    pub fn new(start: Timestamp) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    /// Move time forward by `duration`
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.lock().expect("clock mutex poisoned");
        *current += duration;
    }

    /// Jump to an absolute instant
    pub fn set(&self, time: Timestamp) {
        let mut current = self.current.lock().expect("clock mutex poisoned");
        *current = time;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.current.lock().expect("clock mutex poisoned")
    }

    fn name(&self) -> &str {
        "ManualClock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_manual_clock_only_moves_when_advanced() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let clock = ManualClock::new(start);

        assert_eq!(clock.now(), start);
        assert_eq!(clock.now(), start);

        clock.advance(Duration::milliseconds(100));
        assert_eq!(clock.now(), start + Duration::milliseconds(100));
    }

    #[test]
    fn test_manual_clock_set_jumps() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let clock = ManualClock::new(start);

        let later = start + Duration::seconds(120);
        clock.set(later);
        assert_eq!(clock.now(), later);
    }
}
