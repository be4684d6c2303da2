//! Round clock and news timetable
//!
//! Owns the round's start/end instants, the fixed 15-second news cadence,
//! and pause bookkeeping. Pauses extend the end time and shift every
//! not-yet-fired schedule entry forward by the same amount, so paused time
//! never consumes round time and the cadence between remaining events is
//! preserved.

use chrono::Duration;
use fairground_core::Timestamp;

/// Seconds between scheduled news firings
const NEWS_CADENCE_SECS: i64 = 15;

/// Round timekeeping: start/end, news timetable, pauses
///
/// Created at round start and dropped at round end; nothing here survives
/// across rounds.
#[derive(Debug, Clone)]
pub struct RoundClock {
    end: Timestamp,
    schedule: Vec<Timestamp>,
    next_index: usize,
    pause_until: Timestamp,
}

impl RoundClock {
    /// Start a round of `duration_secs` at `start`
    ///
    /// News fires at start+15s, +30s, ... up to and including
    /// duration-15s - never at the open or the close.
    pub fn new(start: Timestamp, duration_secs: i64) -> Self {
        let last = duration_secs - NEWS_CADENCE_SECS;
        let mut schedule = Vec::new();
        let mut offset = NEWS_CADENCE_SECS;
        while offset <= last {
            schedule.push(start + Duration::seconds(offset));
            offset += NEWS_CADENCE_SECS;
        }

        Self {
            end: start + Duration::seconds(duration_secs),
            schedule,
            next_index: 0,
            pause_until: start,
        }
    }

    /// Current round end instant (moves out under pauses, in on manual end)
    pub fn end_time(&self) -> Timestamp {
        self.end
    }

    /// Remaining round time at `now`
    ///
    /// Frozen while paused: the pause extended `end` by its full duration
    /// up front, so measuring from `pause_until` keeps the displayed value
    /// constant until play resumes.
    pub fn remaining(&self, now: Timestamp) -> Duration {
        let effective_now = now.max(self.pause_until);
        (self.end - effective_now).max(Duration::zero())
    }

    /// Whether the round is over at `now`
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.remaining(now) == Duration::zero()
    }

    /// Whether the round is frozen for a news pause at `now`
    pub fn is_paused(&self, now: Timestamp) -> bool {
        now < self.pause_until
    }

    /// Whether the next scheduled news instant has elapsed
    pub fn news_due(&self, now: Timestamp) -> bool {
        self.schedule
            .get(self.next_index)
            .is_some_and(|&at| now >= at)
    }

    /// Consume the due schedule entry after firing its event
    pub fn advance_schedule(&mut self) {
        if self.next_index < self.schedule.len() {
            self.next_index += 1;
        }
    }

    /// Freeze the round at `now` for `pause_ms`
    ///
    /// Extends the end time and shifts every unfired schedule entry by the
    /// pause duration.
    pub fn begin_pause(&mut self, now: Timestamp, pause_ms: i64) {
        let pause = Duration::milliseconds(pause_ms);
        self.pause_until = now + pause;
        self.end += pause;
        for at in self.schedule.iter_mut().skip(self.next_index) {
            *at += pause;
        }
    }

    /// Force expiry: the next tick observes the round as over
    pub fn end_now(&mut self, now: Timestamp) {
        self.end = self.end.min(now);
        self.pause_until = self.pause_until.min(now);
    }

    /// Remaining scheduled firing instants (absolute, ascending)
    pub fn pending_schedule(&self) -> &[Timestamp] {
        &self.schedule[self.next_index..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn start() -> Timestamp {
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_120s_round_schedules_seven_events() {
        let clock = RoundClock::new(start(), 120);

        let expected: Vec<Timestamp> = (1..=7)
            .map(|k| start() + Duration::seconds(15 * k))
            .collect();
        assert_eq!(clock.pending_schedule(), expected.as_slice());
    }

    #[test]
    fn test_schedule_never_fires_at_open_or_close() {
        let clock = RoundClock::new(start(), 90);
        let first = clock.pending_schedule().first().copied().unwrap();
        let last = clock.pending_schedule().last().copied().unwrap();

        assert_eq!(first, start() + Duration::seconds(15));
        assert_eq!(last, start() + Duration::seconds(75));
    }

    #[test]
    fn test_news_due_and_cursor() {
        let mut clock = RoundClock::new(start(), 120);

        assert!(!clock.news_due(start() + Duration::seconds(14)));
        assert!(clock.news_due(start() + Duration::seconds(15)));

        clock.advance_schedule();
        assert!(!clock.news_due(start() + Duration::seconds(16)));
        assert!(clock.news_due(start() + Duration::seconds(30)));
    }

    #[test]
    fn test_pause_extends_end_and_shifts_unfired_entries() {
        let mut clock = RoundClock::new(start(), 120);
        let end_before = clock.end_time();

        let fire_at = start() + Duration::seconds(15);
        clock.advance_schedule();
        clock.begin_pause(fire_at, 5000);

        assert!(clock.is_paused(fire_at + Duration::seconds(4)));
        assert!(!clock.is_paused(fire_at + Duration::seconds(5)));
        assert_eq!(clock.end_time(), end_before + Duration::seconds(5));

        // Second event moved from +30s to +35s
        assert_eq!(
            clock.pending_schedule()[0],
            start() + Duration::seconds(35)
        );
    }

    #[test]
    fn test_remaining_is_frozen_during_pause() {
        let mut clock = RoundClock::new(start(), 120);
        let fire_at = start() + Duration::seconds(15);
        let before = clock.remaining(fire_at);

        clock.advance_schedule();
        clock.begin_pause(fire_at, 5000);

        assert_eq!(clock.remaining(fire_at + Duration::seconds(2)), before);
        assert_eq!(clock.remaining(fire_at + Duration::seconds(5)), before);
        // Counts down again once the pause lapses
        assert_eq!(
            clock.remaining(fire_at + Duration::seconds(6)),
            before - Duration::seconds(1)
        );
    }

    #[test]
    fn test_expiry_and_manual_end() {
        let mut clock = RoundClock::new(start(), 120);

        assert!(!clock.is_expired(start() + Duration::seconds(119)));
        assert!(clock.is_expired(start() + Duration::seconds(120)));

        let now = start() + Duration::seconds(40);
        clock.end_now(now);
        assert!(clock.is_expired(now));
    }

    #[test]
    fn test_manual_end_during_pause_expires() {
        let mut clock = RoundClock::new(start(), 120);
        let fire_at = start() + Duration::seconds(15);
        clock.advance_schedule();
        clock.begin_pause(fire_at, 5000);

        let now = fire_at + Duration::seconds(1);
        clock.end_now(now);
        assert!(clock.is_expired(now));
    }
}
