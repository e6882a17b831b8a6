use chrono::{Duration, NaiveDateTime};

/// Poll-driven interval timer.
///
/// The host event loop calls [`poll`](IntervalTimer::poll) as often as it
/// likes; the timer reports `true` once per elapsed interval. The first poll
/// arms the timer, mirroring a toolkit timer that fires one interval after
/// `start()`.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    interval_minutes: u32,
    next_due: Option<NaiveDateTime>,
}

impl IntervalTimer {
    pub fn new(interval_minutes: u32) -> Self {
        Self {
            interval_minutes,
            next_due: None,
        }
    }

    /// True when the interval has elapsed since the previous fire (or since
    /// the arming poll).
    pub fn poll(&mut self, now: NaiveDateTime) -> bool {
        let interval = Duration::minutes(i64::from(self.interval_minutes));
        match self.next_due {
            None => {
                self.next_due = Some(now + interval);
                false
            }
            Some(due) if now >= due => {
                self.next_due = Some(now + interval);
                true
            }
            Some(_) => false,
        }
    }

    /// Drop any pending fire and rearm with a new interval. Used when the
    /// user changes the schedule settings.
    pub fn restart(&mut self, interval_minutes: u32) {
        self.interval_minutes = interval_minutes;
        self.next_due = None;
    }
}
