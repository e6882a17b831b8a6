//! Deadline notification scanning.
//!
//! The scan logic lives here; delivery goes through [`Notifier`] so the
//! presentation layer can plug in a tray icon, a status bar, or a test
//! double. A tick never panics and never propagates an error.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime, Timelike};

use crate::engine::stats;
use crate::model::{Priority, ProjectRecord};
use crate::settings::NotificationSettings;
use crate::tasks::scheduler::IntervalTimer;

/// Sink for user-visible notifications.
pub trait Notifier {
    fn notify(&mut self, title: &str, body: &str);
}

/// Seconds after startup for the one-shot initial scan.
const INITIAL_SCAN_DELAY_SECS: i64 = 5;

pub struct DeadlineScanner {
    settings: NotificationSettings,
    timer: IntervalTimer,
    /// One-shot scan scheduled shortly after startup or a settings change.
    initial_scan_at: Option<NaiveDateTime>,
    /// `(name, deadline)` pairs already notified in this run.
    seen: HashSet<(String, String)>,
}

impl DeadlineScanner {
    pub fn new(settings: NotificationSettings, started_at: NaiveDateTime) -> Self {
        let timer = IntervalTimer::new(settings.check_interval_minutes);
        Self {
            settings,
            timer,
            initial_scan_at: Some(started_at + chrono::Duration::seconds(INITIAL_SCAN_DELAY_SECS)),
            seen: HashSet::new(),
        }
    }

    pub fn settings(&self) -> &NotificationSettings {
        &self.settings
    }

    /// Swap in new settings, rearm the timer, and schedule a fresh scan.
    pub fn apply_settings(&mut self, settings: NotificationSettings, now: NaiveDateTime) {
        self.timer.restart(settings.check_interval_minutes);
        self.initial_scan_at = settings
            .enabled
            .then(|| now + chrono::Duration::seconds(1));
        self.settings = settings;
    }

    /// Forget which deadlines were already notified, so current deadlines
    /// alert again on the next scan.
    pub fn reset_seen(&mut self) {
        self.seen.clear();
    }

    /// Poll from the host loop. Scans when the interval elapses or the
    /// one-shot initial scan comes due.
    pub fn tick(
        &mut self,
        now: NaiveDateTime,
        records: &[ProjectRecord],
        notifier: &mut dyn Notifier,
    ) {
        if !self.settings.enabled {
            return;
        }
        let interval_due = self.timer.poll(now);
        let initial_due = self.initial_scan_at.is_some_and(|at| now >= at);
        if initial_due {
            self.initial_scan_at = None;
        }
        if interval_due || initial_due {
            self.scan(now, records, notifier);
        }
    }

    fn scan(&mut self, now: NaiveDateTime, records: &[ProjectRecord], notifier: &mut dyn Notifier) {
        let today = now.date();

        // Daily summary fires only when the tick lands exactly on the
        // configured hour and minute; a tick cadence that never hits that
        // minute skips the summary for the day.
        if self.settings.daily_summary {
            match self.settings.daily_summary_time() {
                Some(target) if now.hour() == target.hour() && now.minute() == target.minute() => {
                    self.send_daily_summary(today, records, notifier);
                }
                Some(_) => {}
                None => tracing::debug!(
                    "invalid daily notification time '{}'",
                    self.settings.notify_time
                ),
            }
        }

        for record in records {
            if record.is_completed() {
                continue;
            }
            let Some(deadline) = record.deadline.clone() else {
                continue;
            };
            let Some(days_left) = record.days_until_deadline(today) else {
                tracing::debug!("skipping '{}': unparseable deadline", record.name);
                continue;
            };
            if !(0..=self.settings.remind_days_before).contains(&days_left) {
                continue;
            }
            if self.seen.insert((record.name.clone(), deadline)) {
                send_deadline_alert(record, days_left, notifier);
            }
        }
    }

    fn send_daily_summary(
        &self,
        today: NaiveDate,
        records: &[ProjectRecord],
        notifier: &mut dyn Notifier,
    ) {
        let upcoming = stats::upcoming_deadlines(records, today, 7);
        if upcoming.is_empty() {
            notifier.notify(
                "Daily Project Summary",
                "No upcoming deadlines for the next week.",
            );
            return;
        }

        let mut body = format!(
            "You have {} project{} due soon:\n\n",
            upcoming.len(),
            plural(upcoming.len() as i64)
        );
        for (record, days_left) in upcoming {
            if days_left == 0 {
                body.push_str(&format!("• {} - Due TODAY", record.name));
            } else {
                body.push_str(&format!(
                    "• {} - Due in {} day{}",
                    record.name,
                    days_left,
                    plural(days_left)
                ));
            }
            if record.priority == Priority::High {
                body.push_str(" (High Priority)");
            }
            body.push('\n');
        }
        notifier.notify("Upcoming Project Deadlines", &body);
    }
}

fn send_deadline_alert(record: &ProjectRecord, days_left: i64, notifier: &mut dyn Notifier) {
    let (title, mut body) = if days_left == 0 {
        (
            "Project Due Today",
            format!("Project '{}' is due today!", record.name),
        )
    } else {
        (
            "Upcoming Project Deadline",
            format!(
                "Project '{}' is due in {} day{}!",
                record.name,
                days_left,
                plural(days_left)
            ),
        )
    };
    if record.priority == Priority::High {
        body.push_str("\nThis is a high priority project!");
    }
    notifier.notify(title, &body);
}

fn plural(n: i64) -> &'static str {
    if n > 1 {
        "s"
    } else {
        ""
    }
}
