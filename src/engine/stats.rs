//! Dashboard aggregations. Everything here is a pure, on-demand computation
//! over the current record list; all functions tolerate an empty list.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

use crate::engine::filter::SmartFilter;
use crate::model::{Priority, ProjectRecord};

/// Headline counts for the dashboard summary cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardCounts {
    pub total: usize,
    pub completed: usize,
    pub high_priority: usize,
    pub due_this_week: usize,
    pub overdue: usize,
    pub stalled: usize,
    /// Completed projects as an integer percentage of the total; 0 when the
    /// store is empty.
    pub completion_rate: u8,
}

pub fn counts(records: &[ProjectRecord], today: NaiveDate) -> DashboardCounts {
    let count = |f: SmartFilter| records.iter().filter(|r| f.matches(r, today)).count();
    let total = records.len();
    let completed = count(SmartFilter::Completed);
    DashboardCounts {
        total,
        completed,
        high_priority: count(SmartFilter::HighPriority),
        due_this_week: count(SmartFilter::DueThisWeek),
        overdue: count(SmartFilter::Overdue),
        stalled: count(SmartFilter::Stalled),
        completion_rate: if total == 0 {
            0
        } else {
            (completed * 100 / total) as u8
        },
    }
}

/// Number of projects per priority, in High/Medium/Low order.
pub fn priority_distribution(records: &[ProjectRecord]) -> [(Priority, usize); 3] {
    Priority::ALL.map(|p| (p, records.iter().filter(|r| r.priority == p).count()))
}

pub const COMPLETION_BUCKET_LABELS: [&str; 6] =
    ["0%", "1-25%", "26-50%", "51-75%", "76-99%", "100%"];

fn completion_bucket(completion: u8) -> usize {
    match completion {
        0 => 0,
        1..=25 => 1,
        26..=50 => 2,
        51..=75 => 3,
        76..=99 => 4,
        _ => 5,
    }
}

/// Project counts per completion bucket, aligned with
/// [`COMPLETION_BUCKET_LABELS`].
pub fn completion_histogram(records: &[ProjectRecord]) -> [usize; 6] {
    let mut buckets = [0usize; 6];
    for record in records {
        buckets[completion_bucket(record.completion)] += 1;
    }
    buckets
}

/// Project counts per language, descending. More than 8 distinct languages
/// collapse to the top 7 plus an aggregate "Other" bucket.
pub fn language_distribution(records: &[ProjectRecord]) -> Vec<(String, usize)> {
    let mut by_language: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *by_language.entry(record.language.as_str()).or_insert(0) += 1;
    }

    let mut sorted: Vec<(String, usize)> = by_language
        .into_iter()
        .map(|(lang, n)| (lang.to_string(), n))
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    if sorted.len() > 8 {
        let other: usize = sorted[7..].iter().map(|(_, n)| n).sum();
        sorted.truncate(7);
        sorted.push(("Other".to_string(), other));
    }
    sorted
}

/// Per-day deadline counts split by priority, for the timeline chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineSeries {
    /// First day of the series.
    pub start: NaiveDate,
    pub high: Vec<usize>,
    pub medium: Vec<usize>,
    pub low: Vec<usize>,
    /// Index of "today" within the series, when it falls inside the range.
    pub today_index: Option<usize>,
}

impl TimelineSeries {
    pub fn len(&self) -> usize {
        self.high.len()
    }

    pub fn is_empty(&self) -> bool {
        self.high.is_empty()
    }

    pub fn date_at(&self, index: usize) -> NaiveDate {
        self.start + Duration::days(index as i64)
    }
}

/// Build the deadline timeline over
/// `[min(today, earliest) - 3d, max(today, latest) + 3d]`, or `None` when no
/// record has a parseable deadline.
pub fn deadline_timeline(records: &[ProjectRecord], today: NaiveDate) -> Option<TimelineSeries> {
    let deadlines: Vec<(NaiveDate, Priority)> = records
        .iter()
        .filter_map(|r| r.deadline_date().map(|d| (d, r.priority)))
        .collect();
    let earliest = deadlines.iter().map(|(d, _)| *d).min()?;
    let latest = deadlines.iter().map(|(d, _)| *d).max()?;

    let start = earliest.min(today) - Duration::days(3);
    let end = latest.max(today) + Duration::days(3);
    let len = (end - start).num_days() as usize + 1;

    let mut series = TimelineSeries {
        start,
        high: vec![0; len],
        medium: vec![0; len],
        low: vec![0; len],
        today_index: None,
    };
    for (deadline, priority) in deadlines {
        let index = (deadline - start).num_days() as usize;
        match priority {
            Priority::High => series.high[index] += 1,
            Priority::Medium => series.medium[index] += 1,
            Priority::Low => series.low[index] += 1,
        }
    }

    let today_offset = (today - start).num_days();
    if (0..len as i64).contains(&today_offset) {
        series.today_index = Some(today_offset as usize);
    }
    Some(series)
}

/// Incomplete projects due within the next `horizon_days` (inclusive),
/// sorted by days left; ties keep store order.
pub fn upcoming_deadlines<'a>(
    records: &'a [ProjectRecord],
    today: NaiveDate,
    horizon_days: i64,
) -> Vec<(&'a ProjectRecord, i64)> {
    let mut upcoming: Vec<(&ProjectRecord, i64)> = records
        .iter()
        .filter(|r| !r.is_completed())
        .filter_map(|r| {
            let days_left = r.days_until_deadline(today)?;
            (0..=horizon_days).contains(&days_left).then_some((r, days_left))
        })
        .collect();
    upcoming.sort_by_key(|(_, days_left)| *days_left);
    upcoming
}

/// The most recently touched projects, newest first.
pub fn recently_updated(records: &[ProjectRecord], limit: usize) -> Vec<&ProjectRecord> {
    let mut updated: Vec<&ProjectRecord> = records
        .iter()
        .filter(|r| !r.last_updated.is_empty())
        .collect();
    // The timestamp format is lexicographically ordered.
    updated.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
    updated.truncate(limit);
    updated
}
