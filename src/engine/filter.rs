use chrono::{Duration, NaiveDate};

use crate::model::{Priority, ProjectRecord};

/// Which group a smart filter is shown under in the filter sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterCategory {
    General,
    Deadline,
    Activity,
    Progress,
}

/// The closed set of smart filters. Each is a pure predicate over a record
/// and "today"; records missing a required field simply don't match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmartFilter {
    #[default]
    All,
    DueToday,
    DueThisWeek,
    Overdue,
    HighPriority,
    RecentlyUpdated,
    Stalled,
    NearlyComplete,
    NoProgress,
    Completed,
}

impl SmartFilter {
    pub const ALL_FILTERS: [SmartFilter; 10] = [
        SmartFilter::All,
        SmartFilter::DueToday,
        SmartFilter::DueThisWeek,
        SmartFilter::Overdue,
        SmartFilter::HighPriority,
        SmartFilter::RecentlyUpdated,
        SmartFilter::Stalled,
        SmartFilter::NearlyComplete,
        SmartFilter::NoProgress,
        SmartFilter::Completed,
    ];

    /// Stable identifier, used in persisted UI state.
    pub fn id(self) -> &'static str {
        match self {
            SmartFilter::All => "all",
            SmartFilter::DueToday => "due_today",
            SmartFilter::DueThisWeek => "due_this_week",
            SmartFilter::Overdue => "overdue",
            SmartFilter::HighPriority => "high_priority",
            SmartFilter::RecentlyUpdated => "recently_updated",
            SmartFilter::Stalled => "stalled",
            SmartFilter::NearlyComplete => "nearly_complete",
            SmartFilter::NoProgress => "no_progress",
            SmartFilter::Completed => "completed",
        }
    }

    pub fn from_id(id: &str) -> Option<SmartFilter> {
        Self::ALL_FILTERS.into_iter().find(|f| f.id() == id)
    }

    pub fn label(self) -> &'static str {
        match self {
            SmartFilter::All => "All Projects",
            SmartFilter::DueToday => "Due Today",
            SmartFilter::DueThisWeek => "Due This Week",
            SmartFilter::Overdue => "Overdue",
            SmartFilter::HighPriority => "High Priority",
            SmartFilter::RecentlyUpdated => "Recently Updated",
            SmartFilter::Stalled => "Stalled Projects",
            SmartFilter::NearlyComplete => "Nearly Complete",
            SmartFilter::NoProgress => "No Progress",
            SmartFilter::Completed => "Completed",
        }
    }

    pub fn category(self) -> FilterCategory {
        match self {
            SmartFilter::All | SmartFilter::HighPriority => FilterCategory::General,
            SmartFilter::DueToday | SmartFilter::DueThisWeek | SmartFilter::Overdue => {
                FilterCategory::Deadline
            }
            SmartFilter::RecentlyUpdated | SmartFilter::Stalled => FilterCategory::Activity,
            SmartFilter::NearlyComplete | SmartFilter::NoProgress | SmartFilter::Completed => {
                FilterCategory::Progress
            }
        }
    }

    /// Whether `record` matches this filter on the given day.
    pub fn matches(self, record: &ProjectRecord, today: NaiveDate) -> bool {
        match self {
            SmartFilter::All => true,
            SmartFilter::DueToday => record.deadline_date() == Some(today),
            SmartFilter::DueThisWeek => record
                .deadline_date()
                .is_some_and(|d| d >= today && d <= today + Duration::days(7)),
            SmartFilter::Overdue => {
                record.deadline_date().is_some_and(|d| d < today) && !record.is_completed()
            }
            SmartFilter::HighPriority => record.priority == Priority::High,
            SmartFilter::RecentlyUpdated => record
                .last_updated_day()
                .is_some_and(|d| d >= today - Duration::days(3)),
            SmartFilter::Stalled => {
                record
                    .last_updated_day()
                    .is_some_and(|d| d < today - Duration::days(14))
                    && !record.is_completed()
            }
            SmartFilter::NearlyComplete => (75..100).contains(&record.completion),
            SmartFilter::NoProgress => record.completion == 0,
            SmartFilter::Completed => record.is_completed(),
        }
    }
}

/// Conjunctive filter criteria for the project list.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub smart: SmartFilter,
    pub priority: Option<Priority>,
    pub language: Option<String>,
    /// Case-insensitive substring match against name and description.
    pub search: String,
}

impl FilterCriteria {
    fn accepts(&self, record: &ProjectRecord, today: NaiveDate) -> bool {
        if !self.smart.matches(record, today) {
            return false;
        }
        if let Some(priority) = self.priority {
            if record.priority != priority {
                return false;
            }
        }
        if let Some(ref language) = self.language {
            if &record.language != language {
                return false;
            }
        }
        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            if !record.name.to_lowercase().contains(&needle)
                && !record.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }
}

/// Return the records matching `criteria`, in store order. The result is a
/// derived copy; the input is never reordered.
pub fn filter(
    records: &[ProjectRecord],
    criteria: &FilterCriteria,
    today: NaiveDate,
) -> Vec<ProjectRecord> {
    records
        .iter()
        .filter(|r| criteria.accepts(r, today))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rec(name: &str, deadline: Option<&str>, completion: u8) -> ProjectRecord {
        let mut r = ProjectRecord::new(name, "Rust");
        r.deadline = deadline.map(str::to_string);
        r.completion = completion;
        r
    }

    #[test]
    fn due_today_and_overdue_scenario() {
        let today = day(2026, 8, 7);
        let records = vec![
            rec("A", Some("2026-08-07"), 50),
            rec("B", Some("2026-08-06"), 50),
            rec("C", Some("2026-08-07"), 100),
        ];

        let due_today: Vec<_> = records
            .iter()
            .filter(|r| SmartFilter::DueToday.matches(r, today))
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(due_today, ["A", "C"]);

        let overdue: Vec<_> = records
            .iter()
            .filter(|r| SmartFilter::Overdue.matches(r, today))
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(overdue, ["B"]);
    }

    #[test]
    fn completed_record_excluded_from_progress_filters() {
        let today = day(2026, 8, 7);
        let mut done = rec("Done", Some("2000-01-01"), 100);
        done.last_updated = "2020-01-01 10:00:00".into();
        for f in [
            SmartFilter::Overdue,
            SmartFilter::Stalled,
            SmartFilter::NearlyComplete,
            SmartFilter::NoProgress,
        ] {
            assert!(!f.matches(&done, today), "{} should not match", f.id());
        }
        assert!(SmartFilter::Completed.matches(&done, today));
    }

    #[test]
    fn deadline_filters_skip_records_without_deadline() {
        let today = day(2026, 8, 7);
        let none = rec("N", None, 10);
        let garbage = rec("G", Some("whenever"), 10);
        for r in [&none, &garbage] {
            assert!(!SmartFilter::DueToday.matches(r, today));
            assert!(!SmartFilter::DueThisWeek.matches(r, today));
            assert!(!SmartFilter::Overdue.matches(r, today));
        }
    }

    #[test]
    fn due_this_week_is_inclusive_of_both_ends() {
        let today = day(2026, 8, 7);
        assert!(SmartFilter::DueThisWeek.matches(&rec("a", Some("2026-08-07"), 0), today));
        assert!(SmartFilter::DueThisWeek.matches(&rec("b", Some("2026-08-14"), 0), today));
        assert!(!SmartFilter::DueThisWeek.matches(&rec("c", Some("2026-08-15"), 0), today));
        assert!(!SmartFilter::DueThisWeek.matches(&rec("d", Some("2026-08-06"), 0), today));
    }

    #[test]
    fn activity_filters_use_last_updated_day() {
        let today = day(2026, 8, 7);
        let mut fresh = rec("fresh", None, 10);
        fresh.last_updated = "2026-08-04 23:59:59".into();
        assert!(SmartFilter::RecentlyUpdated.matches(&fresh, today));
        assert!(!SmartFilter::Stalled.matches(&fresh, today));

        let mut old = rec("old", None, 10);
        old.last_updated = "2026-07-20 08:00:00".into();
        assert!(!SmartFilter::RecentlyUpdated.matches(&old, today));
        assert!(SmartFilter::Stalled.matches(&old, today));

        // Exactly 14 days ago is not yet stalled.
        let mut edge = rec("edge", None, 10);
        edge.last_updated = "2026-07-24 08:00:00".into();
        assert!(!SmartFilter::Stalled.matches(&edge, today));
    }

    #[test]
    fn filter_result_is_subset_and_conjunctive() {
        let today = day(2026, 8, 7);
        let mut records = vec![
            rec("Parser", Some("2026-08-07"), 80),
            rec("Compiler", Some("2026-08-07"), 20),
            rec("Website", None, 80),
        ];
        records[0].priority = Priority::High;
        records[1].priority = Priority::High;

        let c1 = FilterCriteria {
            smart: SmartFilter::DueToday,
            ..Default::default()
        };
        let c2 = FilterCriteria {
            priority: Some(Priority::High),
            search: "par".into(),
            ..Default::default()
        };
        let combined = FilterCriteria {
            smart: SmartFilter::DueToday,
            priority: Some(Priority::High),
            search: "par".into(),
            ..Default::default()
        };

        let sequential = filter(&filter(&records, &c1, today), &c2, today);
        let conjoined = filter(&records, &combined, today);
        assert_eq!(sequential, conjoined);
        assert_eq!(conjoined.len(), 1);
        assert_eq!(conjoined[0].name, "Parser");
        // Subset of the input, original order untouched.
        assert_eq!(records[0].name, "Parser");
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn search_covers_name_and_description() {
        let today = day(2026, 8, 7);
        let mut r = rec("Backend", None, 0);
        r.description = "REST API in Axum".into();
        let records = vec![r];

        let by_desc = FilterCriteria {
            search: "axum".into(),
            ..Default::default()
        };
        assert_eq!(filter(&records, &by_desc, today).len(), 1);

        let miss = FilterCriteria {
            search: "frontend".into(),
            ..Default::default()
        };
        assert!(filter(&records, &miss, today).is_empty());
    }

    #[test]
    fn smart_filter_ids_round_trip() {
        for f in SmartFilter::ALL_FILTERS {
            assert_eq!(SmartFilter::from_id(f.id()), Some(f));
        }
        assert_eq!(SmartFilter::from_id("bogus"), None);
    }
}
