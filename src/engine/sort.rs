use std::cmp::Reverse;

use chrono::NaiveDate;

use crate::model::ProjectRecord;

/// Sort order for the project list. `DateAdded` is the store's own order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    DateAdded,
    Priority,
    Deadline,
    Completion,
    Name,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::DateAdded,
        SortKey::Priority,
        SortKey::Deadline,
        SortKey::Completion,
        SortKey::Name,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortKey::DateAdded => "Date Added",
            SortKey::Priority => "Priority",
            SortKey::Deadline => "Deadline",
            SortKey::Completion => "Completion",
            SortKey::Name => "Name",
        }
    }
}

/// Sort a derived record list in place. All sorts are stable, so records
/// with equal keys keep their relative order.
pub fn sort(records: &mut [ProjectRecord], key: SortKey) {
    match key {
        SortKey::DateAdded => {}
        SortKey::Priority => records.sort_by_key(|r| r.priority),
        // Missing or unparseable deadlines sort last.
        SortKey::Deadline => records.sort_by_key(|r| r.deadline_date().unwrap_or(NaiveDate::MAX)),
        SortKey::Completion => records.sort_by_key(|r| Reverse(r.completion)),
        SortKey::Name => records.sort_by_key(|r| r.name.to_lowercase()),
    }
}
