use chrono::NaiveDate;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Priority of a project. Sorts High before Medium before Low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// The label used in the UI and in the persisted JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "High Priority",
            Priority::Medium => "Medium Priority",
            Priority::Low => "Low Priority",
        }
    }

    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Unknown labels fall back to Medium rather than rejecting the file.
        let s = String::deserialize(deserializer)?;
        Ok(match s.as_str() {
            "High Priority" | "High" => Priority::High,
            "Low Priority" | "Low" => Priority::Low,
            _ => Priority::Medium,
        })
    }
}

/// A single tracked project, matching the on-disk JSON dialect.
///
/// `deadline` stays a raw string: an unparseable value must degrade to
/// "no deadline" for every date computation instead of failing the load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub name: String,
    pub language: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    /// Progress from 0 to 100.
    #[serde(default, deserialize_with = "de_completion")]
    pub completion: u8,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    /// Stamped once when the record is added, never touched again.
    #[serde(default)]
    pub created_date: String,
    /// Stamped on creation and on every mutation, `YYYY-MM-DD HH:MM:SS`.
    #[serde(default)]
    pub last_updated: String,
}

impl ProjectRecord {
    /// Create a record with defaults. Timestamps are stamped by the store
    /// when the record is added.
    pub fn new(name: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            language: language.into(),
            priority: Priority::Medium,
            deadline: None,
            completion: 0,
            description: String::new(),
            notes: String::new(),
            dependencies: Vec::new(),
            created_date: String::new(),
            last_updated: String::new(),
        }
    }

    /// The deadline as a calendar date, or `None` when absent or unparseable.
    pub fn deadline_date(&self) -> Option<NaiveDate> {
        self.deadline
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
    }

    /// The date part of `last_updated`, or `None` when absent or unparseable.
    pub fn last_updated_day(&self) -> Option<NaiveDate> {
        let s = self.last_updated.get(..10)?;
        NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
    }

    /// Whole days from `today` until the deadline. Negative when the
    /// deadline has passed; `None` without a parseable deadline.
    pub fn days_until_deadline(&self, today: NaiveDate) -> Option<i64> {
        self.deadline_date().map(|d| (d - today).num_days())
    }

    pub fn is_completed(&self) -> bool {
        self.completion == 100
    }
}

/// Accept both integers and floats for `completion`, clamped to 0–100.
fn de_completion<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let value = f64::deserialize(deserializer)?;
    Ok(value.clamp(0.0, 100.0).round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_sorts_high_first() {
        let mut priorities = vec![Priority::Low, Priority::High, Priority::Medium];
        priorities.sort();
        assert_eq!(
            priorities,
            vec![Priority::High, Priority::Medium, Priority::Low]
        );
    }

    #[test]
    fn priority_round_trips_through_json() {
        for p in Priority::ALL {
            let json = serde_json::to_string(&p).unwrap();
            let back: Priority = serde_json::from_str(&json).unwrap();
            assert_eq!(p, back);
        }
        // Unknown labels default to Medium instead of failing.
        let odd: Priority = serde_json::from_str("\"Urgent\"").unwrap();
        assert_eq!(odd, Priority::Medium);
    }

    #[test]
    fn completion_accepts_floats_and_clamps() {
        let rec: ProjectRecord =
            serde_json::from_str(r#"{"name":"a","language":"Rust","completion":87.4}"#).unwrap();
        assert_eq!(rec.completion, 87);
        let rec: ProjectRecord =
            serde_json::from_str(r#"{"name":"a","language":"Rust","completion":250}"#).unwrap();
        assert_eq!(rec.completion, 100);
    }

    #[test]
    fn invalid_deadline_reads_as_none() {
        let mut rec = ProjectRecord::new("a", "Rust");
        rec.deadline = Some("soonish".into());
        assert_eq!(rec.deadline_date(), None);
        rec.deadline = Some("2026-03-01".into());
        assert_eq!(
            rec.deadline_date(),
            Some(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap())
        );
    }

    #[test]
    fn absent_keys_take_defaults() {
        let rec: ProjectRecord = serde_json::from_str(r#"{"name":"a","language":"Rust"}"#).unwrap();
        assert_eq!(rec.priority, Priority::Medium);
        assert_eq!(rec.completion, 0);
        assert!(rec.deadline.is_none());
        assert!(rec.dependencies.is_empty());
    }
}
