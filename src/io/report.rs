use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::model::{Priority, ProjectRecord};

/// Error type for report export.
#[derive(Debug, thiserror::Error)]
#[error("could not write {path}: {source}")]
pub struct ReportError {
    pub path: PathBuf,
    pub source: std::io::Error,
}

/// Render the plain-text project report: summary counts, then per-project
/// sections ordered High → Medium → Low priority (stable within a class).
pub fn render_report(records: &[ProjectRecord], generated_at: NaiveDateTime) -> String {
    let mut out = format!(
        "PROJECT REPORT - Generated on {}\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    );
    out.push_str(&"=".repeat(80));
    out.push_str("\n\n");

    let total = records.len();
    let completed = records.iter().filter(|r| r.is_completed()).count();
    let high_priority = records
        .iter()
        .filter(|r| r.priority == Priority::High)
        .count();
    let completion_rate = if total > 0 { completed * 100 / total } else { 0 };

    out.push_str("SUMMARY\n");
    out.push_str(&format!("Total Projects: {total}\n"));
    out.push_str(&format!("Completed Projects: {completed}\n"));
    out.push_str(&format!("High Priority Projects: {high_priority}\n"));
    out.push_str(&format!("Completion Rate: {completion_rate}%\n\n"));

    out.push_str("PROJECT DETAILS\n");

    let mut ordered: Vec<&ProjectRecord> = records.iter().collect();
    ordered.sort_by_key(|r| r.priority);

    for (i, record) in ordered.iter().enumerate() {
        out.push_str(&"-".repeat(80));
        out.push('\n');
        out.push_str(&format!(
            "{}. {} ({})\n",
            i + 1,
            record.name,
            record.language
        ));
        out.push_str(&format!("   Priority: {}\n", record.priority));
        if let Some(ref deadline) = record.deadline {
            out.push_str(&format!("   Deadline: {deadline}\n"));
        }
        out.push_str(&format!("   Completion: {}%\n", record.completion));
        if !record.description.is_empty() {
            out.push_str(&format!("   Description: {}\n", record.description));
        }
        out.push('\n');
    }

    out
}

/// Write the report to disk.
pub fn write_report(
    records: &[ProjectRecord],
    path: &Path,
    generated_at: NaiveDateTime,
) -> Result<(), ReportError> {
    std::fs::write(path, render_report(records, generated_at)).map_err(|e| ReportError {
        path: path.to_path_buf(),
        source: e,
    })
}
