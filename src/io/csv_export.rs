use std::path::Path;

use crate::model::ProjectRecord;

/// Column set for the CSV export, in order.
const CSV_COLUMNS: [&str; 6] = [
    "name",
    "language",
    "priority",
    "deadline",
    "completion",
    "description",
];

/// Export records to a comma-separated file with a fixed column subset.
///
/// The header row is always written, so an empty store produces a
/// header-only file. Returns the number of data rows written.
pub fn export_csv(records: &[ProjectRecord], path: &Path) -> Result<usize, csv::Error> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(CSV_COLUMNS)?;

    for record in records {
        wtr.write_record([
            record.name.as_str(),
            record.language.as_str(),
            record.priority.as_str(),
            record.deadline.as_deref().unwrap_or(""),
            &record.completion.to_string(),
            record.description.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(records.len())
}
