pub mod csv_export;
pub mod file;
pub mod report;

use std::path::Path;

use crate::model::ProjectRecord;

pub use csv_export::export_csv;
pub use file::{load_records, save_records, FileError};
pub use report::{render_report, write_report, ReportError};

/// Export the full record array as JSON, in the same dialect as the data
/// file.
pub fn export_json(records: &[ProjectRecord], path: &Path) -> Result<(), FileError> {
    file::save_records(records, path)
}
