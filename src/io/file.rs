use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::model::ProjectRecord;

/// Error type for data-file operations.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid project data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Serialize records in the on-disk dialect: pretty-printed, 4-space indent.
pub fn to_pretty_json(records: &[ProjectRecord]) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    records.serialize(&mut ser)?;
    // serde_json emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Load the full record list from a JSON file.
pub fn load_records(path: &Path) -> Result<Vec<ProjectRecord>, FileError> {
    let json = std::fs::read_to_string(path).map_err(|e| FileError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(serde_json::from_str(&json)?)
}

/// Save the full record list to a JSON file, overwriting it.
pub fn save_records(records: &[ProjectRecord], path: &Path) -> Result<(), FileError> {
    let json = to_pretty_json(records)?;
    std::fs::write(path, json).map_err(|e| FileError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}
