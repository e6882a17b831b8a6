//! The canonical project list and its JSON persistence.
//!
//! Every mutating call persists the full list and then runs the registered
//! mutation hooks, so background components (auto-backup) compose with the
//! store explicitly instead of wrapping its save path.

use std::path::{Path, PathBuf};

use crate::io::file::{self, FileError};
use crate::model::ProjectRecord;

/// Callback invoked with a snapshot of the list after every successful persist.
pub type MutationHook = Box<dyn FnMut(&[ProjectRecord])>;

/// Error type for store mutations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("a project named '{0}' already exists")]
    DuplicateName(String),
    #[error("no project named '{0}'")]
    NotFound(String),
    #[error(transparent)]
    File(#[from] FileError),
}

/// Outcome of loading the data file at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// File read and parsed; carries the record count.
    Loaded(usize),
    /// No data file yet; the store starts empty.
    Missing,
    /// File unreadable or not valid JSON; the store starts empty and the
    /// message should be surfaced to the user as a warning.
    Malformed(String),
}

pub struct ProjectStore {
    records: Vec<ProjectRecord>,
    path: PathBuf,
    hooks: Vec<MutationHook>,
}

impl ProjectStore {
    /// Load the store from `path`. A missing or malformed file degrades to
    /// an empty list; nothing at this boundary errors or panics.
    pub fn load(path: impl Into<PathBuf>) -> (Self, LoadStatus) {
        let path = path.into();
        let (records, status) = if !path.exists() {
            (Vec::new(), LoadStatus::Missing)
        } else {
            match file::load_records(&path) {
                Ok(records) => {
                    let n = records.len();
                    (records, LoadStatus::Loaded(n))
                }
                Err(e) => {
                    tracing::warn!("failed to load project data: {e}");
                    (Vec::new(), LoadStatus::Malformed(e.to_string()))
                }
            }
        };
        (
            Self {
                records,
                path,
                hooks: Vec::new(),
            },
            status,
        )
    }

    // ── Read access ─────────────────────────────────────────────

    pub fn records(&self) -> &[ProjectRecord] {
        &self.records
    }

    pub fn get(&self, name: &str) -> Option<&ProjectRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Register a callback to run after every successful persist.
    pub fn on_mutation(&mut self, hook: MutationHook) {
        self.hooks.push(hook);
    }

    // ── Mutations ───────────────────────────────────────────────

    /// Append a new record, stamping both timestamps.
    pub fn add(&mut self, mut record: ProjectRecord) -> Result<(), StoreError> {
        if self.get(&record.name).is_some() {
            return Err(StoreError::DuplicateName(record.name));
        }
        record.created_date = today_stamp();
        record.last_updated = now_stamp();
        self.records.push(record);
        self.persist()
    }

    /// Replace the record called `name` in place, keeping its position and
    /// original `created_date`. Renames are allowed as long as the new name
    /// is not taken by another record.
    pub fn update(&mut self, name: &str, mut record: ProjectRecord) -> Result<(), StoreError> {
        let index = self
            .records
            .iter()
            .position(|r| r.name == name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        if record.name != name && self.get(&record.name).is_some() {
            return Err(StoreError::DuplicateName(record.name));
        }
        record.created_date = self.records[index].created_date.clone();
        record.last_updated = now_stamp();
        self.records[index] = record;
        self.persist()
    }

    /// Remove the record called `name`.
    pub fn remove(&mut self, name: &str) -> Result<(), StoreError> {
        let index = self
            .records
            .iter()
            .position(|r| r.name == name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        self.records.remove(index);
        self.persist()
    }

    /// Set a project's completion, clamped to 0–100.
    pub fn set_completion(&mut self, name: &str, value: i64) -> Result<(), StoreError> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.name == name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        record.completion = value.clamp(0, 100) as u8;
        record.last_updated = now_stamp();
        self.persist()
    }

    /// Replace the whole list, e.g. after restoring a backup.
    pub fn replace_all(&mut self, records: Vec<ProjectRecord>) -> Result<(), StoreError> {
        self.records = records;
        self.persist()
    }

    /// Write the full list to disk and notify mutation hooks.
    pub fn save(&mut self) -> Result<(), StoreError> {
        self.persist()
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        file::save_records(&self.records, &self.path)?;
        // Hooks are taken out for the duration of the call so they can
        // borrow the record list.
        let mut hooks = std::mem::take(&mut self.hooks);
        for hook in &mut hooks {
            hook(&self.records);
        }
        self.hooks = hooks;
        Ok(())
    }
}

fn today_stamp() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

fn now_stamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
