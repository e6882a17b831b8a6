//! Timestamped copies of the data file, with bounded retention.
//!
//! Two triggers create automatic backups: an interval timer polled from the
//! host loop, and a store-mutation hook that only acts when the project
//! count changed since the last save-triggered backup.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::NaiveDateTime;

use crate::io::file::{self, FileError};
use crate::model::ProjectRecord;
use crate::settings::BackupSettings;
use crate::tasks::scheduler::IntervalTimer;

const BACKUP_PREFIX: &str = "projectdata_backup_";

/// Error type for backup operations.
#[derive(Debug, thiserror::Error)]
pub enum BackupError {
    #[error("no data file found to back up")]
    NoDataFile,
    #[error("could not copy {path}: {source}")]
    Copy {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not create backup directory: {0}")]
    CreateDir(std::io::Error),
    #[error(transparent)]
    File(#[from] FileError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupKind {
    Manual,
    Auto,
}

impl BackupKind {
    fn tag(self) -> &'static str {
        match self {
            BackupKind::Manual => "manual",
            BackupKind::Auto => "auto",
        }
    }
}

/// One entry in the backup directory, newest first in listings.
#[derive(Debug, Clone)]
pub struct BackupInfo {
    pub path: PathBuf,
    pub modified: SystemTime,
    pub kind: BackupKind,
}

pub struct BackupManager {
    data_file: PathBuf,
    backup_dir: PathBuf,
    settings: BackupSettings,
    timer: IntervalTimer,
}

impl BackupManager {
    pub fn new(
        data_file: impl Into<PathBuf>,
        backup_dir: impl Into<PathBuf>,
        settings: BackupSettings,
    ) -> Self {
        let timer = IntervalTimer::new(settings.backup_interval_minutes);
        Self {
            data_file: data_file.into(),
            backup_dir: backup_dir.into(),
            settings,
            timer,
        }
    }

    pub fn settings(&self) -> &BackupSettings {
        &self.settings
    }

    /// Swap in new settings and rearm the interval timer.
    pub fn apply_settings(&mut self, settings: BackupSettings) {
        self.timer.restart(settings.backup_interval_minutes);
        self.settings = settings;
    }

    /// Copy the data file into the backup directory and apply retention.
    pub fn create_backup(
        &self,
        kind: BackupKind,
        now: NaiveDateTime,
    ) -> Result<PathBuf, BackupError> {
        if !self.data_file.exists() {
            return Err(BackupError::NoDataFile);
        }
        std::fs::create_dir_all(&self.backup_dir).map_err(BackupError::CreateDir)?;

        let name = format!(
            "{BACKUP_PREFIX}{}_{}.json",
            kind.tag(),
            now.format("%Y%m%d_%H%M%S")
        );
        let dest = self.backup_dir.join(name);
        std::fs::copy(&self.data_file, &dest).map_err(|e| BackupError::Copy {
            path: dest.clone(),
            source: e,
        })?;

        self.apply_retention();
        Ok(dest)
    }

    /// Interval-timer trigger. Best-effort: failures are logged, never raised.
    pub fn tick(&mut self, now: NaiveDateTime) {
        if !self.settings.auto_backup_enabled {
            return;
        }
        if self.timer.poll(now) {
            match self.create_backup(BackupKind::Auto, now) {
                Ok(path) => tracing::debug!("auto backup written to {}", path.display()),
                Err(e) => tracing::warn!("auto backup failed: {e}"),
            }
        }
    }

    /// Store-mutation trigger. Only backs up when the project count differs
    /// from the last save-triggered backup, so field edits on an
    /// unchanged-count store produce no backup.
    pub fn on_store_saved(&mut self, project_count: usize, now: NaiveDateTime) {
        if !self.settings.auto_backup_enabled {
            return;
        }
        if project_count == self.settings.last_project_count {
            return;
        }
        match self.create_backup(BackupKind::Auto, now) {
            Ok(_) => self.settings.last_project_count = project_count,
            Err(e) => tracing::warn!("save-triggered backup failed: {e}"),
        }
    }

    /// All backups in the backup directory, newest first. A missing
    /// directory is an empty list.
    pub fn list_backups(&self) -> std::io::Result<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }
        let mut backups = Vec::new();
        for entry in std::fs::read_dir(&self.backup_dir)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if !name.starts_with(BACKUP_PREFIX) {
                continue;
            }
            let modified = entry
                .metadata()
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            let kind = if name.contains("auto") {
                BackupKind::Auto
            } else {
                BackupKind::Manual
            };
            backups.push(BackupInfo {
                path: entry.path(),
                modified,
                kind,
            });
        }
        // Equal mtimes are broken by file name, which embeds the timestamp.
        backups.sort_by(|a, b| {
            b.modified
                .cmp(&a.modified)
                .then_with(|| b.path.cmp(&a.path))
        });
        Ok(backups)
    }

    /// Delete backups beyond `max_backups`, oldest first. Best-effort.
    fn apply_retention(&self) {
        let backups = match self.list_backups() {
            Ok(backups) => backups,
            Err(e) => {
                tracing::warn!("could not list backups for retention: {e}");
                return;
            }
        };
        for stale in backups.iter().skip(self.settings.max_backups) {
            if let Err(e) = std::fs::remove_file(&stale.path) {
                tracing::warn!("could not delete old backup {}: {e}", stale.path.display());
            }
        }
    }

    /// Validate and restore a backup. A malformed backup aborts before
    /// anything is touched; otherwise a safety backup of the current data is
    /// taken first. Returns the restored records for the caller to install.
    pub fn restore(
        &self,
        backup_file: &Path,
        now: NaiveDateTime,
    ) -> Result<Vec<ProjectRecord>, BackupError> {
        let records = file::load_records(backup_file)?;
        self.create_backup(BackupKind::Auto, now)?;
        std::fs::copy(backup_file, &self.data_file).map_err(|e| BackupError::Copy {
            path: self.data_file.clone(),
            source: e,
        })?;
        Ok(records)
    }

    /// Copy a backup to an external location.
    pub fn export_backup(&self, backup_file: &Path, destination: &Path) -> std::io::Result<()> {
        std::fs::copy(backup_file, destination).map(|_| ())
    }

    /// User-initiated removal of a single backup.
    pub fn delete_backup(&self, backup_file: &Path) -> std::io::Result<()> {
        std::fs::remove_file(backup_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn at(day: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, day)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn manager_in(tmp: &TempDir, settings: BackupSettings) -> BackupManager {
        let data_file = tmp.path().join("projects_data.json");
        std::fs::write(&data_file, "[]").unwrap();
        BackupManager::new(data_file, tmp.path().join("backups"), settings)
    }

    #[test]
    fn backup_names_carry_kind_and_timestamp() {
        let tmp = TempDir::new().unwrap();
        let manager = manager_in(&tmp, BackupSettings::default());

        let path = manager
            .create_backup(BackupKind::Manual, at(7, 9, 30, 15))
            .unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "projectdata_backup_manual_20260807_093015.json"
        );
        assert!(path.exists());
    }

    #[test]
    fn missing_data_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let manager = BackupManager::new(
            tmp.path().join("absent.json"),
            tmp.path().join("backups"),
            BackupSettings::default(),
        );
        assert!(matches!(
            manager.create_backup(BackupKind::Manual, at(7, 9, 0, 0)),
            Err(BackupError::NoDataFile)
        ));
    }

    #[test]
    fn retention_keeps_exactly_max_backups_evicting_oldest() {
        let tmp = TempDir::new().unwrap();
        let settings = BackupSettings {
            max_backups: 4,
            ..BackupSettings::default()
        };
        let manager = manager_in(&tmp, settings);

        // K + 3 pre-existing backups, oldest first by embedded timestamp.
        let backup_dir = tmp.path().join("backups");
        std::fs::create_dir_all(&backup_dir).unwrap();
        for i in 0..7 {
            let name = format!("projectdata_backup_auto_20260801_00000{i}.json");
            std::fs::write(backup_dir.join(name), "[]").unwrap();
        }

        let newest = manager
            .create_backup(BackupKind::Auto, at(2, 12, 0, 0))
            .unwrap();

        let remaining = manager.list_backups().unwrap();
        assert_eq!(remaining.len(), 4);
        assert_eq!(remaining[0].path, newest);
        // Survivors are the newest of the pre-existing set.
        let names: Vec<_> = remaining
            .iter()
            .map(|b| b.path.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert!(names.iter().any(|n| n.contains("000006")));
        assert!(names.iter().any(|n| n.contains("000005")));
        assert!(names.iter().any(|n| n.contains("000004")));
        assert!(!names.iter().any(|n| n.contains("000003")));
        assert!(!names.iter().any(|n| n.contains("000000")));
    }

    #[test]
    fn count_change_heuristic_gates_save_triggered_backups() {
        let tmp = TempDir::new().unwrap();
        let settings = BackupSettings {
            auto_backup_enabled: true,
            ..BackupSettings::default()
        };
        let mut manager = manager_in(&tmp, settings);

        manager.on_store_saved(1, at(7, 9, 0, 0));
        assert_eq!(manager.list_backups().unwrap().len(), 1);
        assert_eq!(manager.settings().last_project_count, 1);

        // Same count (a field edit): no new backup.
        manager.on_store_saved(1, at(7, 9, 0, 1));
        assert_eq!(manager.list_backups().unwrap().len(), 1);

        manager.on_store_saved(2, at(7, 9, 0, 2));
        assert_eq!(manager.list_backups().unwrap().len(), 2);
    }

    #[test]
    fn save_trigger_is_inert_when_disabled() {
        let tmp = TempDir::new().unwrap();
        let mut manager = manager_in(&tmp, BackupSettings::default());
        manager.on_store_saved(5, at(7, 9, 0, 0));
        assert!(manager.list_backups().unwrap().is_empty());
    }

    #[test]
    fn interval_tick_backs_up_once_per_interval() {
        let tmp = TempDir::new().unwrap();
        let settings = BackupSettings {
            auto_backup_enabled: true,
            backup_interval_minutes: 60,
            ..BackupSettings::default()
        };
        let mut manager = manager_in(&tmp, settings);

        manager.tick(at(7, 9, 0, 0)); // arms
        manager.tick(at(7, 9, 30, 0));
        assert!(manager.list_backups().unwrap().is_empty());
        manager.tick(at(7, 10, 0, 0));
        assert_eq!(manager.list_backups().unwrap().len(), 1);
        manager.tick(at(7, 10, 1, 0));
        assert_eq!(manager.list_backups().unwrap().len(), 1);
    }

    #[test]
    fn restore_aborts_on_malformed_backup() {
        let tmp = TempDir::new().unwrap();
        let manager = manager_in(&tmp, BackupSettings::default());
        std::fs::write(manager.data_file.clone(), r#"[{"name":"A","language":"Rust"}]"#).unwrap();

        let bad = tmp.path().join("projectdata_backup_manual_garbage.json");
        std::fs::write(&bad, "{ nope").unwrap();

        assert!(manager.restore(&bad, at(7, 9, 0, 0)).is_err());
        // Current data untouched, no safety backup taken.
        let current = std::fs::read_to_string(&manager.data_file).unwrap();
        assert!(current.contains("\"A\""));
        assert!(manager.list_backups().unwrap().is_empty());
    }

    #[test]
    fn restore_takes_safety_backup_then_swaps_data() {
        let tmp = TempDir::new().unwrap();
        let manager = manager_in(&tmp, BackupSettings::default());
        std::fs::write(manager.data_file.clone(), r#"[{"name":"Old","language":"C"}]"#).unwrap();

        let backup = tmp.path().join("restore_me.json");
        std::fs::write(&backup, r#"[{"name":"New","language":"Rust"}]"#).unwrap();

        let records = manager.restore(&backup, at(7, 9, 0, 0)).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "New");

        let current = std::fs::read_to_string(&manager.data_file).unwrap();
        assert!(current.contains("\"New\""));
        // Safety backup preserves the old data.
        let safety = manager.list_backups().unwrap();
        assert_eq!(safety.len(), 1);
        let safety_content = std::fs::read_to_string(&safety[0].path).unwrap();
        assert!(safety_content.contains("\"Old\""));
    }
}
