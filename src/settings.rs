//! Persisted user settings (lives in the OS config directory).

use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Auto-backup configuration plus the persisted state of the
/// backup-on-change heuristic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupSettings {
    pub auto_backup_enabled: bool,
    pub backup_interval_minutes: u32,
    pub max_backups: usize,
    /// Project count at the time of the last save-triggered backup.
    pub last_project_count: usize,
}

impl Default for BackupSettings {
    fn default() -> Self {
        Self {
            auto_backup_enabled: false,
            backup_interval_minutes: 60,
            max_backups: 10,
            last_project_count: 0,
        }
    }
}

/// Deadline-notification configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub enabled: bool,
    pub remind_days_before: i64,
    pub check_interval_minutes: u32,
    /// Wall-clock time of the daily summary, `HH:mm`.
    pub notify_time: String,
    pub daily_summary: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            remind_days_before: 1,
            check_interval_minutes: 60,
            notify_time: "09:00".to_string(),
            daily_summary: true,
        }
    }
}

impl NotificationSettings {
    /// The daily summary time, or `None` when the stored string is invalid.
    pub fn daily_summary_time(&self) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(&self.notify_time, "%H:%M").ok()
    }
}

/// All persisted settings, one JSON document, namespaced by feature area.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub backup: BackupSettings,
    pub notifications: NotificationSettings,
}

impl AppSettings {
    /// Load settings from `path`; a missing or corrupt file yields defaults.
    pub fn load(path: &Path) -> AppSettings {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
    }
}

/// OS-standard locations for the data file, backups, and settings.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    pub data_file: PathBuf,
    pub backup_dir: PathBuf,
    pub settings_file: PathBuf,
}

impl StoragePaths {
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "ProjectOrganizer") {
            let data = proj_dirs.data_dir().to_path_buf();
            let config = proj_dirs.config_dir().to_path_buf();
            Self {
                data_file: data.join("projects_data.json"),
                backup_dir: data.join("backups"),
                settings_file: config.join("settings.json"),
            }
        } else {
            // Fallback
            let dir = PathBuf::from(".");
            Self {
                data_file: dir.join("projects_data.json"),
                backup_dir: dir.join("backups"),
                settings_file: dir.join("settings.json"),
            }
        }
    }
}
