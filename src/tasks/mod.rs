pub mod backup;
pub mod notify;
pub mod scheduler;

pub use backup::{BackupError, BackupInfo, BackupKind, BackupManager};
pub use notify::{DeadlineScanner, Notifier};
pub use scheduler::IntervalTimer;
