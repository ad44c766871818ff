//! Temporary project configuration: backups and flavor edits.
//!
//! - [`backup`] - Manifest and icons backup with a restore handle
//! - [`flavors`] - Flavor edits applied to the manifest

pub mod backup;
pub mod flavors;

pub use backup::{BackupEntry, BackupSession, ConfigBackup};
pub use flavors::FlavorApplier;
