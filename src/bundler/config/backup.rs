//! Backup and restore of the files a flavored build mutates.
//!
//! [`ConfigBackup::create`] copies the manifest and the icons directory to
//! labeled siblings (`package-backup.json`, `icons-backup`) and returns a
//! [`BackupSession`]. [`BackupSession::restore`] moves the copies back,
//! consuming both the backups and the session. A session dropped without
//! being restored (early return, panic) restores itself in `Drop`.

use crate::bundler::{
    Error, ProjectLayout, Result,
    utils::{
        fs::{copy_dir, copy_file, move_path_blocking, remove_dir_all},
        path::{DEFAULT_SEPARATOR, extend_path},
    },
};
use std::path::{Path, PathBuf};

/// One backed-up filesystem entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupEntry {
    /// Location in the project.
    pub original: PathBuf,
    /// Labeled sibling holding the copy.
    pub backup: PathBuf,
    /// Whether the original existed (and so a backup was made).
    pub present: bool,
}

impl BackupEntry {
    fn new(original: &Path, label: &str) -> Self {
        Self {
            original: original.to_path_buf(),
            backup: extend_path(original, label, DEFAULT_SEPARATOR),
            present: false,
        }
    }

    fn restore(&self) -> Result<()> {
        if !self.present {
            return Ok(());
        }
        move_path_blocking(&self.backup, &self.original).map_err(|e| Error::RestoreFailed {
            original: self.original.clone(),
            backup: self.backup.clone(),
            reason: e.to_string(),
        })
    }
}

/// Creates backups of a project's manifest and icons directory.
#[derive(Debug, Clone)]
pub struct ConfigBackup<'a> {
    layout: &'a ProjectLayout,
    label: &'a str,
}

impl<'a> ConfigBackup<'a> {
    /// Backup for `layout` using `label` in the backup names.
    pub fn new(layout: &'a ProjectLayout, label: &'a str) -> Self {
        Self { layout, label }
    }

    /// Copies the manifest and icons directory to their backup locations.
    ///
    /// Stale backups are overwritten. A missing icons directory is skipped;
    /// a missing manifest is an error. Nothing in the project is modified.
    ///
    /// # Errors
    ///
    /// [`Error::BackupFailed`] on any I/O failure. Partial backups already
    /// written are left in place for inspection and overwritten next time.
    pub async fn create(&self) -> Result<BackupSession> {
        log::info!(
            "backing up build settings of project: {}",
            self.layout.root.display()
        );

        let mut manifest = BackupEntry::new(&self.layout.manifest_path, self.label);
        let mut icons = BackupEntry::new(&self.layout.icons_dir, self.label);
        log::debug!("manifest backup: {}", manifest.backup.display());
        log::debug!("icons backup: {}", icons.backup.display());

        if !manifest.original.is_file() {
            return Err(Error::BackupFailed {
                path: manifest.original,
                reason: "manifest does not exist".to_string(),
            });
        }
        copy_file(&manifest.original, &manifest.backup)
            .await
            .map_err(|e| backup_failed(&manifest.original, e))?;
        manifest.present = true;

        if icons.original.is_dir() {
            remove_dir_all(&icons.backup)
                .await
                .map_err(|e| backup_failed(&icons.original, e))?;
            copy_dir(&icons.original, &icons.backup)
                .await
                .map_err(|e| backup_failed(&icons.original, e))?;
            icons.present = true;
        } else {
            log::warn!(
                "icons directory not found, skipping backup: {}",
                icons.original.display()
            );
        }

        Ok(BackupSession {
            entries: vec![manifest, icons],
            restored: false,
        })
    }
}

fn backup_failed(path: &Path, err: Error) -> Error {
    Error::BackupFailed {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}

/// Handle for one backup cycle. Restore consumes it.
#[derive(Debug)]
#[must_use = "a backup session must be restored"]
pub struct BackupSession {
    entries: Vec<BackupEntry>,
    restored: bool,
}

impl BackupSession {
    /// Entries covered by this session.
    pub fn entries(&self) -> &[BackupEntry] {
        &self.entries
    }

    /// Moves every backup back onto its original location.
    ///
    /// All entries are attempted even if one fails; the first failure is
    /// returned. A failed restore leaves flavor edits in the project, so it
    /// is logged at error level.
    pub fn restore(mut self) -> Result<()> {
        self.restored = true;
        self.restore_entries()
    }

    fn restore_entries(&self) -> Result<()> {
        let mut first_error = None;
        for entry in &self.entries {
            log::debug!(
                "restoring {} from {}",
                entry.original.display(),
                entry.backup.display()
            );
            if let Err(e) = entry.restore() {
                log::error!(
                    "CRITICAL: {}. The project still contains build flavor changes; \
                     recover manually from {}",
                    e,
                    entry.backup.display()
                );
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Drop for BackupSession {
    fn drop(&mut self) {
        if self.restored {
            return;
        }
        log::warn!("backup session dropped without restore, restoring build settings now");
        self.restored = true;
        let _ = self.restore_entries();
    }
}
