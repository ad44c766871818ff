//! Core Settings struct and implementations.

use super::{Arch, ProjectLayout};
use std::path::{Path, PathBuf};

/// Label inserted into backup file and directory names.
pub const DEFAULT_BACKUP_LABEL: &str = "backup";

/// Main settings for flavored builds.
///
/// Central configuration constructed via [`SettingsBuilder`](super::SettingsBuilder).
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_flavor::bundler::{Arch, SettingsBuilder};
///
/// # fn example() -> kodegen_bundler_flavor::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_root("path/to/electron-app")
///     .archs(vec![Arch::X64, Arch::Arm64])
///     .rename_artifacts(true)
///     .build()?;
/// assert!(settings.rename_artifacts());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Files touched by the build.
    project: ProjectLayout,

    /// Architectures requested from the engine.
    archs: Vec<Arch>,

    /// Explicit packaging engine executable.
    ///
    /// None means resolve from the project's `node_modules/.bin` or `PATH`.
    engine_path: Option<PathBuf>,

    /// Whether installers are renamed after a successful build.
    rename_artifacts: bool,

    /// Whether `RELEASENOTES.md` is regenerated before building.
    write_release_notes: bool,

    /// Label used for backup names.
    backup_label: String,
}

impl Settings {
    pub(super) fn new(
        project: ProjectLayout,
        archs: Vec<Arch>,
        engine_path: Option<PathBuf>,
        rename_artifacts: bool,
        write_release_notes: bool,
        backup_label: String,
    ) -> Self {
        Self {
            project,
            archs,
            engine_path,
            rename_artifacts,
            write_release_notes,
            backup_label,
        }
    }

    /// Returns the project layout.
    pub fn project(&self) -> &ProjectLayout {
        &self.project
    }

    /// Returns the project root directory.
    pub fn project_root(&self) -> &Path {
        &self.project.root
    }

    /// Returns the manifest path.
    pub fn manifest_path(&self) -> &Path {
        &self.project.manifest_path
    }

    /// Returns the requested architectures.
    pub fn archs(&self) -> &[Arch] {
        &self.archs
    }

    /// Returns the explicit engine executable, if configured.
    pub fn engine_path(&self) -> Option<&Path> {
        self.engine_path.as_deref()
    }

    /// Whether artifacts are renamed after a successful build.
    pub fn rename_artifacts(&self) -> bool {
        self.rename_artifacts
    }

    /// Whether release notes are rendered before building.
    pub fn write_release_notes(&self) -> bool {
        self.write_release_notes
    }

    /// Returns the backup label.
    pub fn backup_label(&self) -> &str {
        &self.backup_label
    }
}
