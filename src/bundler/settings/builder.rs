//! Builder for constructing Settings.

use super::{Arch, ProjectLayout, Settings, core::DEFAULT_BACKUP_LABEL};
use crate::bail;
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Provides a fluent API for building settings with validation.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_flavor::bundler::SettingsBuilder;
///
/// # fn example() -> kodegen_bundler_flavor::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_root(".")
///     .icons_dir("build/icons")
///     .engine_path("node_modules/.bin/electron-builder")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    project_root: Option<PathBuf>,
    manifest: Option<PathBuf>,
    icons_dir: Option<PathBuf>,
    archs: Option<Vec<Arch>>,
    engine_path: Option<PathBuf>,
    rename_artifacts: bool,
    skip_release_notes: bool,
    backup_label: Option<String>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the project root (directory containing `package.json`).
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn project_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the manifest location relative to the project root.
    ///
    /// Default: `package.json`
    pub fn manifest<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.manifest = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the icons directory relative to the project root.
    ///
    /// Default: `icons`
    pub fn icons_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.icons_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the architectures requested from the engine.
    ///
    /// Default: ia32, x64 and arm64
    pub fn archs(mut self, archs: Vec<Arch>) -> Self {
        self.archs = Some(archs);
        self
    }

    /// Sets an explicit packaging engine executable.
    ///
    /// Default: None (resolved at build time)
    pub fn engine_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.engine_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enables renaming of installers after a successful build.
    ///
    /// Default: false
    pub fn rename_artifacts(mut self, rename: bool) -> Self {
        self.rename_artifacts = rename;
        self
    }

    /// Disables rendering `RELEASENOTES.md` before the build.
    ///
    /// Default: false (release notes are rendered)
    pub fn skip_release_notes(mut self, skip: bool) -> Self {
        self.skip_release_notes = skip;
        self
    }

    /// Sets the label inserted into backup names.
    ///
    /// Default: `backup`
    pub fn backup_label(mut self, label: impl Into<String>) -> Self {
        self.backup_label = Some(label.into());
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `project_root` is missing, the architecture list
    /// is empty, or the backup label is empty.
    pub fn build(self) -> crate::bundler::Result<Settings> {
        let Some(root) = self.project_root else {
            bail!("project_root is required");
        };

        let mut project = ProjectLayout::new(root);
        if let Some(manifest) = self.manifest {
            project = project.with_manifest(manifest);
        }
        if let Some(icons_dir) = self.icons_dir {
            project = project.with_icons_dir(icons_dir);
        }

        let archs = match self.archs {
            Some(archs) if archs.is_empty() => bail!("at least one architecture is required"),
            Some(mut archs) => {
                archs.sort();
                archs.dedup();
                archs
            }
            None => Arch::ALL.to_vec(),
        };

        let backup_label = self
            .backup_label
            .unwrap_or_else(|| DEFAULT_BACKUP_LABEL.to_string());
        if backup_label.is_empty() {
            bail!("backup label cannot be empty");
        }

        let engine_path = self.engine_path.map(|path| {
            if path.is_absolute() || path.components().count() == 1 {
                path
            } else {
                project.root.join(path)
            }
        });

        Ok(Settings::new(
            project,
            archs,
            engine_path,
            self.rename_artifacts,
            !self.skip_release_notes,
            backup_label,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = SettingsBuilder::new().project_root("/p").build().unwrap();
        assert_eq!(settings.manifest_path(), Path::new("/p/package.json"));
        assert_eq!(settings.project().icons_dir, Path::new("/p/icons"));
        assert_eq!(settings.archs(), &Arch::ALL);
        assert_eq!(settings.backup_label(), "backup");
        assert!(settings.write_release_notes());
        assert!(!settings.rename_artifacts());
        assert!(settings.engine_path().is_none());
    }

    #[test]
    fn project_root_is_required() {
        let err = SettingsBuilder::new().build().unwrap_err();
        assert!(err.to_string().contains("project_root"));
    }

    #[test]
    fn empty_arch_list_is_rejected() {
        let err = SettingsBuilder::new()
            .project_root("/p")
            .archs(Vec::new())
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("architecture"));
    }

    #[test]
    fn archs_are_deduplicated() {
        let settings = SettingsBuilder::new()
            .project_root("/p")
            .archs(vec![Arch::Arm64, Arch::X64, Arch::Arm64])
            .build()
            .unwrap();
        assert_eq!(settings.archs(), &[Arch::X64, Arch::Arm64]);
    }

    #[test]
    fn relative_engine_path_resolves_against_project() {
        let settings = SettingsBuilder::new()
            .project_root("/p")
            .engine_path("node_modules/.bin/electron-builder")
            .build()
            .unwrap();
        assert_eq!(
            settings.engine_path(),
            Some(Path::new("/p/node_modules/.bin/electron-builder"))
        );

        let bare = SettingsBuilder::new()
            .project_root("/p")
            .engine_path("electron-builder")
            .build()
            .unwrap();
        assert_eq!(bare.engine_path(), Some(Path::new("electron-builder")));
    }
}
