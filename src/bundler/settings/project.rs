//! Project file layout.

use std::path::{Path, PathBuf};

/// Default manifest file name, relative to the project root.
pub const MANIFEST_FILE_NAME: &str = "package.json";

/// Default icon assets directory, relative to the project root.
pub const ICONS_DIR_NAME: &str = "icons";

/// Release notes source document, relative to the project root.
pub const RELEASE_NOTES_JSON: &str = "RELEASENOTES.json";

/// Rendered release notes, relative to the project root.
pub const RELEASE_NOTES_MARKDOWN: &str = "RELEASENOTES.md";

/// Locations of the files a flavored build touches.
///
/// All paths are resolved against the project root at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    /// Project root directory.
    pub root: PathBuf,

    /// Manifest mutated by flavors (`package.json`).
    pub manifest_path: PathBuf,

    /// Icon assets directory backed up alongside the manifest.
    pub icons_dir: PathBuf,
}

impl ProjectLayout {
    /// Layout with the conventional manifest and icons locations under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            manifest_path: root.join(MANIFEST_FILE_NAME),
            icons_dir: root.join(ICONS_DIR_NAME),
            root,
        }
    }

    /// Overrides the manifest location. Relative paths are taken from the root.
    pub fn with_manifest(mut self, manifest: impl AsRef<Path>) -> Self {
        self.manifest_path = self.root.join(manifest);
        self
    }

    /// Overrides the icons directory. Relative paths are taken from the root.
    pub fn with_icons_dir(mut self, icons_dir: impl AsRef<Path>) -> Self {
        self.icons_dir = self.root.join(icons_dir);
        self
    }

    /// Release notes source document.
    pub fn release_notes_json(&self) -> PathBuf {
        self.root.join(RELEASE_NOTES_JSON)
    }

    /// Rendered release notes document.
    pub fn release_notes_markdown(&self) -> PathBuf {
        self.root.join(RELEASE_NOTES_MARKDOWN)
    }
}
