//! Installer discovery in the engine output directory.

use crate::bundler::{Error, ErrorExt, Result};
use std::path::{Path, PathBuf};

/// File extensions (lowercase) treated as installers.
pub const INSTALLER_EXTENSIONS: &[&str] = &[
    "exe", "msi", "appx", "dmg", "pkg", "zip", "appimage", "deb", "rpm", "snap", "7z", "gz", "xz",
    "bz2",
];

/// Characters that may separate the version from the rest of a file name.
const VERSION_SEPARATORS: &[char] = &[' ', '-', '_', '.'];

/// Pre-release tags that make `1.0.0-<tag>` a different version than `1.0.0`.
const PRERELEASE_TAGS: &[&str] = &["alpha", "beta", "rc", "pre", "next", "canary", "dev"];

/// Finds the installers produced for a version.
pub trait ArtifactLocator {
    /// Installer paths in `output_dir` belonging to `version`.
    fn find_installers(&self, output_dir: &Path, version: &str) -> Result<Vec<PathBuf>>;
}

/// Default locator: regular files directly inside the output directory whose
/// name contains the version as a delimited token and whose extension is an
/// installer format.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstallerLocator;

impl ArtifactLocator for InstallerLocator {
    fn find_installers(&self, output_dir: &Path, version: &str) -> Result<Vec<PathBuf>> {
        if !output_dir.is_dir() {
            log::warn!("output directory not found: {}", output_dir.display());
            return Ok(Vec::new());
        }

        let pattern = format!(
            "{}/*{}*",
            glob::Pattern::escape(&output_dir.to_string_lossy()),
            glob::Pattern::escape(version)
        );
        log::debug!("scanning for installers: {}", pattern);

        let mut installers = Vec::new();
        for entry in glob::glob(&pattern)? {
            let path = entry.map_err(|e| Error::Fs {
                context: "scanning output directory",
                path: e.path().to_path_buf(),
                source: e.into_error(),
            })?;

            let metadata =
                std::fs::symlink_metadata(&path).fs_context("reading file metadata", &path)?;
            if !metadata.is_file() {
                log::debug!("skipping non-regular file: {}", path.display());
                continue;
            }

            let delimited = path
                .file_name()
                .map(|n| contains_version(&n.to_string_lossy(), version))
                .unwrap_or(false);
            if !delimited {
                log::debug!("skipping other version: {}", path.display());
                continue;
            }

            let is_installer = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| INSTALLER_EXTENSIONS.contains(&e.to_lowercase().as_str()))
                .unwrap_or(false);
            if is_installer {
                installers.push(path);
            } else {
                log::debug!("skipping non-installer: {}", path.display());
            }
        }

        installers.sort();
        Ok(installers)
    }
}

/// Whether `file_name` contains `version` bounded by separators, so that
/// `1.0.0` matches neither `11.0.0` nor `1.0.0-beta`.
fn contains_version(file_name: &str, version: &str) -> bool {
    if version.is_empty() {
        return false;
    }
    file_name.match_indices(version).any(|(start, _)| {
        let before = file_name[..start].chars().next_back();
        let after = &file_name[start + version.len()..];

        let starts_clean = before.is_none_or(|c| VERSION_SEPARATORS.contains(&c));
        let ends_clean = match after.chars().next() {
            None => true,
            Some('-') => {
                let next = after[1..].to_lowercase();
                !PRERELEASE_TAGS.iter().any(|tag| next.starts_with(tag))
            }
            Some(c) => VERSION_SEPARATORS.contains(&c),
        };
        starts_clean && ends_clean
    })
}
