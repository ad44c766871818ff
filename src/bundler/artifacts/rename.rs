//! Installer renaming to `<name>-<version>-<arch>` style file names.

use super::locator::ArtifactLocator;
use crate::bundler::{Error, Result};
use crate::manifest::Manifest;
use regex::Regex;
use std::{
    path::{Path, PathBuf},
    sync::LazyLock,
};

static HYPHEN_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("-+").expect("hyphen pattern is valid"));

/// Computes the normalized file name for an installer.
///
/// The extension (after the last dot) is kept verbatim. The rest is
/// lowercased, the product name is replaced by the package name, spaces
/// and underscores become hyphens, hyphen runs collapse, `.x86-64` becomes
/// `-x86_64`, and surrounding hyphens are trimmed.
///
/// ```
/// use kodegen_bundler_flavor::bundler::normalize_artifact_name;
///
/// assert_eq!(
///     normalize_artifact_name("Foo Bar Setup 1.0.0.x86-64.exe", Some("Foo Bar"), Some("foo-bar")),
///     "foo-bar-setup-1.0.0-x86_64.exe"
/// );
/// ```
pub fn normalize_artifact_name(
    file_name: &str,
    product_name: Option<&str>,
    name: Option<&str>,
) -> String {
    let (title, extension) = match file_name.rfind('.') {
        Some(index) if index > 0 => file_name.split_at(index),
        _ => (file_name, ""),
    };

    let mut title = title.to_lowercase();

    if let (Some(product_name), Some(name)) = (product_name, name) {
        let product_name = product_name.to_lowercase();
        if !product_name.is_empty() {
            title = title.replace(&product_name, name);
        }
    }

    title = title.replace([' ', '_'], "-");
    title = HYPHEN_RUNS.replace_all(&title, "-").into_owned();
    title = title.replace(".x86-64", "-x86_64");

    format!("{}{}", title.trim_matches('-'), extension)
}

/// Counts from one renaming pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameReport {
    /// Installers found for the current version.
    pub total: usize,
    /// Files actually renamed, as `(from, to)`.
    pub renamed: Vec<(PathBuf, PathBuf)>,
}

impl RenameReport {
    /// Number of files renamed.
    pub fn renamed_count(&self) -> usize {
        self.renamed.len()
    }
}

/// Renames the installers of the manifest's current version in place.
pub struct ArtifactRenamer<'a, L: ArtifactLocator> {
    manifest_path: &'a Path,
    locator: &'a L,
}

impl<'a, L: ArtifactLocator> ArtifactRenamer<'a, L> {
    /// Renamer reading names and output directory from `manifest_path`.
    pub fn new(manifest_path: &'a Path, locator: &'a L) -> Self {
        Self {
            manifest_path,
            locator,
        }
    }

    /// Renames every located installer whose normalized name differs.
    ///
    /// `on_complete` runs once after the whole list was processed, also when
    /// no installers were found.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingField`] if the manifest has no `version`
    /// - [`Error::RenameFailed`] on the first rename that fails, or when the
    ///   target name is already taken by another file
    pub fn rename<F>(&self, on_complete: F) -> Result<RenameReport>
    where
        F: FnOnce(&RenameReport),
    {
        let manifest = Manifest::load(self.manifest_path)?;
        let version = manifest
            .version()
            .ok_or(Error::MissingField { field: "version" })?;
        let output_dir = manifest.output_directory();

        let artifacts = self.locator.find_installers(&output_dir, version)?;
        let mut report = RenameReport {
            total: artifacts.len(),
            renamed: Vec::new(),
        };

        for path in artifacts {
            let Some(file_name) = path.file_name().map(|n| n.to_string_lossy().into_owned())
            else {
                continue;
            };
            let output_name =
                normalize_artifact_name(&file_name, manifest.product_name(), manifest.name());
            log::debug!("artifact filename input: {}", file_name);
            log::debug!("artifact filename output: {}", output_name);

            if output_name == file_name {
                continue;
            }

            let output_path = path.with_file_name(&output_name);
            log::info!("artifact renaming {} --> {}", file_name, output_name);
            rename_file(&path, &output_path)?;
            report.renamed.push((path, output_path));
        }

        log::info!("artifacts total: {}", report.total);
        log::info!("artifacts renamed: {}", report.renamed_count());

        on_complete(&report);
        Ok(report)
    }
}

fn rename_file(from: &Path, to: &Path) -> Result<()> {
    // A case-only rename targets the same file on case-insensitive filesystems
    let case_only = from.file_name().map(|n| n.to_string_lossy().to_lowercase())
        == to.file_name().map(|n| n.to_string_lossy().to_lowercase());
    if to.exists() && !case_only {
        return Err(Error::RenameFailed {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                "target file already exists",
            ),
        });
    }

    std::fs::rename(from, to).map_err(|source| Error::RenameFailed {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_windows_installer() {
        assert_eq!(
            normalize_artifact_name(
                "Foo Bar Setup 1.0.0.x86-64.exe",
                Some("Foo Bar"),
                Some("foo-bar")
            ),
            "foo-bar-setup-1.0.0-x86_64.exe"
        );
    }

    #[test]
    fn collapses_underscores_and_spaces() {
        assert_eq!(
            normalize_artifact_name("Foo Bar__1.2.3 _ amd64.deb", Some("Foo Bar"), Some("foo-bar")),
            "foo-bar-1.2.3-amd64.deb"
        );
    }

    #[test]
    fn trims_leading_and_trailing_hyphens() {
        assert_eq!(
            normalize_artifact_name("_Foo Bar-1.0.0-.dmg", Some("Foo Bar"), Some("foo-bar")),
            "foo-bar-1.0.0.dmg"
        );
    }

    #[test]
    fn replaces_every_product_name_occurrence() {
        assert_eq!(
            normalize_artifact_name("Foo Bar Foo Bar 1.0.0.zip", Some("Foo Bar"), Some("fb")),
            "fb-fb-1.0.0.zip"
        );
    }

    #[test]
    fn keeps_extension_case() {
        assert_eq!(
            normalize_artifact_name("Foo Bar-1.0.0.AppImage", Some("Foo Bar"), Some("foo-bar")),
            "foo-bar-1.0.0.AppImage"
        );
    }

    #[test]
    fn missing_product_name_only_normalizes() {
        assert_eq!(
            normalize_artifact_name("My App 1.0.0.exe", None, Some("my-app")),
            "my-app-1.0.0.exe"
        );
    }

    #[test]
    fn already_normalized_name_is_unchanged() {
        let name = "foo-bar-setup-1.0.0.exe";
        assert_eq!(
            normalize_artifact_name(name, Some("Foo Bar"), Some("foo-bar")),
            name
        );
    }

    #[test]
    fn second_pass_turns_arch_underscore_into_hyphen() {
        let first = normalize_artifact_name(
            "Foo Bar Setup 1.0.0.x86-64.exe",
            Some("Foo Bar"),
            Some("foo-bar"),
        );
        assert_eq!(first, "foo-bar-setup-1.0.0-x86_64.exe");

        // Underscores always become hyphens, the `.x86-64` rewrite needs a dot
        assert_eq!(
            normalize_artifact_name(&first, Some("Foo Bar"), Some("foo-bar")),
            "foo-bar-setup-1.0.0-x86-64.exe"
        );
    }
}
