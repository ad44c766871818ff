//! Sibling path naming for backups and flavor-specific assets.

use std::path::{Path, PathBuf};

/// Separator placed between a file title and an added label.
pub const DEFAULT_SEPARATOR: &str = "-";

/// Inserts `label` into the file name of `path`, before its extension.
///
/// The base name is split at its first dot: `package.json` becomes
/// `package-backup.json`, `archive.tar.gz` becomes `archive-backup.tar.gz`
/// and a directory such as `icons` becomes `icons-backup`. An empty label
/// leaves the name untouched. A path without a file name is returned as is.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use kodegen_bundler_flavor::bundler::extend_path;
///
/// let backup = extend_path(Path::new("app/package.json"), "backup", "-");
/// assert_eq!(backup, Path::new("app/package-backup.json"));
/// ```
pub fn extend_path(path: &Path, label: &str, separator: &str) -> PathBuf {
    let Some(base_name) = path.file_name() else {
        return path.to_path_buf();
    };
    let base_name = base_name.to_string_lossy();

    let (title, extension) = match base_name.find('.') {
        Some(index) => base_name.split_at(index),
        None => (base_name.as_ref(), ""),
    };

    let mut file_name = String::with_capacity(base_name.len() + separator.len() + label.len());
    file_name.push_str(title);
    if !label.is_empty() {
        file_name.push_str(separator);
        file_name.push_str(label);
    }
    file_name.push_str(extension);

    match path.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_goes_before_extension() {
        assert_eq!(
            extend_path(Path::new("/project/package.json"), "backup", "-"),
            Path::new("/project/package-backup.json")
        );
    }

    #[test]
    fn directory_without_extension() {
        assert_eq!(
            extend_path(Path::new("/project/icons"), "backup", "-"),
            Path::new("/project/icons-backup")
        );
    }

    #[test]
    fn multi_dot_names_split_at_first_dot() {
        assert_eq!(
            extend_path(Path::new("dist/app.tar.gz"), "preview", "-"),
            Path::new("dist/app-preview.tar.gz")
        );
    }

    #[test]
    fn dotfile_keeps_whole_name_as_extension() {
        assert_eq!(
            extend_path(Path::new("conf/.env"), "backup", "-"),
            Path::new("conf/-backup.env")
        );
    }

    #[test]
    fn custom_separator() {
        assert_eq!(
            extend_path(Path::new("appicon.png"), "preview", "_"),
            Path::new("appicon_preview.png")
        );
    }

    #[test]
    fn empty_label_is_identity_on_name() {
        let path = Path::new("/project/package.json");
        assert_eq!(extend_path(path, "", "-"), path);
    }

    #[test]
    fn reextending_with_empty_label_is_stable() {
        for raw in [
            "package.json",
            "/a/b/icons",
            "relative/dir/file.tar.gz",
            "noext",
            "/x/.hidden",
        ] {
            let once = extend_path(Path::new(raw), "backup", DEFAULT_SEPARATOR);
            let twice = extend_path(&once, "", DEFAULT_SEPARATOR);
            assert_eq!(once, twice, "input: {raw}");
        }
    }

    #[test]
    fn root_is_returned_unchanged() {
        assert_eq!(extend_path(Path::new("/"), "backup", "-"), Path::new("/"));
    }
}
