//! Error types for flavor, backup, build and artifact operations.

use std::{
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Result type alias for bundler operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the bundler library.
#[derive(Error, Debug)]
pub enum Error {
    /// Unqualified IO error
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// Filesystem operation failed on a specific path
    #[error("failed {context} `{}`: {source}", .path.display())]
    Fs {
        /// What was being done when the error occurred
        context: &'static str,
        /// Path the operation was applied to
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Manifest could not be serialized or deserialized
    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        /// Manifest path
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Project manifest does not exist
    #[error("manifest not found: {}", .0.display())]
    ManifestNotFound(PathBuf),

    /// Manifest root is not a JSON object
    #[error("manifest {} must contain a JSON object at its root", .0.display())]
    InvalidManifest(PathBuf),

    /// A field required by the current operation is missing
    #[error("manifest field `{field}` is missing or not a string")]
    MissingField {
        /// Dotted field path
        field: &'static str,
    },

    /// Could not create the configuration backup
    #[error("backup of {} failed: {reason}", .path.display())]
    BackupFailed {
        /// Entry being backed up
        path: PathBuf,
        /// Reason for the failure
        reason: String,
    },

    /// Could not move a backup back into place; the project is left mutated
    #[error("restore of {} from {} failed: {reason}", .original.display(), .backup.display())]
    RestoreFailed {
        /// Path that should have been restored
        original: PathBuf,
        /// Backup that should have been moved back
        backup: PathBuf,
        /// Reason for the failure
        reason: String,
    },

    /// Packaging engine executable could not be located
    #[error("packaging engine not found: {0}")]
    EngineNotFound(String),

    /// Packaging engine ran and reported a failure
    #[error("packaging engine failed (exit code {code:?}): {stderr}")]
    EngineFailed {
        /// Process exit code, if any
        code: Option<i32>,
        /// Tail of captured stderr
        stderr: String,
    },

    /// Artifact rename failed
    #[error("renaming {} to {} failed: {source}", .from.display(), .to.display())]
    RenameFailed {
        /// Current artifact path
        from: PathBuf,
        /// Normalized artifact path
        to: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Glob pattern error while looking up artifacts
    #[error("{0}")]
    Pattern(#[from] glob::PatternError),

    /// Directory traversal error
    #[error("{0}")]
    WalkDir(#[from] walkdir::Error),

    /// Path prefix stripping error
    #[error("{0}")]
    StripPrefix(#[from] std::path::StripPrefixError),

    /// Anything else
    #[error("{0}")]
    GenericError(String),
}

/// Adds path context to IO results.
pub trait ErrorExt<T> {
    /// Maps an IO error into [`Error::Fs`] with an operation description and path.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}

/// Returns early with an [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_context_keeps_path_and_operation() {
        let result: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = result
            .fs_context("reading manifest", "/tmp/package.json")
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("reading manifest"));
        assert!(message.contains("/tmp/package.json"));
        assert!(message.contains("gone"));
    }
}
