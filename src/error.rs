//! Error types for the command-line front end.
//!
//! Library failures arrive as [`crate::bundler::Error`] and are wrapped here
//! together with argument and execution errors, each with recovery hints.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for all CLI operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Bundler errors
    #[error("Bundler error: {0}")]
    Bundler(#[from] crate::bundler::Error),

    /// Generic errors from anyhow, printed with their context chain
    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl BundlerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        use crate::bundler::Error as E;

        match self {
            BundlerError::Cli(CliError::InvalidArguments { .. }) => vec![
                "Run with --help to see the accepted flags".to_string(),
            ],
            BundlerError::Bundler(E::ManifestNotFound(_)) => vec![
                "Run from the project root or pass --project <DIR>".to_string(),
            ],
            BundlerError::Bundler(E::EngineNotFound(_)) => vec![
                "Install electron-builder: npm install --save-dev electron-builder".to_string(),
                "Or point --engine at an electron-builder executable".to_string(),
            ],
            BundlerError::Bundler(E::RestoreFailed { backup, .. }) => vec![
                format!(
                    "Move {} back into place before building again",
                    backup.display()
                ),
                "Check `git status` for leftover flavor changes".to_string(),
            ],
            BundlerError::Bundler(E::BackupFailed { .. }) => vec![
                "Check write permissions in the project directory".to_string(),
            ],
            BundlerError::Bundler(E::RenameFailed { .. }) => vec![
                "Remove or move conflicting files in the output directory".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }

    /// Check if this error is recoverable
    ///
    /// A failed restore leaves the project modified, everything else leaves
    /// it as it was.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            BundlerError::Bundler(crate::bundler::Error::RestoreFailed { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn restore_failure_is_not_recoverable() {
        let err = BundlerError::from(crate::bundler::Error::RestoreFailed {
            original: PathBuf::from("package.json"),
            backup: PathBuf::from("package-backup.json"),
            reason: "disk full".into(),
        });
        assert!(!err.is_recoverable());
        assert!(err.recovery_suggestions()[0].contains("package-backup.json"));
    }

    #[test]
    fn anyhow_errors_keep_their_context() {
        use anyhow::Context;

        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such directory",
        ));
        let err = BundlerError::from(result.context("resolving project directory").unwrap_err());

        assert_eq!(
            err.to_string(),
            "resolving project directory: no such directory"
        );
        assert!(err.is_recoverable());
    }

    #[test]
    fn argument_errors_point_at_help() {
        let err = BundlerError::from(CliError::InvalidArguments {
            reason: "nope".into(),
        });
        assert!(err.is_recoverable());
        assert!(err.recovery_suggestions()[0].contains("--help"));
    }
}
