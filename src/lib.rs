//! Build flavor wrapper for electron-builder projects.
//!
//! This library backs up a project's `package.json` and `icons/`, applies
//! build flavors (preview, production) to the manifest, runs electron-builder
//! and restores the project on every exit path. Installers can afterwards be
//! renamed to lowercase, hyphenated file names.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod manifest;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
