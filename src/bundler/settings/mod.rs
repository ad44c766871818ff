//! Configuration structures for flavored builds.
//!
//! This module provides the build settings, project layout, and the
//! platform, architecture and flavor vocabularies, plus a builder for
//! constructing settings.

mod arch;
mod builder;
mod core;
mod flavor;
mod platform;
mod project;

// Re-export all public types
pub use arch::Arch;
pub use builder::SettingsBuilder;
pub use self::core::{DEFAULT_BACKUP_LABEL, Settings};
pub use flavor::Flavor;
pub use platform::{Platform, PlatformSet};
pub use project::{
    ICONS_DIR_NAME, MANIFEST_FILE_NAME, ProjectLayout, RELEASE_NOTES_JSON,
    RELEASE_NOTES_MARKDOWN,
};
