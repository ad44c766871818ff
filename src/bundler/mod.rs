//! Flavored build workflow for electron-builder projects.
//!
//! A build is bracketed by a configuration backup and restore:
//!
//! 1. [`ConfigBackup`] copies `package.json` and `icons/` to labeled siblings
//! 2. [`FlavorApplier`] edits the manifest for each requested [`Flavor`]
//! 3. a [`PackagingEngine`] builds the selected platforms
//! 4. the [`BackupSession`] moves the originals back
//! 5. optionally, [`ArtifactRenamer`] normalizes installer file names
//!
//! [`Orchestrator`] drives steps 1-4.

pub mod artifacts;
pub mod builder;
pub mod config;
pub mod error;
pub mod release_notes;
pub mod settings;
pub mod utils;

pub use artifacts::{
    ArtifactLocator, ArtifactRenamer, InstallerLocator, RenameReport, normalize_artifact_name,
};
pub use builder::{
    BuildOutcome, BuildReport, BuildRequest, ElectronBuilderEngine, EngineOutput, Orchestrator,
    PackagingEngine,
};
pub use config::{BackupEntry, BackupSession, ConfigBackup, FlavorApplier};
pub use error::{Error, ErrorExt, Result};
pub use release_notes::{JsonReleaseNotes, ReleaseNotes};
pub use settings::{
    Arch, Flavor, Platform, PlatformSet, ProjectLayout, Settings, SettingsBuilder,
};
pub use utils::path::extend_path;
