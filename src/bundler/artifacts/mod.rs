//! Installer lookup and renaming.

pub mod locator;
pub mod rename;

pub use locator::{ArtifactLocator, INSTALLER_EXTENSIONS, InstallerLocator};
pub use rename::{ArtifactRenamer, RenameReport, normalize_artifact_name};
