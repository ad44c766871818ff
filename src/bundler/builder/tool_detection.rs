//! Packaging engine executable discovery.
//!
//! Resolution order: an explicitly configured path, the project's local
//! `node_modules/.bin/electron-builder`, then `electron-builder` on `PATH`.

use crate::bundler::{Error, Result};
use std::{
    path::{Path, PathBuf},
    sync::LazyLock,
};

/// Executable name of the packaging engine.
pub const ENGINE_NAME: &str = "electron-builder";

/// `electron-builder` on `PATH`, looked up once per process.
pub static PATH_ENGINE: LazyLock<Option<PathBuf>> = LazyLock::new(|| match which::which(ENGINE_NAME)
{
    Ok(path) => {
        log::debug!("Found {} at: {}", ENGINE_NAME, path.display());
        Some(path)
    }
    Err(e) => {
        log::debug!("{} not found in PATH: {}", ENGINE_NAME, e);
        None
    }
});

/// Engine installed as a project dependency.
fn local_engine(project_dir: &Path) -> Option<PathBuf> {
    let bin_dir = project_dir.join("node_modules").join(".bin");
    let candidates: &[&str] = if cfg!(windows) {
        &["electron-builder.cmd", "electron-builder.exe"]
    } else {
        &["electron-builder"]
    };
    candidates
        .iter()
        .map(|name| bin_dir.join(name))
        .find(|path| path.is_file())
}

/// Resolves the packaging engine executable.
///
/// # Errors
///
/// [`Error::EngineNotFound`] when an explicit path does not exist or no
/// engine is installed locally or on `PATH`.
pub fn resolve_engine(explicit: Option<&Path>, project_dir: &Path) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.components().count() == 1 && !path.exists() {
            return which::which(path).map_err(|e| {
                Error::EngineNotFound(format!("{} ({})", path.display(), e))
            });
        }
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return Err(Error::EngineNotFound(format!(
            "{} does not exist",
            path.display()
        )));
    }

    if let Some(path) = local_engine(project_dir) {
        log::debug!("using project-local {}: {}", ENGINE_NAME, path.display());
        return Ok(path);
    }

    PATH_ENGINE.clone().ok_or_else(|| {
        Error::EngineNotFound(format!(
            "{} is neither installed in {} nor on PATH. \
             Install it with `npm install --save-dev electron-builder`.",
            ENGINE_NAME,
            project_dir.join("node_modules").display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_path_wins() {
        let tmp = TempDir::new().unwrap();
        let engine = tmp.path().join("my-builder");
        std::fs::write(&engine, "").unwrap();

        assert_eq!(resolve_engine(Some(&engine), tmp.path()).unwrap(), engine);
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = resolve_engine(Some(&tmp.path().join("missing")), tmp.path()).unwrap_err();
        assert!(matches!(err, Error::EngineNotFound(_)));
    }

    #[cfg(unix)]
    #[test]
    fn project_local_engine_is_preferred() {
        let tmp = TempDir::new().unwrap();
        let bin = tmp.path().join("node_modules").join(".bin");
        std::fs::create_dir_all(&bin).unwrap();
        std::fs::write(bin.join("electron-builder"), "").unwrap();

        assert_eq!(
            resolve_engine(None, tmp.path()).unwrap(),
            bin.join("electron-builder")
        );
    }
}
