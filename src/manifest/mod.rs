//! Project manifest (`package.json`) loading, typed access and rewriting.
//!
//! The document is kept as a [`serde_json::Value`] with insertion order
//! preserved, so fields this crate never touches survive a rewrite in
//! their original order.

use crate::bundler::{Error, ErrorExt, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Output directory electron-builder uses when the manifest names none.
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "dist";

/// A parsed project manifest bound to the file it was read from.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    document: Map<String, Value>,
}

impl Manifest {
    /// Reads and parses the manifest at `path`.
    ///
    /// # Errors
    ///
    /// - [`Error::ManifestNotFound`] if the file does not exist
    /// - [`Error::Json`] if it is not valid JSON
    /// - [`Error::InvalidManifest`] if the root is not an object
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ManifestNotFound(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path).fs_context("reading manifest", path)?;
        let value: Value = serde_json::from_str(&contents).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })?;

        match value {
            Value::Object(document) => Ok(Self {
                path: path.to_path_buf(),
                document,
            }),
            _ => Err(Error::InvalidManifest(path.to_path_buf())),
        }
    }

    /// Serializes with 2-space indentation and a trailing newline.
    pub fn to_json_string(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(&self.document).map_err(|source| {
            Error::Json {
                path: self.path.clone(),
                source,
            }
        })?;
        out.push('\n');
        Ok(out)
    }

    /// Writes the manifest back to the file it was loaded from.
    pub fn save(&self) -> Result<()> {
        let contents = self.to_json_string()?;
        std::fs::write(&self.path, contents).fs_context("writing manifest", &self.path)
    }

    /// Path the manifest was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Package name (`name`).
    pub fn name(&self) -> Option<&str> {
        self.document.get("name").and_then(Value::as_str)
    }

    /// Human-readable product name (`productName`).
    pub fn product_name(&self) -> Option<&str> {
        self.document.get("productName").and_then(Value::as_str)
    }

    /// Version string (`version`).
    pub fn version(&self) -> Option<&str> {
        self.document.get("version").and_then(Value::as_str)
    }

    /// Product name, falling back to the package name.
    pub fn display_name(&self) -> Option<&str> {
        self.product_name().or_else(|| self.name())
    }

    /// Application identifier from the build configuration (`build.appId`).
    pub fn build_app_id(&self) -> Option<&str> {
        self.document
            .get("build")
            .and_then(|build| build.get("appId"))
            .and_then(Value::as_str)
    }

    /// Installer output directory (`build.directories.output`), relative to
    /// the project root unless absolute. Defaults to `dist`.
    pub fn output_directory(&self) -> PathBuf {
        let configured = self
            .document
            .get("build")
            .and_then(|build| build.get("directories"))
            .and_then(|dirs| dirs.get("output"))
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_OUTPUT_DIRECTORY);

        let root = self.path.parent().unwrap_or_else(|| Path::new(""));
        root.join(configured)
    }

    /// Whether the manifest has a `build` object.
    pub fn has_build_config(&self) -> bool {
        matches!(self.document.get("build"), Some(Value::Object(_)))
    }

    /// Top-level fields.
    pub fn root(&self) -> &Map<String, Value> {
        &self.document
    }

    /// Mutable top-level fields.
    pub fn root_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.document
    }

    /// Mutable build configuration, created as `{}` when missing or not an object.
    pub fn build_config_mut(&mut self) -> &mut Map<String, Value> {
        object_entry(&mut self.document, "build")
    }
}

/// Returns the object stored under `key`, replacing any non-object value with `{}`.
pub(crate) fn object_entry<'a>(
    map: &'a mut Map<String, Value>,
    key: &str,
) -> &'a mut Map<String, Value> {
    let slot = map
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !slot.is_object() {
        log::warn!("replacing non-object `{}` with an empty object", key);
        *slot = Value::Object(Map::new());
    }
    match slot {
        Value::Object(object) => object,
        _ => unreachable!("slot was just set to an object"),
    }
}
