//! Applies build flavors to the project manifest.

use crate::bundler::{Error, Flavor, ReleaseNotes, Result};
use crate::manifest::{Manifest, object_entry};
use chrono::{SecondsFormat, Utc};
use serde_json::{Value, json};
use std::path::Path;

/// Suffix appended to the app identifier by the preview flavor.
pub const PREVIEW_APP_ID_SUFFIX: &str = ".preview";

/// Suffix appended to the product name by the preview flavor.
pub const PREVIEW_PRODUCT_SUFFIX: &str = " Preview";

/// Compression mode used by preview builds.
pub const PREVIEW_COMPRESSION: &str = "store";

/// Applies an ordered list of flavors to a manifest file.
///
/// The manifest is read once, every flavor edits the in-memory document in
/// order, and the result is written once.
pub struct FlavorApplier<'a, N: ReleaseNotes> {
    manifest_path: &'a Path,
    notes: &'a N,
}

impl<'a, N: ReleaseNotes> FlavorApplier<'a, N> {
    /// Applier editing the manifest at `manifest_path`.
    pub fn new(manifest_path: &'a Path, notes: &'a N) -> Self {
        Self {
            manifest_path,
            notes,
        }
    }

    /// Applies `flavors` in order and rewrites the manifest.
    pub fn apply(&self, flavors: &[Flavor]) -> Result<()> {
        let mut manifest = Manifest::load(self.manifest_path)?;
        log::info!(
            "applying build configuration to: {}",
            self.manifest_path.display()
        );

        if !manifest.has_build_config() {
            manifest.build_config_mut();
        }

        for flavor in flavors {
            log::info!("adding flavor: {}", flavor);
            self.apply_one(&mut manifest, flavor)?;
        }

        manifest.save()
    }

    fn apply_one(&self, manifest: &mut Manifest, flavor: &Flavor) -> Result<()> {
        match flavor {
            Flavor::Preview => {
                apply_preview(manifest);
                Ok(())
            }
            Flavor::Production => self.apply_production(manifest),
            Flavor::Other(tag) => {
                log::debug!("flavor `{}` has no edits", tag);
                Ok(())
            }
        }
    }

    fn apply_production(&self, manifest: &mut Manifest) -> Result<()> {
        let version = manifest
            .version()
            .ok_or(Error::MissingField { field: "version" })?
            .to_string();
        let display_name = manifest
            .display_name()
            .ok_or(Error::MissingField { field: "name" })?
            .to_string();

        let release_notes = self.notes.read_markdown(&version)?;
        let release_info = json!({
            "releaseDate": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            "releaseName": format!("{} v{}", display_name, version),
            "releaseNotes": release_notes,
        });
        manifest
            .build_config_mut()
            .insert("releaseInfo".into(), release_info);
        Ok(())
    }
}

/// Preview edits: a separately installable, fast-to-build variant.
fn apply_preview(manifest: &mut Manifest) {
    let base_app_id = match manifest.build_app_id() {
        Some(app_id) => app_id.to_string(),
        None => {
            let fallback = format!("com.electron.{}", manifest.name().unwrap_or("app"));
            log::warn!("build.appId not set, using {}", fallback);
            fallback
        }
    };
    let app_id = format!("{}{}", base_app_id, PREVIEW_APP_ID_SUFFIX);
    let product_name = format!(
        "{}{}",
        manifest.display_name().unwrap_or_default(),
        PREVIEW_PRODUCT_SUFFIX
    );

    let build = manifest.build_config_mut();
    build.insert("appId".into(), Value::String(app_id.clone()));
    object_entry(build, "mac").insert("hardenedRuntime".into(), Value::Bool(false));
    build.insert("compression".into(), Value::String(PREVIEW_COMPRESSION.into()));

    let root = manifest.root_mut();
    root.insert("productName".into(), Value::String(product_name));
    root.insert("appId".into(), Value::String(app_id));
}
