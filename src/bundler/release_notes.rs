//! Release notes rendering.
//!
//! Release notes are kept in `RELEASENOTES.json`, keyed by version:
//!
//! ```json
//! {
//!   "1.1.0": {
//!     "features": ["Dark mode"],
//!     "bugfixes": ["Tray icon on Linux"]
//!   },
//!   "1.0.0": ["Initial release"]
//! }
//! ```
//!
//! A version maps to categorized item lists, a flat item list, or plain text.

use super::{Error, ErrorExt, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Source of release notes for the production flavor.
pub trait ReleaseNotes {
    /// Renders all versions to the project's markdown release notes file.
    fn write_markdown(&self) -> Result<()>;

    /// Renders the notes for one version as markdown.
    ///
    /// Returns an empty string when the version has no notes.
    fn read_markdown(&self, version: &str) -> Result<String>;
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum VersionNotes {
    Text(String),
    Items(Vec<String>),
    Sections(Map<String, Value>),
}

impl VersionNotes {
    fn to_markdown(&self) -> String {
        match self {
            VersionNotes::Text(text) => text.trim().to_string(),
            VersionNotes::Items(items) => bullet_list(items.iter().map(String::as_str)),
            VersionNotes::Sections(sections) => sections
                .iter()
                .filter_map(|(title, body)| {
                    let body = match body {
                        Value::String(text) => text.trim().to_string(),
                        Value::Array(items) => {
                            bullet_list(items.iter().filter_map(Value::as_str))
                        }
                        _ => return None,
                    };
                    if body.is_empty() {
                        return None;
                    }
                    Some(format!("#### {}\n\n{}", capitalize(title), body))
                })
                .collect::<Vec<_>>()
                .join("\n\n"),
        }
    }
}

fn bullet_list<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items
        .map(|item| format!("- {}", item.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn capitalize(title: &str) -> String {
    let mut chars = title.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Release notes backed by `RELEASENOTES.json`, rendered to `RELEASENOTES.md`.
#[derive(Debug, Clone)]
pub struct JsonReleaseNotes {
    source: PathBuf,
    target: PathBuf,
}

impl JsonReleaseNotes {
    /// Creates release notes reading `source` and rendering into `target`.
    pub fn new(source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Source JSON path.
    pub fn source(&self) -> &Path {
        &self.source
    }

    fn load(&self) -> Result<Vec<(String, VersionNotes)>> {
        if !self.source.is_file() {
            log::warn!("release notes not found: {}", self.source.display());
            return Ok(Vec::new());
        }

        let contents =
            std::fs::read_to_string(&self.source).fs_context("reading release notes", &self.source)?;
        let versions: Map<String, Value> =
            serde_json::from_str(&contents).map_err(|source| Error::Json {
                path: self.source.clone(),
                source,
            })?;

        versions
            .into_iter()
            .map(|(version, notes)| {
                serde_json::from_value(notes)
                    .map(|notes| (version, notes))
                    .map_err(|source| Error::Json {
                        path: self.source.clone(),
                        source,
                    })
            })
            .collect()
    }
}

impl ReleaseNotes for JsonReleaseNotes {
    fn write_markdown(&self) -> Result<()> {
        if !self.source.is_file() {
            log::warn!(
                "release notes not found, not writing {}",
                self.target.display()
            );
            return Ok(());
        }

        let versions = self.load()?;
        let mut document = String::new();
        for (version, notes) in &versions {
            document.push_str(&format!("## {}\n\n", version));
            let body = notes.to_markdown();
            if !body.is_empty() {
                document.push_str(&body);
                document.push_str("\n\n");
            }
        }

        std::fs::write(&self.target, document.trim_end().to_string() + "\n")
            .fs_context("writing release notes", &self.target)?;
        log::info!(
            "wrote release notes for {} version(s) to {}",
            versions.len(),
            self.target.display()
        );
        Ok(())
    }

    fn read_markdown(&self, version: &str) -> Result<String> {
        let notes = self
            .load()?
            .into_iter()
            .find(|(candidate, _)| candidate == version)
            .map(|(_, notes)| notes.to_markdown())
            .unwrap_or_default();

        if notes.is_empty() {
            log::debug!("no release notes for version {}", version);
        }
        Ok(notes)
    }
}
