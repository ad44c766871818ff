//! Main build orchestration.
//!
//! This module provides the [`Orchestrator`] that brackets one engine run
//! with a configuration backup and restore.

use super::engine::{BuildRequest, EngineOutput, PackagingEngine};
use crate::bundler::{
    Flavor, PlatformSet, ReleaseNotes, Result, Settings,
    config::{ConfigBackup, FlavorApplier},
};

/// How the engine run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// The engine finished successfully.
    Succeeded(EngineOutput),
    /// The engine failed; the message is what it reported.
    Failed(String),
}

/// Summary of one orchestrated build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Canonical platforms that were requested from the engine.
    pub platforms: PlatformSet,
    /// Flavors applied for the duration of the build.
    pub flavors: Vec<Flavor>,
    /// Engine result.
    pub outcome: BuildOutcome,
}

impl BuildReport {
    /// Whether the engine run succeeded.
    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, BuildOutcome::Succeeded(_))
    }
}

/// Build orchestrator.
///
/// Runs backup → flavor edits → engine → restore. Restore runs on every
/// path out of the engine step, and the completion callback only fires
/// after it.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_flavor::bundler::{
///     ElectronBuilderEngine, Flavor, JsonReleaseNotes, Orchestrator, SettingsBuilder,
/// };
///
/// # async fn example() -> kodegen_bundler_flavor::bundler::Result<()> {
/// let settings = SettingsBuilder::new().project_root(".").build()?;
/// let notes = JsonReleaseNotes::new(
///     settings.project().release_notes_json(),
///     settings.project().release_notes_markdown(),
/// );
/// let orchestrator = Orchestrator::new(settings, ElectronBuilderEngine::default(), notes);
///
/// let report = orchestrator
///     .build(&["mac", "win"], &[Flavor::Production], |report| {
///         println!("build finished: {:?}", report.outcome);
///     })
///     .await?;
/// assert_eq!(report.platforms.len(), 2);
/// # Ok(())
/// # }
/// ```
pub struct Orchestrator<E, N> {
    settings: Settings,
    engine: E,
    notes: N,
}

impl<E, N> std::fmt::Debug for Orchestrator<E, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl<E: PackagingEngine, N: ReleaseNotes> Orchestrator<E, N> {
    /// Creates an orchestrator for the project described by `settings`.
    pub fn new(settings: Settings, engine: E, notes: N) -> Self {
        Self {
            settings,
            engine,
            notes,
        }
    }

    /// Returns a reference to the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the packaging engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Returns the release notes source.
    pub fn notes(&self) -> &N {
        &self.notes
    }

    /// Builds `platforms` with `flavors` applied, then restores the project.
    ///
    /// Platform names are normalized by prefix (`win*`, `mac*`, `darwin*`,
    /// `linux*`); unrecognized names are dropped.
    ///
    /// # Errors
    ///
    /// - Backup failures abort before anything is modified
    /// - Flavor failures are returned after the project is restored
    /// - Restore failures are returned and `on_complete` is not called
    ///
    /// An engine failure is not an error: it is logged and reported as
    /// [`BuildOutcome::Failed`].
    pub async fn build<S, F>(
        &self,
        platforms: &[S],
        flavors: &[Flavor],
        on_complete: F,
    ) -> Result<BuildReport>
    where
        S: AsRef<str>,
        F: FnOnce(&BuildReport),
    {
        let platforms = PlatformSet::from_aliases(platforms);
        log::debug!(
            "build platforms: [{}] flavors: [{}]",
            platforms,
            flavors.iter().map(Flavor::as_str).collect::<Vec<_>>().join(", ")
        );

        let project = self.settings.project();
        let session = ConfigBackup::new(project, self.settings.backup_label())
            .create()
            .await?;

        if let Err(e) = FlavorApplier::new(&project.manifest_path, &self.notes).apply(flavors) {
            log::error!("applying build flavors failed: {}", e);
            session.restore()?;
            return Err(e);
        }

        log::info!("build starting for platforms: {}", platforms);
        let request = BuildRequest::new(&project.root, &platforms, self.settings.archs());
        let outcome = match self.engine.build(&request).await {
            Ok(output) => {
                log::info!("build succeeded: {:?}", output);
                BuildOutcome::Succeeded(output)
            }
            Err(e) => {
                log::error!("build failed: {}", e);
                BuildOutcome::Failed(e.to_string())
            }
        };
        log::info!("completed build for all platforms");

        log::info!("restoring build settings to project: {}", project.root.display());
        session.restore()?;

        let report = BuildReport {
            platforms,
            flavors: flavors.to_vec(),
            outcome,
        };
        on_complete(&report);
        Ok(report)
    }
}
