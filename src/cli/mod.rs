//! Command line interface for the flavor build wrapper.
//!
//! Translates flags into [`Settings`](crate::bundler::Settings), runs the
//! [`Orchestrator`] and, when asked, renames the produced installers.

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use crate::bundler::{
    ArtifactRenamer, BuildOutcome, ElectronBuilderEngine, InstallerLocator, JsonReleaseNotes,
    Orchestrator, ReleaseNotes, SettingsBuilder,
};
use crate::error::{CliError, Result};
use anyhow::Context;

/// Execute a parsed command line.
///
/// Returns the process exit code: `0` when the build succeeded, `1` when the
/// engine reported a failure. The project is restored in both cases.
pub async fn execute(args: Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let config = RuntimeConfig::from(&args);
    let project_root = std::path::absolute(&args.project).with_context(|| {
        format!("resolving project directory {}", args.project.display())
    })?;

    let mut builder = SettingsBuilder::new()
        .project_root(&project_root)
        .rename_artifacts(args.rename)
        .skip_release_notes(args.no_release_notes);
    if !args.archs.is_empty() {
        builder = builder.archs(args.archs.clone());
    }
    if let Some(engine) = &args.engine {
        builder = builder.engine_path(engine);
    }
    let settings = builder.build()?;

    let notes = JsonReleaseNotes::new(
        settings.project().release_notes_json(),
        settings.project().release_notes_markdown(),
    );
    if settings.write_release_notes() {
        notes.write_markdown()?;
    }

    let platforms = args.platforms();
    let flavors = args.flavors();
    config.section("Flavored build")?;
    config.indent(&format!("project:   {}", project_root.display()))?;
    config.indent(&format!("platforms: {}", platforms.join(", ")))?;
    config.indent(&format!(
        "flavors:   {}",
        flavors.iter().map(|f| f.as_str()).collect::<Vec<_>>().join(", ")
    ))?;
    config.verbose_println(&format!(
        "archs: {}",
        settings
            .archs()
            .iter()
            .map(|a| a.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    ))?;

    let rename = settings.rename_artifacts();
    let manifest_path = settings.manifest_path().to_path_buf();
    let engine = ElectronBuilderEngine::new(settings.engine_path().map(|p| p.to_path_buf()));
    let orchestrator = Orchestrator::new(settings, engine, notes);

    let output = *config.output();
    let report = orchestrator
        .build(&platforms, &flavors, |report| {
            // Terminal output failures must not mask the build result
            let _ = match &report.outcome {
                BuildOutcome::Succeeded(_) => {
                    output.success(&format!("Build finished for {}", report.platforms))
                }
                BuildOutcome::Failed(reason) => {
                    output.error(&format!("Build failed for {}: {}", report.platforms, reason))
                }
            };
            let _ = output.verbose("Project configuration restored");
        })
        .await?;

    if !report.succeeded() {
        return Ok(1);
    }

    if rename {
        config.progress("Renaming installers")?;
        let locator = InstallerLocator;
        let renamed = ArtifactRenamer::new(&manifest_path, &locator).rename(|renamed| {
            for (from, to) in &renamed.renamed {
                let _ = output.indent(&format!(
                    "{} -> {}",
                    from.file_name().unwrap_or_default().to_string_lossy(),
                    to.file_name().unwrap_or_default().to_string_lossy()
                ));
            }
            let _ = output.success(&format!(
                "Renamed {} of {} installer(s)",
                renamed.renamed_count(),
                renamed.total
            ));
        })?;
        if renamed.total == 0 {
            config.warn("no installers found for the current version")?;
        }
    }

    Ok(0)
}
