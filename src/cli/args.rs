//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap. Every flag can also
//! be supplied through the matching `npm_config_*` variable, which is how
//! `npm run build --mac --preview` forwards flags to a script.

use crate::bundler::{Arch, Flavor};
use clap::{Parser, builder::FalseyValueParser};
use std::path::PathBuf;

/// Build flavor wrapper for electron-builder
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_bundler_flavor",
    version,
    about = "Build flavor wrapper for electron-builder",
    long_about = "Applies build flavors to package.json, runs electron-builder, and restores the project afterwards.

package.json and icons/ are backed up to package-backup.json and icons-backup before
any change and moved back when the build ends, whether it succeeded or not.

Usage:
  kodegen_bundler_flavor --mac --win --production
  kodegen_bundler_flavor --linux --preview --rename
  npm run build --mac --preview   (flags arrive as npm_config_* variables)

Defaults: the host platform and the production flavor."
)]
pub struct Args {
    /// Build for macOS
    #[arg(long, env = "npm_config_mac", value_parser = FalseyValueParser::new())]
    pub mac: bool,

    /// Build for macOS (alias)
    #[arg(long, env = "npm_config_macos", value_parser = FalseyValueParser::new())]
    pub macos: bool,

    /// Build for macOS (alias)
    #[arg(long, env = "npm_config_darwin", value_parser = FalseyValueParser::new())]
    pub darwin: bool,

    /// Build for Windows
    #[arg(long, env = "npm_config_win", value_parser = FalseyValueParser::new())]
    pub win: bool,

    /// Build for Windows (alias)
    #[arg(long, env = "npm_config_windows", value_parser = FalseyValueParser::new())]
    pub windows: bool,

    /// Build for Windows (alias)
    #[arg(long, env = "npm_config_win32", value_parser = FalseyValueParser::new())]
    pub win32: bool,

    /// Build for Linux
    #[arg(long, env = "npm_config_linux", value_parser = FalseyValueParser::new())]
    pub linux: bool,

    /// Apply the production flavor (release info for auto-update)
    #[arg(long, env = "npm_config_production", value_parser = FalseyValueParser::new())]
    pub production: bool,

    /// Apply the preview flavor (side-by-side installable preview build)
    #[arg(long, env = "npm_config_preview", value_parser = FalseyValueParser::new())]
    pub preview: bool,

    /// Project root containing package.json
    #[arg(
        short = 'p',
        long,
        value_name = "DIR",
        env = "FLAVOR_BUILD_PROJECT",
        default_value = "."
    )]
    pub project: PathBuf,

    /// Rename installers to lowercase, hyphenated names after a successful build
    #[arg(long)]
    pub rename: bool,

    /// electron-builder executable (default: node_modules/.bin, then PATH)
    #[arg(long, value_name = "PATH", env = "ELECTRON_BUILDER_PATH")]
    pub engine: Option<PathBuf>,

    /// Architecture to build; repeat for several (default: ia32, x64, arm64)
    #[arg(long = "arch", value_name = "ARCH", value_enum)]
    pub archs: Vec<Arch>,

    /// Do not render RELEASENOTES.md before building
    #[arg(long)]
    pub no_release_notes: bool,

    /// Show debug output
    #[arg(short, long)]
    pub verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.project.as_os_str().is_empty() {
            return Err("Project path cannot be empty".to_string());
        }
        if !self.project.is_dir() {
            return Err(format!(
                "Project directory does not exist: {}",
                self.project.display()
            ));
        }
        Ok(())
    }

    /// Platform names selected by flags, or the host platform when none are.
    pub fn platforms(&self) -> Vec<String> {
        let selected: Vec<String> = [
            ("mac", self.mac),
            ("macos", self.macos),
            ("darwin", self.darwin),
            ("win", self.win),
            ("windows", self.windows),
            ("win32", self.win32),
            ("linux", self.linux),
        ]
        .into_iter()
        .filter(|(_, set)| *set)
        .map(|(name, _)| name.to_string())
        .collect();

        if selected.is_empty() {
            vec![std::env::consts::OS.to_string()]
        } else {
            selected
        }
    }

    /// Flavors selected by flags, or production when none are.
    pub fn flavors(&self) -> Vec<Flavor> {
        let mut flavors = Vec::new();
        if self.production {
            flavors.push(Flavor::Production);
        }
        if self.preview {
            flavors.push(Flavor::Preview);
        }
        if flavors.is_empty() {
            flavors.push(Flavor::Production);
        }
        flavors
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        let output = super::OutputManager::new(args.verbose, args.quiet);
        Self { output }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }

    /// Print warning message if not in quiet mode
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.output.progress(message)
    }

    /// Print section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        self.output.section(title)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("kodegen_bundler_flavor").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn defaults_to_host_platform_and_production() {
        let args = parse(&[]);
        assert_eq!(args.platforms(), vec![std::env::consts::OS.to_string()]);
        assert_eq!(args.flavors(), vec![Flavor::Production]);
        assert!(args.archs.is_empty());
    }

    #[test]
    fn collects_platform_aliases_and_flavors() {
        let args = parse(&["--darwin", "--win32", "--preview"]);
        assert_eq!(args.platforms(), vec!["darwin", "win32"]);
        assert_eq!(args.flavors(), vec![Flavor::Preview]);
    }

    #[test]
    fn both_flavors_apply_production_first() {
        let args = parse(&["--preview", "--production"]);
        assert_eq!(args.flavors(), vec![Flavor::Production, Flavor::Preview]);
    }

    #[test]
    fn repeated_arch_flags() {
        let args = parse(&["--arch", "x64", "--arch", "arm64"]);
        assert_eq!(args.archs, vec![Arch::X64, Arch::Arm64]);
    }

    #[test]
    fn unknown_flags_are_rejected() {
        let result = Args::try_parse_from(["kodegen_bundler_flavor", "--beos"]);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_arch_is_rejected() {
        let result = Args::try_parse_from(["kodegen_bundler_flavor", "--arch", "sparc"]);
        assert!(result.is_err());
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        let result = Args::try_parse_from(["kodegen_bundler_flavor", "-v", "-q"]);
        assert!(result.is_err());
    }

    #[test]
    fn validate_rejects_missing_project() {
        let args = parse(&["--project", "/definitely/not/here"]);
        assert!(args.validate().unwrap_err().contains("does not exist"));
    }
}
