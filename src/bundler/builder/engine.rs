//! Packaging engine interface and the electron-builder subprocess engine.

use super::tool_detection::resolve_engine;
use crate::bundler::{Arch, Error, Platform, PlatformSet, Result};
use std::{
    collections::BTreeMap,
    future::Future,
    path::{Path, PathBuf},
    process::Stdio,
};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

/// Number of stderr lines kept in [`Error::EngineFailed`].
const STDERR_TAIL_LINES: usize = 20;

/// What to build: platform targets and architectures for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    /// Project directory the engine runs in.
    pub project_dir: PathBuf,

    /// Selected platforms, each with its target formats.
    ///
    /// An empty target list means the engine's defaults for that platform.
    pub targets: BTreeMap<Platform, Vec<String>>,

    /// Requested architectures.
    pub archs: Vec<Arch>,
}

impl BuildRequest {
    /// Request building default targets for every platform in `platforms`.
    pub fn new(project_dir: &Path, platforms: &PlatformSet, archs: &[Arch]) -> Self {
        Self {
            project_dir: project_dir.to_path_buf(),
            targets: platforms.iter().map(|p| (p, Vec::new())).collect(),
            archs: archs.to_vec(),
        }
    }

    /// Command-line arguments for electron-builder.
    ///
    /// ```
    /// use std::path::Path;
    /// use kodegen_bundler_flavor::bundler::{Arch, BuildRequest, PlatformSet};
    ///
    /// let platforms = PlatformSet::from_aliases(["darwin", "linux"]);
    /// let request = BuildRequest::new(Path::new("."), &platforms, &Arch::ALL);
    /// assert_eq!(
    ///     request.engine_args(),
    ///     ["--mac", "--linux", "--ia32", "--x64", "--arm64"]
    /// );
    /// ```
    pub fn engine_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        for (platform, targets) in &self.targets {
            args.push(platform.engine_flag().to_string());
            args.extend(targets.iter().cloned());
        }
        args.extend(self.archs.iter().map(|arch| arch.engine_flag().to_string()));
        args
    }
}

/// Result of a successful engine run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOutput {
    /// Process exit code, when the engine is a process.
    pub exit_code: Option<i32>,
    /// Diagnostic lines the engine emitted on stderr.
    pub warnings: Vec<String>,
}

/// External packaging engine.
pub trait PackagingEngine {
    /// Builds installers for `request`. Resolves once the engine has finished.
    fn build(&self, request: &BuildRequest) -> impl Future<Output = Result<EngineOutput>>;
}

/// Runs `electron-builder` as a subprocess.
#[derive(Debug, Clone, Default)]
pub struct ElectronBuilderEngine {
    executable: Option<PathBuf>,
}

impl ElectronBuilderEngine {
    /// Creates an engine, optionally pinned to an explicit executable.
    pub fn new(executable: Option<PathBuf>) -> Self {
        Self { executable }
    }
}

impl PackagingEngine for ElectronBuilderEngine {
    async fn build(&self, request: &BuildRequest) -> Result<EngineOutput> {
        let executable = resolve_engine(self.executable.as_deref(), &request.project_dir)?;
        let args = request.engine_args();
        log::info!("running {} {}", executable.display(), args.join(" "));

        let mut child = Command::new(&executable)
            .args(&args)
            .current_dir(&request.project_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                Error::EngineNotFound(format!("failed to start {}: {}", executable.display(), e))
            })?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        // Drain both pipes together so neither side blocks on a full buffer
        let (_, stderr_lines) = tokio::join!(
            async move {
                if let Some(stdout) = stdout {
                    drain_lines(stdout, |line| {
                        log::info!(target: "electron-builder", "{}", line);
                    })
                    .await;
                }
            },
            async move {
                let mut captured = Vec::new();
                if let Some(stderr) = stderr {
                    drain_lines(stderr, |line| {
                        log::warn!(target: "electron-builder", "{}", line);
                        captured.push(line);
                    })
                    .await;
                }
                captured
            }
        );

        let status = child.wait().await.map_err(|e| Error::EngineFailed {
            code: None,
            stderr: e.to_string(),
        })?;

        if !status.success() {
            let skip = stderr_lines.len().saturating_sub(STDERR_TAIL_LINES);
            return Err(Error::EngineFailed {
                code: status.code(),
                stderr: stderr_lines[skip..].join("\n"),
            });
        }

        Ok(EngineOutput {
            exit_code: status.code(),
            warnings: stderr_lines,
        })
    }
}

/// Reads `reader` to the end, passing each line to `on_line`.
///
/// Invalid UTF-8 is replaced with U+FFFD; the pipe is always read to EOF.
async fn drain_lines<R, F>(reader: R, mut on_line: F)
where
    R: AsyncRead + Unpin,
    F: FnMut(String),
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                on_line(line.trim_end_matches(['\n', '\r']).to_string());
            }
            Err(e) => {
                log::debug!("stopped reading engine output: {}", e);
                break;
            }
        }
    }
}
