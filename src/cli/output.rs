//! Colored terminal output for the command line front end.
//!
//! Status lines go to stdout and warnings and errors to stderr. Quiet mode
//! keeps only warnings and errors. Colors are used when the stream is a
//! terminal.

use cyrup_termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use std::io::{self, IsTerminal, Write};

/// Verbosity-aware colored terminal printer.
#[derive(Debug, Clone, Copy)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
    stdout_color: ColorChoice,
    stderr_color: ColorChoice,
}

impl OutputManager {
    /// Create an output manager. `quiet` wins over `verbose`.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose: verbose && !quiet,
            quiet,
            stdout_color: color_choice(io::stdout().is_terminal()),
            stderr_color: color_choice(io::stderr().is_terminal()),
        }
    }

    /// Whether debug-level messages are shown.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Whether only warnings and errors are shown.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Print a message in verbose mode only.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if !self.verbose {
            return Ok(());
        }
        let mut out = StandardStream::stdout(self.stdout_color);
        styled_line(&mut out, &dimmed(), "  ", message)
    }

    /// Print a progress step.
    pub fn progress(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut out = StandardStream::stdout(self.stdout_color);
        styled_line(&mut out, &bold(Color::Cyan), "==>", message)
    }

    /// Print a success message.
    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut out = StandardStream::stdout(self.stdout_color);
        styled_line(&mut out, &bold(Color::Green), "✓", message)
    }

    /// Print a warning. Shown in quiet mode.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        let mut err = StandardStream::stderr(self.stderr_color);
        styled_line(&mut err, &bold(Color::Yellow), "warning:", message)
    }

    /// Print an error. Always shown.
    pub fn error(&self, message: &str) -> io::Result<()> {
        let mut err = StandardStream::stderr(self.stderr_color);
        styled_line(&mut err, &bold(Color::Red), "error:", message)
    }

    /// Print a section header.
    pub fn section(&self, title: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut out = StandardStream::stdout(self.stdout_color);
        section_header(&mut out, title)
    }

    /// Print an indented detail line.
    pub fn indent(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(StandardStream::stdout(self.stdout_color), "    {}", message)
    }
}

impl Default for OutputManager {
    fn default() -> Self {
        Self::new(false, false)
    }
}

fn color_choice(is_terminal: bool) -> ColorChoice {
    if is_terminal {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

fn bold(color: Color) -> ColorSpec {
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(color)).set_bold(true);
    spec
}

fn dimmed() -> ColorSpec {
    let mut spec = ColorSpec::new();
    spec.set_dimmed(true);
    spec
}

/// Writes `label` in `spec`, then the message in the default style.
fn styled_line<W: WriteColor>(
    out: &mut W,
    spec: &ColorSpec,
    label: &str,
    message: &str,
) -> io::Result<()> {
    out.set_color(spec)?;
    write!(out, "{}", label)?;
    out.reset()?;
    writeln!(out, " {}", message)
}

fn section_header<W: WriteColor>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out)?;
    out.set_color(&bold(Color::Blue))?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "-".repeat(title.chars().count()))?;
    out.reset()
}
