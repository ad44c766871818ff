//! CPU architecture types and utilities.

use std::fmt;

/// CPU architecture requested from the packaging engine.
///
/// Every selected platform is built for each requested architecture the
/// engine supports there; unsupported combinations are skipped by the
/// engine itself.
///
/// # Examples
///
/// ```
/// use kodegen_bundler_flavor::bundler::Arch;
///
/// assert_eq!(Arch::X64.engine_flag(), "--x64");
/// assert_eq!(Arch::ALL.len(), 3);
/// ```
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    serde::Deserialize,
    serde::Serialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    /// x86 (32-bit) - Legacy 32-bit Intel
    Ia32,
    /// x86_64 / AMD64 (64-bit) - Most common desktop architecture
    X64,
    /// AArch64 / ARM64 (64-bit) - Apple Silicon, Windows on ARM
    Arm64,
}

impl Arch {
    /// The architectures requested when none are configured.
    pub const ALL: [Arch; 3] = [Arch::Ia32, Arch::X64, Arch::Arm64];

    /// Engine command-line flag selecting this architecture.
    pub fn engine_flag(self) -> &'static str {
        match self {
            Arch::Ia32 => "--ia32",
            Arch::X64 => "--x64",
            Arch::Arm64 => "--arm64",
        }
    }

    /// Lowercase name as used in artifact file names.
    pub fn as_str(self) -> &'static str {
        match self {
            Arch::Ia32 => "ia32",
            Arch::X64 => "x64",
            Arch::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
