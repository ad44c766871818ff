//! Target platform names and alias normalization.

use std::{collections::BTreeSet, fmt};

/// Canonical build target platform.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Platform {
    /// Microsoft Windows
    Windows,
    /// Apple macOS
    Macos,
    /// Linux distributions
    Linux,
}

impl Platform {
    /// Resolves a platform alias by prefix.
    ///
    /// `win`, `windows`, `win32` map to [`Platform::Windows`]; `mac`, `macos`,
    /// `darwin` to [`Platform::Macos`]; anything starting with `linux` to
    /// [`Platform::Linux`]. Matching ignores ASCII case. Unknown names yield
    /// `None`.
    pub fn from_alias(alias: &str) -> Option<Self> {
        let alias = alias.trim().to_ascii_lowercase();
        if alias.starts_with("win") {
            Some(Platform::Windows)
        } else if alias.starts_with("mac") || alias.starts_with("darwin") {
            Some(Platform::Macos)
        } else if alias.starts_with("linux") {
            Some(Platform::Linux)
        } else {
            None
        }
    }

    /// Platform of the running host, if it is one the engine targets.
    pub fn host() -> Option<Self> {
        Self::from_alias(std::env::consts::OS)
    }

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Macos => "macos",
            Platform::Linux => "linux",
        }
    }

    /// Engine command-line flag selecting this platform.
    pub fn engine_flag(self) -> &'static str {
        match self {
            Platform::Windows => "--win",
            Platform::Macos => "--mac",
            Platform::Linux => "--linux",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deduplicated, ordered set of canonical platforms.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PlatformSet(BTreeSet<Platform>);

impl PlatformSet {
    /// Normalizes a list of platform aliases, dropping unrecognized entries.
    ///
    /// ```
    /// use kodegen_bundler_flavor::bundler::{Platform, PlatformSet};
    ///
    /// let set = PlatformSet::from_aliases(["darwin", "win32", "mac", "beos"]);
    /// assert_eq!(set.iter().collect::<Vec<_>>(), vec![Platform::Windows, Platform::Macos]);
    /// ```
    pub fn from_aliases<I, S>(aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        aliases
            .into_iter()
            .filter_map(|alias| {
                let platform = Platform::from_alias(alias.as_ref());
                if platform.is_none() {
                    log::debug!("ignoring unrecognized platform: {}", alias.as_ref());
                }
                platform
            })
            .collect()
    }

    /// Whether `platform` is selected.
    pub fn contains(&self, platform: Platform) -> bool {
        self.0.contains(&platform)
    }

    /// Iterates the selected platforms in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = Platform> + '_ {
        self.0.iter().copied()
    }

    /// Number of selected platforms.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no platform is selected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Platform> for PlatformSet {
    fn from_iter<T: IntoIterator<Item = Platform>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for PlatformSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.iter().map(Platform::as_str).collect();
        f.write_str(&names.join(", "))
    }
}
