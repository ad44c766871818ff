//! Build flavors: named, additive, temporary manifest edits.

use std::{convert::Infallible, fmt, str::FromStr};

/// A named set of manifest edits applied for the duration of one build.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Flavor {
    /// Side-by-side preview build: suffixed app id, uncompressed, unhardened.
    Preview,
    /// Release build: stamps release info for auto-update metadata.
    Production,
    /// Unrecognized flavor tag. Applies no edits.
    Other(String),
}

impl Flavor {
    /// Flavor tags recognized on the command line.
    pub const KNOWN: [&'static str; 2] = ["production", "preview"];

    /// Flavor tag as written in arguments and logs.
    pub fn as_str(&self) -> &str {
        match self {
            Flavor::Preview => "preview",
            Flavor::Production => "production",
            Flavor::Other(tag) => tag,
        }
    }
}

impl FromStr for Flavor {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "preview" => Flavor::Preview,
            "production" => Flavor::Production,
            other => Flavor::Other(other.to_string()),
        })
    }
}

impl From<&str> for Flavor {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(flavor) => flavor,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
