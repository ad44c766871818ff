//! Filesystem and path helpers shared by the bundler modules.

pub mod fs;
pub mod path;
