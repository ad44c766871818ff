//! Build orchestration and the packaging engine seam.
//!
//! This module provides the [`Orchestrator`] that brackets an engine run
//! with a configuration backup, flavor edits and a guaranteed restore.
//!
//! # Module Organization
//!
//! - [`engine`] - [`PackagingEngine`] trait and the electron-builder engine
//! - [`orchestrator`] - Main [`Orchestrator`] and build reports
//! - [`tool_detection`] - Engine executable discovery

pub mod engine;
mod orchestrator;
pub mod tool_detection;

pub use engine::{BuildRequest, ElectronBuilderEngine, EngineOutput, PackagingEngine};
pub use orchestrator::{BuildOutcome, BuildReport, Orchestrator};
