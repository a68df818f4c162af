// src/config/mod.rs

//! Configuration loading and validation.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate basic invariants like non-empty tool and script names
//!   (`validate.rs`).
//!
//! The tool installation path lives here as an explicit value handed to
//! the steps; there is no process-wide configuration singleton.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, load_or_default};
pub use model::{
    CommitLogSection, ConfigFile, RawConfigFile, ReportSection, ScriptSpec, ToolSection,
    VersionUpSection,
};
