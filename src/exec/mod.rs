// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`backend`] provides the `ProcessRunner` trait and `ExecutionResult`.
//! - [`process`] is the production runner on top of `tokio::process`.
//! - [`cancel`] is the one-shot signal used to abandon a wait.

pub mod backend;
pub mod cancel;
pub mod process;

pub use backend::{ExecutionResult, ProcessRunner};
pub use cancel::CancelSignal;
pub use process::RealProcessRunner;
