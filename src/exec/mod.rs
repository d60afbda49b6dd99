// src/exec/mod.rs

//! Process execution layer.
//!
//! This module starts the external player with `tokio::process::Command`
//! and turns its stdout into a readable stream for the caller.
//!
//! - [`executor`] owns the `Executor` state machine (`start` / `cancel`).
//! - [`watcher`] is the per-process background task that pumps stdout and
//!   closes the stream once the process has exited.
//! - [`pipe`] is the in-process byte channel between the two.

pub mod executor;
pub mod pipe;
pub mod watcher;

pub use executor::{Executor, ExecutorOptions};
pub use pipe::{PipeReader, PipeWriter, pipe};
