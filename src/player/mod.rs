// src/player/mod.rs

//! Launching the external player.
//!
//! - [`resolver`] finds the player executable once and caches the result.
//! - [`tempname`] generates control-socket names.
//! - [`command`] expands the configured command template into argv.
//! - [`playback`] ties them together with an [`Executor`](crate::exec::Executor).

pub mod command;
pub mod playback;
pub mod resolver;
pub mod tempname;

pub use command::{DEFAULT_COMMAND_TEMPLATE, build_command};
pub use playback::{MpvPlayer, Playback};
pub use resolver::{BinaryResolver, DEFAULT_BINARY};
pub use tempname::temp_file_name;
