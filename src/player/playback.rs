// src/player/playback.rs

//! `MpvPlayer`: from "play this file" to a running executor.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::PlayerConfig;
use crate::errors::Result;
use crate::exec::{Executor, ExecutorOptions, PipeReader};
use crate::player::command::build_command;
use crate::player::resolver::BinaryResolver;
use crate::player::tempname::temp_file_name;

/// Starts one player process per `play` call, sharing a single resolver.
#[derive(Debug, Clone)]
pub struct MpvPlayer {
    resolver: Arc<BinaryResolver>,
    config: PlayerConfig,
    options: ExecutorOptions,
}

/// A started playback: the executor, its output stream and control socket.
#[derive(Debug)]
pub struct Playback {
    pub executor: Executor,
    pub reader: PipeReader,
    pub socket: PathBuf,
}

impl MpvPlayer {
    /// `forward_stderr` is on when `config.trace` is set or TRACE logging is
    /// active.
    pub fn new(resolver: Arc<BinaryResolver>, config: PlayerConfig) -> Self {
        let mut options = ExecutorOptions::from_log_level();
        options.forward_stderr |= config.trace;
        Self::with_options(resolver, config, options)
    }

    pub fn with_options(
        resolver: Arc<BinaryResolver>,
        config: PlayerConfig,
        options: ExecutorOptions,
    ) -> Self {
        Self {
            resolver,
            config,
            options,
        }
    }

    pub fn resolver(&self) -> &BinaryResolver {
        &self.resolver
    }

    /// Options every executor started by this player gets.
    pub fn options(&self) -> ExecutorOptions {
        self.options
    }

    /// Argument vector and fresh control-socket path for playing `file`.
    pub fn command_for(&self, file: &Path) -> Result<(Vec<String>, PathBuf)> {
        let file = std::path::absolute(file)?;
        let socket = temp_file_name(&self.config.socket_prefix, &self.config.socket_suffix)?;

        let args = build_command(
            &self.config.command,
            &file.to_string_lossy(),
            &socket.to_string_lossy(),
            &self.resolver,
        )?;
        debug!(file = %file.display(), socket = %socket.display(), cmd = ?args, "built player command");
        Ok((args, socket))
    }

    /// Start the player for `file` and return as soon as the process exists.
    pub fn play(&self, file: &Path) -> Result<Playback> {
        let (args, socket) = self.command_for(file)?;
        let (executor, reader) = Executor::spawn(args, self.options)?;
        info!(file = %file.display(), pid = executor.id(), "playback started");

        Ok(Playback {
            executor,
            reader,
            socket,
        })
    }
}

impl Playback {
    pub fn cancel(&self) -> Result<()> {
        self.executor.cancel()
    }

    /// Remove the control socket if the player left one behind.
    pub fn cleanup(&self) -> Result<()> {
        match std::fs::remove_file(&self.socket) {
            Ok(()) => {
                debug!(socket = %self.socket.display(), "removed control socket");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
