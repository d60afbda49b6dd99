// src/exec/executor.rs

//! Executor: one external player process and its output stream.

use std::process::Stdio;

use tokio::process::Command;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::level_filters::LevelFilter;
use tracing::{debug, info};

use crate::errors::{MpvStreamError, Result};
use crate::exec::pipe::{DEFAULT_PIPE_CAPACITY, PipeReader, pipe};
use crate::exec::watcher::watch_process;

/// Knobs for how a process is started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutorOptions {
    /// Forward the player's stderr to ours instead of discarding it.
    pub forward_stderr: bool,
    /// Chunks buffered in the output pipe.
    pub pipe_capacity: usize,
}

impl Default for ExecutorOptions {
    fn default() -> Self {
        Self {
            forward_stderr: false,
            pipe_capacity: DEFAULT_PIPE_CAPACITY,
        }
    }
}

impl ExecutorOptions {
    /// Forward stderr only when TRACE logging is active.
    pub fn from_log_level() -> Self {
        Self {
            forward_stderr: LevelFilter::current() == LevelFilter::TRACE,
            ..Self::default()
        }
    }
}

enum ExecutorState {
    Created,
    Running {
        pid: Option<u32>,
        cancel: CancellationToken,
        watcher: JoinHandle<()>,
    },
}

/// Owns one argument vector and, once started, one player process.
///
/// `start` spawns the process and returns the read end of its output pipe
/// right away; a background watcher closes that pipe after the process has
/// exited. `cancel` asks the OS to terminate the process and returns without
/// waiting.
pub struct Executor {
    args: Vec<String>,
    options: ExecutorOptions,
    state: ExecutorState,
}

impl Executor {
    pub fn new(args: Vec<String>, options: ExecutorOptions) -> Self {
        Self {
            args,
            options,
            state: ExecutorState::Created,
        }
    }

    /// Create and start in one go.
    pub fn spawn(args: Vec<String>, options: ExecutorOptions) -> Result<(Self, PipeReader)> {
        let mut executor = Self::new(args, options);
        let reader = executor.start()?;
        Ok((executor, reader))
    }

    /// OS pid of the started process, if the OS reported one.
    pub fn id(&self) -> Option<u32> {
        match &self.state {
            ExecutorState::Running { pid, .. } => *pid,
            ExecutorState::Created => None,
        }
    }

    /// Whether the watcher has closed the pipe.
    pub fn is_finished(&self) -> bool {
        match &self.state {
            ExecutorState::Running { watcher, .. } => watcher.is_finished(),
            ExecutorState::Created => false,
        }
    }

    /// Spawn the process and return the read end of its stdout pipe.
    ///
    /// Must be called from within a Tokio runtime. Never waits for the
    /// process to finish.
    pub fn start(&mut self) -> Result<PipeReader> {
        if !matches!(self.state, ExecutorState::Created) {
            return Err(MpvStreamError::AlreadyStarted);
        }
        let (program, rest) = self
            .args
            .split_first()
            .ok_or(MpvStreamError::EmptyCommand)?;

        debug!(cmd = ?self.args, "executing player command");

        let mut cmd = Command::new(program);
        cmd.args(rest)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(if self.options.forward_stderr {
                Stdio::inherit()
            } else {
                Stdio::null()
            })
            .kill_on_drop(true);

        let child = cmd.spawn().map_err(|source| MpvStreamError::StartFailed {
            program: program.clone(),
            source,
        })?;

        let pid = child.id();
        info!(program = %program, pid, "player process started");

        let (writer, reader) = pipe(self.options.pipe_capacity);
        let cancel = CancellationToken::new();
        let watcher = tokio::spawn(watch_process(
            program.clone(),
            child,
            writer,
            cancel.clone(),
        ));

        self.state = ExecutorState::Running {
            pid,
            cancel,
            watcher,
        };
        Ok(reader)
    }

    /// Request termination of the running process.
    ///
    /// Returns immediately; the pipe reports the eventual exit. Calling it
    /// again, or after the process exited, is a no-op.
    pub fn cancel(&self) -> Result<()> {
        match &self.state {
            ExecutorState::Running { cancel, .. } => {
                debug!(cmd = ?self.args, "cancel requested");
                cancel.cancel();
                Ok(())
            }
            ExecutorState::Created => Err(MpvStreamError::NoProcessToCancel),
        }
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("args", &self.args)
            .field("options", &self.options)
            .field("pid", &self.id())
            .field("finished", &self.is_finished())
            .finish()
    }
}
