// src/errors.rs

//! Crate-wide error types.
//!
//! Synchronous failures (binary lookup, spawn, invalid cancel, config) are
//! returned as [`MpvStreamError`]. Failures that only become known once the
//! player has exited travel through the output pipe as a [`StreamError`],
//! wrapped in an `io::Error` so that any `AsyncRead` consumer sees them.

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MpvStreamError {
    #[error("player binary '{binary}' not found: {reason}")]
    BinaryNotFound { binary: String, reason: String },

    #[error("starting cmd {program}: {source}")]
    StartFailed {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("executor already started a process")]
    AlreadyStarted,

    #[error("there is no command to cancel")]
    NoProcessToCancel,

    #[error("command template expanded to an empty argument vector")]
    EmptyCommand,

    #[error("reading OS entropy: {0}")]
    Entropy(String),

    #[error("media folder with id '{0}' not found")]
    MediaFolderNotFound(i32),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Stream(#[from] StreamError),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Terminal error attached to a closed output pipe.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// The player ran and exited with a non-zero status (or a signal, `-1`).
    #[error("{program} exited with non-zero status code: {code}")]
    ProcessExit { program: String, code: i32 },

    /// Waiting on the player failed at the OS level.
    #[error("waiting {program} cmd: {reason}")]
    ProcessWait { program: String, reason: String },

    /// The writing side went away without closing the pipe.
    #[error("pipe writer dropped before close")]
    BrokenPipe,
}

impl StreamError {
    /// Recover a `StreamError` from an `io::Error` produced by a pipe reader.
    pub fn from_io(err: &io::Error) -> Option<&StreamError> {
        err.get_ref().and_then(|inner| inner.downcast_ref::<StreamError>())
    }
}

impl From<StreamError> for io::Error {
    fn from(err: StreamError) -> Self {
        let kind = match err {
            StreamError::BrokenPipe => io::ErrorKind::BrokenPipe,
            _ => io::ErrorKind::Other,
        };
        io::Error::new(kind, err)
    }
}

pub type Result<T> = std::result::Result<T, MpvStreamError>;
