// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::default_config_path;

/// Command-line arguments for `mpvstream`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mpvstream",
    version,
    about = "Run an external audio player and stream its output.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML). A missing file means defaults.
    #[arg(long, value_name = "PATH", default_value_os_t = default_config_path())]
    pub config: PathBuf,

    /// Player executable; overrides `[player].path`.
    #[arg(long, value_name = "PATH")]
    pub mpv_path: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `MPVSTREAM_LOG` or a default level will be used. At
    /// `trace` the player's stderr is forwarded.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Play a file, copying the player's stdout to ours.
    Play {
        /// Media file to play.
        file: PathBuf,

        /// Cancel the player after this many seconds.
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,

        /// Print the expanded command instead of running it.
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the resolved player executable.
    Resolve,

    /// List the configured media folders.
    Folders,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
