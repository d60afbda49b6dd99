// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod library;
pub mod logging;
pub mod player;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::cli::{CliArgs, Command};
use crate::config::{ConfigFile, load_or_default};
use crate::errors::StreamError;
use crate::library::{ConfiguredMediaFolders, MediaFolderRepository};
use crate::player::{BinaryResolver, MpvPlayer};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (plus CLI overrides)
/// - the shared binary resolver
/// - the selected subcommand
pub async fn run(args: CliArgs) -> Result<()> {
    let mut cfg = load_or_default(&args.config)
        .with_context(|| format!("loading config from {}", args.config.display()))?;
    if let Some(path) = args.mpv_path {
        cfg.player.path = Some(path);
    }

    // One resolver for the whole process; every player shares its cache.
    let resolver = Arc::new(BinaryResolver::new(cfg.player.path.clone()));

    match args.command {
        Command::Play {
            file,
            timeout,
            dry_run,
        } => {
            let timeout = timeout.map(Duration::from_secs);
            play(resolver, cfg, &file, timeout, dry_run).await
        }
        Command::Resolve => {
            let path = resolver.resolve()?;
            println!("{}", path.display());
            Ok(())
        }
        Command::Folders => {
            print_folders(&ConfiguredMediaFolders::new(&cfg.library))?;
            Ok(())
        }
    }
}

/// Play `file`, copying the player's stdout to ours until it exits.
///
/// Ctrl-C or the optional deadline cancels the player; the copy then runs
/// until the stream reports the exit.
async fn play(
    resolver: Arc<BinaryResolver>,
    cfg: ConfigFile,
    file: &Path,
    timeout: Option<Duration>,
    dry_run: bool,
) -> Result<()> {
    let player = MpvPlayer::new(resolver, cfg.player);

    if dry_run {
        let (args, socket) = player.command_for(file)?;
        println!("{}", args.join(" "));
        debug!(socket = %socket.display(), "dry-run complete (no execution)");
        return Ok(());
    }

    let mut playback = player.play(file)?;

    let deadline = async {
        match timeout {
            Some(after) => tokio::time::sleep(after).await,
            None => std::future::pending().await,
        }
    };
    tokio::pin!(deadline);

    let mut stdout = tokio::io::stdout();
    let copied = {
        let copy = tokio::io::copy(&mut playback.reader, &mut stdout);
        tokio::pin!(copy);

        let mut cancelled = false;
        let result = loop {
            tokio::select! {
                res = &mut copy => break res,

                _ = &mut deadline, if !cancelled => {
                    info!(timeout = ?timeout, "playback deadline reached; cancelling player");
                    playback.executor.cancel()?;
                    cancelled = true;
                }

                res = tokio::signal::ctrl_c(), if !cancelled => {
                    if let Err(e) = res {
                        warn!(error = %e, "failed to listen for Ctrl+C");
                    }
                    info!("interrupted; cancelling player");
                    playback.executor.cancel()?;
                    cancelled = true;
                }
            }
        };
        (result, cancelled)
    };
    stdout.flush().await?;

    if let Err(e) = playback.cleanup() {
        warn!(socket = %playback.socket.display(), error = %e, "failed to remove control socket");
    }

    match copied {
        (Ok(bytes), _) => {
            info!(bytes, "playback finished");
            Ok(())
        }
        (Err(e), true) if matches!(StreamError::from_io(&e), Some(StreamError::ProcessExit { .. })) => {
            info!(reason = %e, "playback cancelled");
            Ok(())
        }
        (Err(e), _) => Err(e).with_context(|| format!("playing {}", file.display())),
    }
}

fn print_folders(repo: &impl MediaFolderRepository) -> Result<()> {
    let folders = repo.get_all()?;
    if folders.is_empty() {
        println!("no media folders configured");
        return Ok(());
    }
    for folder in folders {
        println!("{:>3}  {}  {}", folder.id, folder.name, folder.path.display());
    }
    Ok(())
}
