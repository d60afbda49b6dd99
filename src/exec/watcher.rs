// src/exec/watcher.rs

//! Background task that owns a running player process.
//!
//! One watcher runs per started [`Executor`](super::Executor). It copies the
//! child's stdout into the pipe writer and, concurrently, waits for the child
//! to exit (killing it first if cancellation is requested). The pipe is
//! closed only after both have finished, so a reader never sees EOF before
//! the exit status is known.

use std::io;
use std::process::ExitStatus;

use tokio::io::AsyncReadExt;
use tokio::process::{Child, ChildStdout};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use crate::errors::StreamError;
use crate::exec::pipe::PipeWriter;

const READ_BUF_SIZE: usize = 8 * 1024;

/// Wait for `child` to terminate, then close `writer` with the outcome.
pub async fn watch_process(
    program: String,
    mut child: Child,
    writer: PipeWriter,
    cancel: CancellationToken,
) {
    let stdout = child.stdout.take();
    let pid = child.id();

    let (status, writer) = tokio::join!(
        wait_for_exit(&program, &mut child, &cancel),
        pump_stdout(&program, stdout, writer),
    );

    match exit_outcome(&program, status) {
        None => {
            info!(program = %program, pid, "player process exited cleanly");
            writer.close().await;
        }
        Some(err) => {
            info!(program = %program, pid, error = %err, "player process terminated abnormally");
            writer.close_with_error(err).await;
        }
    }
}

/// Wait for the child, honouring a cancellation request by killing it.
///
/// After a kill the child is still waited on, so the reported status is the
/// real one.
async fn wait_for_exit(
    program: &str,
    child: &mut Child,
    cancel: &CancellationToken,
) -> io::Result<ExitStatus> {
    tokio::select! {
        status = child.wait() => status,

        _ = cancel.cancelled() => {
            info!(program = %program, pid = child.id(), "cancellation requested; killing player process");
            if let Err(e) = child.start_kill() {
                // Usually means the process is already gone; wait() reports it.
                warn!(program = %program, error = %e, "failed to kill player process");
            }
            child.wait().await
        }
    }
}

/// Copy the child's stdout into the pipe until EOF or until the reader leaves.
///
/// The writer is handed back so the caller can close it after exit.
async fn pump_stdout(
    program: &str,
    stdout: Option<ChildStdout>,
    writer: PipeWriter,
) -> PipeWriter {
    let Some(mut stdout) = stdout else {
        return writer;
    };

    let mut buf = vec![0u8; READ_BUF_SIZE];
    loop {
        match stdout.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                trace!(program = %program, bytes = n, "forwarding player output");
                if writer.write(buf[..n].to_vec()).await.is_err() {
                    // Dropping stdout here leaves the player with a closed pipe.
                    debug!(program = %program, "pipe reader dropped; discarding remaining output");
                    break;
                }
            }
            Err(e) => {
                warn!(program = %program, error = %e, "reading player stdout failed");
                break;
            }
        }
    }

    writer
}

/// Map the wait result to the pipe's terminal error, `None` meaning success.
fn exit_outcome(program: &str, status: io::Result<ExitStatus>) -> Option<StreamError> {
    match status {
        Ok(status) if status.success() => None,
        Ok(status) => Some(StreamError::ProcessExit {
            program: program.to_string(),
            code: status.code().unwrap_or(-1),
        }),
        Err(e) => Some(StreamError::ProcessWait {
            program: program.to_string(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wait_error_names_the_program() {
        let err = exit_outcome("mpv", Err(io::Error::other("no child processes")));
        assert_eq!(
            err,
            Some(StreamError::ProcessWait {
                program: "mpv".to_string(),
                reason: "no child processes".to_string(),
            })
        );
        assert_eq!(
            err.map(|e| e.to_string()).as_deref(),
            Some("waiting mpv cmd: no child processes")
        );
    }

    #[cfg(unix)]
    #[test]
    fn exit_codes_map_to_process_exit() {
        use std::os::unix::process::ExitStatusExt;

        assert_eq!(exit_outcome("mpv", Ok(ExitStatus::from_raw(0))), None);
        // Raw wait status: exit code lives in the high byte.
        assert_eq!(
            exit_outcome("mpv", Ok(ExitStatus::from_raw(3 << 8))),
            Some(StreamError::ProcessExit {
                program: "mpv".to_string(),
                code: 3
            })
        );
        // Killed by SIGKILL: no exit code.
        assert_eq!(
            exit_outcome("mpv", Ok(ExitStatus::from_raw(9))),
            Some(StreamError::ProcessExit {
                program: "mpv".to_string(),
                code: -1
            })
        );
    }
}
