// tests/executor_lifecycle.rs
#![cfg(unix)]

mod common;
use crate::common::{init_tracing, sh, with_timeout};

use std::error::Error;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};

use mpvstream::errors::{MpvStreamError, StreamError};
use mpvstream::exec::{Executor, ExecutorOptions};

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn clean_exit_yields_all_output_then_eof() -> TestResult {
    init_tracing();

    let (executor, mut reader) = Executor::spawn(
        sh("printf 'chunk-1\\n'; printf 'chunk-2\\n'"),
        ExecutorOptions::default(),
    )?;
    assert!(executor.id().is_some());

    let mut out = String::new();
    with_timeout(reader.read_to_string(&mut out)).await?;
    assert_eq!(out, "chunk-1\nchunk-2\n");
    Ok(())
}

#[tokio::test]
async fn non_zero_exit_closes_stream_with_program_and_code() -> TestResult {
    init_tracing();

    let (_executor, mut reader) =
        Executor::spawn(sh("echo before-failure; exit 7"), ExecutorOptions::default())?;

    let mut out = Vec::new();
    let err = with_timeout(reader.read_to_end(&mut out))
        .await
        .expect_err("stream should end with an error");

    // Output produced before the failure is still delivered.
    assert_eq!(out, b"before-failure\n");
    assert_eq!(
        StreamError::from_io(&err),
        Some(&StreamError::ProcessExit {
            program: "sh".to_string(),
            code: 7,
        })
    );
    let msg = err.to_string();
    assert!(msg.contains("sh"), "message should name the program: {msg}");
    assert!(msg.contains('7'), "message should carry the exit code: {msg}");
    Ok(())
}

#[tokio::test]
async fn stream_is_not_closed_before_the_process_exits() -> TestResult {
    init_tracing();

    // stdout is closed long before the exit status is known.
    let (_executor, mut reader) = Executor::spawn(
        sh("printf early; exec 1>&-; sleep 0.3; exit 4"),
        ExecutorOptions::default(),
    )?;

    let mut out = Vec::new();
    let err = with_timeout(reader.read_to_end(&mut out))
        .await
        .expect_err("exit status 4 must reach the reader, not a bare EOF");

    assert_eq!(out, b"early");
    assert!(matches!(
        StreamError::from_io(&err),
        Some(StreamError::ProcessExit { code: 4, .. })
    ));
    Ok(())
}

#[tokio::test]
async fn spawn_failure_is_synchronous() {
    init_tracing();

    let result = Executor::spawn(
        vec!["/nonexistent/mpvstream-player".to_string(), "--pause".to_string()],
        ExecutorOptions::default(),
    );

    match result {
        Err(MpvStreamError::StartFailed { program, source }) => {
            assert_eq!(program, "/nonexistent/mpvstream-player");
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        Err(e) => panic!("Expected StartFailed error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got a running executor"),
    }
}

#[tokio::test]
async fn empty_argument_vector_is_rejected() {
    let mut executor = Executor::new(Vec::new(), ExecutorOptions::default());
    assert!(matches!(executor.start(), Err(MpvStreamError::EmptyCommand)));
    // Nothing was started, so there is nothing to cancel either.
    assert!(matches!(executor.cancel(), Err(MpvStreamError::NoProcessToCancel)));
}

#[tokio::test]
async fn cancel_before_start_fails() {
    let executor = Executor::new(sh("exit 0"), ExecutorOptions::default());
    match executor.cancel() {
        Err(MpvStreamError::NoProcessToCancel) => {}
        other => panic!("Expected NoProcessToCancel, got: {:?}", other),
    }
    assert!(executor.id().is_none());
    assert!(!executor.is_finished());
}

#[tokio::test]
async fn second_start_is_rejected() -> TestResult {
    let mut executor = Executor::new(sh("exit 0"), ExecutorOptions::default());
    let mut reader = executor.start()?;
    assert!(matches!(executor.start(), Err(MpvStreamError::AlreadyStarted)));

    let mut out = Vec::new();
    with_timeout(reader.read_to_end(&mut out)).await?;
    Ok(())
}

#[tokio::test]
async fn cancel_terminates_long_running_process() -> TestResult {
    init_tracing();

    let (executor, reader) =
        Executor::spawn(sh("echo ready; exec sleep 30"), ExecutorOptions::default())?;
    let mut lines = BufReader::new(reader).lines();

    let first = with_timeout(lines.next_line()).await?;
    assert_eq!(first.as_deref(), Some("ready"));

    executor.cancel()?;
    // Repeated cancellation is harmless.
    executor.cancel()?;

    let err = with_timeout(lines.next_line())
        .await
        .expect_err("killed process must close the stream with an error");
    assert_eq!(
        StreamError::from_io(&err),
        Some(&StreamError::ProcessExit {
            program: "sh".to_string(),
            code: -1,
        })
    );

    with_timeout(async {
        while !executor.is_finished() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await;
    Ok(())
}

#[tokio::test]
async fn stderr_is_discarded_unless_forwarded() -> TestResult {
    let (_executor, mut reader) = Executor::spawn(
        sh("echo to-stderr 1>&2; echo to-stdout"),
        ExecutorOptions::default(),
    )?;

    let mut out = String::new();
    with_timeout(reader.read_to_string(&mut out)).await?;
    assert_eq!(out, "to-stdout\n");
    Ok(())
}

#[tokio::test]
async fn large_output_is_streamed_through_small_pipe() -> TestResult {
    let options = ExecutorOptions {
        pipe_capacity: 1,
        ..ExecutorOptions::default()
    };
    let (_executor, mut reader) = Executor::spawn(sh("head -c 1000000 /dev/zero"), options)?;

    let mut out = Vec::new();
    let n = with_timeout(reader.read_to_end(&mut out)).await?;
    assert_eq!(n, 1_000_000);
    assert!(out.iter().all(|b| *b == 0));
    Ok(())
}

#[tokio::test]
async fn dropping_the_reader_lets_the_process_finish() -> TestResult {
    init_tracing();

    let (executor, reader) = Executor::spawn(sh("exec yes"), ExecutorOptions::default())?;
    drop(reader);

    // `yes` dies of SIGPIPE once nobody drains its stdout.
    with_timeout(async {
        while !executor.is_finished() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await;
    Ok(())
}
