// src/exec/pipe.rs

//! In-process byte pipe between a player's stdout and the consumer.
//!
//! The writer end is fed by the watcher task; the reader end is handed to
//! the caller and implements [`AsyncRead`]. Closing the writer is the only
//! termination signal the reader ever sees: a plain [`PipeWriter::close`]
//! yields EOF, [`PipeWriter::close_with_error`] makes every subsequent read
//! fail with that error. Both consume the writer, so a pipe is closed at most
//! once.

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use tokio::io::{AsyncRead, ReadBuf};
use tokio::sync::mpsc;

use crate::errors::StreamError;

/// Chunks buffered between writer and reader before `write` suspends.
pub const DEFAULT_PIPE_CAPACITY: usize = 16;

#[derive(Debug)]
enum Frame {
    Data(Vec<u8>),
    Close(Option<StreamError>),
}

/// Create a connected writer/reader pair.
pub fn pipe(capacity: usize) -> (PipeWriter, PipeReader) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let writer = PipeWriter { tx };
    let reader = PipeReader {
        rx,
        chunk: Vec::new(),
        pos: 0,
        end: None,
    };
    (writer, reader)
}

/// Writable end of a [`pipe`].
#[derive(Debug)]
pub struct PipeWriter {
    tx: mpsc::Sender<Frame>,
}

impl PipeWriter {
    /// Send a chunk to the reader, waiting for buffer space.
    ///
    /// Fails with `BrokenPipe` once the reader has been dropped.
    pub async fn write(&self, chunk: Vec<u8>) -> io::Result<()> {
        if chunk.is_empty() {
            return Ok(());
        }
        self.tx
            .send(Frame::Data(chunk))
            .await
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "io: read/write on closed pipe"))
    }

    /// Close the pipe; the reader sees EOF after draining buffered chunks.
    pub async fn close(self) {
        // A missing reader has nothing left to observe.
        let _ = self.tx.send(Frame::Close(None)).await;
    }

    /// Close the pipe with a terminal error for the reader.
    pub async fn close_with_error(self, err: StreamError) {
        let _ = self.tx.send(Frame::Close(Some(err))).await;
    }

    /// Whether the reader end is gone.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Readable end of a [`pipe`].
#[derive(Debug)]
pub struct PipeReader {
    rx: mpsc::Receiver<Frame>,
    chunk: Vec<u8>,
    pos: usize,
    // Some(None) = clean EOF, Some(Some(e)) = closed with error.
    end: Option<Option<StreamError>>,
}

impl AsyncRead for PipeReader {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();

        loop {
            if this.pos < this.chunk.len() {
                let n = buf.remaining().min(this.chunk.len() - this.pos);
                buf.put_slice(&this.chunk[this.pos..this.pos + n]);
                this.pos += n;
                return Poll::Ready(Ok(()));
            }

            if let Some(end) = &this.end {
                return Poll::Ready(match end {
                    None => Ok(()),
                    Some(err) => Err(err.clone().into()),
                });
            }

            match ready!(this.rx.poll_recv(cx)) {
                Some(Frame::Data(bytes)) => {
                    this.chunk = bytes;
                    this.pos = 0;
                }
                Some(Frame::Close(err)) => {
                    this.end = Some(err);
                    this.rx.close();
                }
                None => this.end = Some(Some(StreamError::BrokenPipe)),
            }
        }
    }
}
