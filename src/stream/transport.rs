//! Chunked transport between the parse task and the consumer.
//!
//! The producer reads the input in bounded fragments, feeds them to the
//! flattener, and sends each resulting [`LineBatch`] over an mpsc channel.
//! It then waits for the consumer to fire the batch's [`AckToken`] before
//! reading the next fragment, so at most one unacknowledged batch is ever in
//! flight and parsing never outruns consumption.
//!
//! After apparent end-of-file the producer always sends one extra batch (the
//! flattener's `end()` output), so truncation errors that only surface at
//! true end-of-stream still reach the consumer.

use std::path::PathBuf;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::error::ParseError;
use crate::flatten::{FlattenOutput, Flattener};
use crate::models::JsonLine;
use crate::stream::StreamStats;

/// Upper bound on the bytes handed to the flattener per step.
pub const MAX_CHUNK_SIZE: usize = 10 * 1024;

/// Single-use acknowledgement handle carried by every batch.
///
/// Firing it releases the producer to read the next fragment. The pager
/// stores the latest token as its "load more" callback.
#[derive(Debug)]
pub struct AckToken(Option<oneshot::Sender<()>>);

impl AckToken {
    /// Create an armed token and the receiver the producer waits on.
    pub fn arm() -> (Self, oneshot::Receiver<()>) {
        let (tx, rx) = oneshot::channel();
        (Self(Some(tx)), rx)
    }

    /// A token that acknowledges nothing; useful in tests.
    pub fn spent() -> Self {
        Self(None)
    }

    /// Fire the acknowledgement. Only the first call has any effect.
    pub fn ack(&mut self) -> bool {
        match self.0.take() {
            Some(tx) => tx.send(()).is_ok(),
            None => false,
        }
    }

    pub fn is_spent(&self) -> bool {
        self.0.is_none()
    }
}

/// One producer-to-consumer message: the lines parsed from a fragment, the
/// terminal error if one occurred, byte accounting, and the backpressure
/// token.
#[derive(Debug)]
pub struct LineBatch {
    pub lines: Vec<JsonLine>,
    pub error: Option<ParseError>,
    pub stats: StreamStats,
    pub ack: AckToken,
}

/// Spawn the parse task for a file. Returns the batch receiver and the task
/// handle (abort it to cancel a load mid-flight).
pub fn spawn_file_parser(path: PathBuf) -> (mpsc::Receiver<LineBatch>, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(1);
    let handle = tokio::spawn(async move {
        match tokio::fs::File::open(&path).await {
            Ok(file) => run_parser(file, tx).await,
            Err(e) => error!(path = %path.display(), error = %e, "failed to open file"),
        }
    });
    (rx, handle)
}

/// Drive the read → flatten → send loop until end-of-stream, a structural
/// error, or the consumer going away.
pub async fn run_parser<R: AsyncRead + Unpin>(mut reader: R, tx: mpsc::Sender<LineBatch>) {
    let mut flattener = Flattener::new();
    let mut stats = StreamStats::default();
    let mut buf = BytesMut::with_capacity(MAX_CHUNK_SIZE);

    loop {
        buf.clear();
        let n = match reader.read_buf(&mut buf).await {
            Ok(n) => n,
            Err(e) => {
                error!(error = %e, "read failed mid-stream");
                return;
            }
        };
        if n == 0 {
            break;
        }
        stats.record_chunk(n);
        let out = flattener.convert_chunk(&buf[..n]);
        let had_error = out.error.is_some();
        debug!(
            chunk = stats.chunk_index,
            bytes = stats.processed_bytes,
            lines = out.lines.len(),
            "parsed chunk"
        );
        if !send_batch(&tx, out, stats).await {
            return;
        }
        if had_error {
            // a structural error terminates the pipeline
            return;
        }
    }

    // one extra batch past end-of-file captures truncation errors
    let out = flattener.end();
    send_batch(&tx, out, stats).await;
}

/// Send one batch and wait for its acknowledgement. Returns false when the
/// consumer is gone.
async fn send_batch(tx: &mpsc::Sender<LineBatch>, out: FlattenOutput, stats: StreamStats) -> bool {
    let (ack, ack_rx) = AckToken::arm();
    let batch = LineBatch {
        lines: out.lines,
        error: out.error,
        stats,
        ack,
    };
    if tx.send(batch).await.is_err() {
        return false;
    }
    ack_rx.await.is_ok()
}
