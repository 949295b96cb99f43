//! Bounded relay from an async reader to a response body stream.
//!
//! [`channel`] returns a [`RelaySender`] that pumps a reader and a
//! [`RelayBody`] that yields the chunks. The two halves are joined by a
//! bounded `mpsc` channel, so the pump never reads further ahead than the
//! body has room for.

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::{Bytes, BytesMut};
use futures_core::Stream;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc;
use tracing::warn;

use vex_core::RelayConfig;

/// How a pump ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    /// The reader hit end-of-stream and every chunk was queued.
    Finished { bytes: u64 },
    /// The body was dropped before the reader finished.
    ConsumerGone { bytes: u64 },
    /// Reading failed; the error was forwarded to the body.
    ReadFailed { bytes: u64 },
}

impl RelayOutcome {
    /// Bytes handed to the body before the pump stopped.
    pub fn bytes(&self) -> u64 {
        match *self {
            Self::Finished { bytes }
            | Self::ConsumerGone { bytes }
            | Self::ReadFailed { bytes } => bytes,
        }
    }
}

/// Create a connected sender/body pair.
pub fn channel(config: RelayConfig) -> (RelaySender, RelayBody) {
    let (tx, rx) = mpsc::channel(config.capacity.max(1));
    (
        RelaySender {
            tx,
            chunk_size: config.chunk_size.max(1),
        },
        RelayBody { rx },
    )
}

/// Producer half: reads chunks and queues them for the body.
pub struct RelaySender {
    tx: mpsc::Sender<io::Result<Bytes>>,
    chunk_size: usize,
}

impl RelaySender {
    /// Copy `reader` into the body until end-of-stream, a read error, or
    /// the body is dropped.
    ///
    /// A channel slot is reserved before every read, so a stalled consumer
    /// stops the reads. Consuming `self` drops the sender on return, which
    /// is the body's end-of-stream signal.
    pub async fn pump<R>(self, mut reader: R) -> RelayOutcome
    where
        R: AsyncRead + Unpin,
    {
        let mut bytes = 0u64;

        loop {
            let permit = match self.tx.reserve().await {
                Ok(permit) => permit,
                Err(_) => return RelayOutcome::ConsumerGone { bytes },
            };

            let mut chunk = BytesMut::with_capacity(self.chunk_size);
            let read = tokio::select! {
                read = reader.read_buf(&mut chunk) => read,
                _ = self.tx.closed() => return RelayOutcome::ConsumerGone { bytes },
            };

            match read {
                Ok(0) => return RelayOutcome::Finished { bytes },
                Ok(n) => {
                    bytes += n as u64;
                    permit.send(Ok(chunk.freeze()));
                }
                Err(e) => {
                    warn!(error = %e, relayed = bytes, "relay read failed");
                    permit.send(Err(e));
                    return RelayOutcome::ReadFailed { bytes };
                }
            }
        }
    }
}

/// Consumer half: a stream of chunks ending when the sender is dropped.
pub struct RelayBody {
    rx: mpsc::Receiver<io::Result<Bytes>>,
}

impl Stream for RelayBody {
    type Item = io::Result<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().rx.poll_recv(cx)
    }
}
