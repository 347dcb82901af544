//! In-process transport used by tests.
//!
//! [`channel`] returns a cloneable sink and a single source. Cloning the sink
//! models several publishers feeding one subscriber: the source sees one
//! interleaved stream and cannot tell the producers apart.

use crate::error::TransportError;
use crate::{MessageSink, MessageSource};
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Create a connected in-memory sink/source pair.
pub fn channel() -> (MemorySink, MemorySource) {
    let (tx, rx) = mpsc::unbounded_channel();
    let sent = Arc::new(AtomicU64::new(0));
    (
        MemorySink {
            tx,
            sent: sent.clone(),
        },
        MemorySource { rx },
    )
}

/// Sending half of an in-memory channel.
#[derive(Debug, Clone)]
pub struct MemorySink {
    tx: mpsc::UnboundedSender<Bytes>,
    sent: Arc<AtomicU64>,
}

impl MemorySink {
    /// Messages accepted across this sink and all of its clones.
    pub fn sent(&self) -> u64 {
        self.sent.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl MessageSink for MemorySink {
    async fn send(&mut self, payload: Bytes) -> Result<(), TransportError> {
        self.tx.send(payload).map_err(|_| TransportError::Closed)?;
        self.sent.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

/// Receiving half of an in-memory channel.
#[derive(Debug)]
pub struct MemorySource {
    rx: mpsc::UnboundedReceiver<Bytes>,
}

impl MemorySource {
    /// Take a message if one is already queued.
    pub fn try_recv(&mut self) -> Option<Bytes> {
        self.rx.try_recv().ok()
    }
}

#[async_trait]
impl MessageSource for MemorySource {
    async fn recv(&mut self) -> Result<Bytes, TransportError> {
        self.rx.recv().await.ok_or(TransportError::Closed)
    }
}

/// A sink that rejects its `fail_on`-th send (1-based) and every send after it.
#[derive(Debug)]
pub struct FailingSink<S> {
    inner: S,
    fail_on: u64,
    attempts: u64,
}

impl<S: MessageSink> FailingSink<S> {
    pub fn new(inner: S, fail_on: u64) -> Self {
        Self {
            inner,
            fail_on,
            attempts: 0,
        }
    }

    /// Number of sends attempted, including rejected ones.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }
}

#[async_trait]
impl<S: MessageSink> MessageSink for FailingSink<S> {
    async fn send(&mut self, payload: Bytes) -> Result<(), TransportError> {
        self.attempts += 1;
        if self.attempts >= self.fail_on {
            return Err(TransportError::Rejected(format!(
                "injected failure on send #{}",
                self.attempts
            )));
        }
        self.inner.send(payload).await
    }
}
