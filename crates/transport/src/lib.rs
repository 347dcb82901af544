//! Message-socket abstraction for the fanout-bench harness.
//!
//! The harness only needs four things from its transport: send a message,
//! receive a message, connect to an endpoint and bind an endpoint. Those are
//! captured by the [`MessageSink`] and [`MessageSource`] traits so that the
//! send and receive loops are independent of the wire.
//!
//! Two implementations are provided:
//!
//! - [`zmq`] - ZeroMQ sockets for the four roles of the topology
//!   (dealer -> router, publisher -> subscriber)
//! - [`memory`] - in-process channels used by tests
//!
//! ```text
//!  DealerSink ──▶ RouterSource ──▶ (relay) ──▶ PublisherSink ×N ──▶ SubscriberSource
//!  (sender)                                                          (receiver)
//! ```

pub mod error;
pub mod memory;
pub mod zmq;

use async_trait::async_trait;
use bytes::Bytes;

pub use error::TransportError;
pub use zmq::{DealerSink, PublisherSink, RouterSource, SubscriberSource};

/// The sending half of a message socket.
#[async_trait]
pub trait MessageSink: Send {
    /// Submit one message. Resolves once the socket has accepted it, which
    /// says nothing about delivery.
    async fn send(&mut self, payload: Bytes) -> Result<(), TransportError>;
}

/// The receiving half of a message socket.
#[async_trait]
pub trait MessageSource: Send {
    /// Wait for the next message from any connected peer.
    async fn recv(&mut self) -> Result<Bytes, TransportError>;
}

#[async_trait]
impl<T: MessageSink + ?Sized> MessageSink for Box<T> {
    async fn send(&mut self, payload: Bytes) -> Result<(), TransportError> {
        (**self).send(payload).await
    }
}

#[async_trait]
impl<T: MessageSource + ?Sized> MessageSource for Box<T> {
    async fn recv(&mut self) -> Result<Bytes, TransportError> {
        (**self).recv().await
    }
}
