use std::time::Duration;
use thiserror::Error;
use zeromq::ZmqError;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Failed to connect to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: ZmqError,
    },

    #[error("Timed out after {timeout:?} connecting to {endpoint}")]
    ConnectTimeout { endpoint: String, timeout: Duration },

    #[error("Failed to bind {endpoint}: {source}")]
    Bind {
        endpoint: String,
        #[source]
        source: ZmqError,
    },

    #[error("Failed to subscribe on {endpoint}: {source}")]
    Subscribe {
        endpoint: String,
        #[source]
        source: ZmqError,
    },

    #[error("Send failed: {0}")]
    Send(#[source] ZmqError),

    #[error("Receive failed: {0}")]
    Receive(#[source] ZmqError),

    #[error("Received a message with no frames")]
    EmptyMessage,

    #[error("Send rejected: {0}")]
    Rejected(String),

    #[error("Socket closed")]
    Closed,
}
