//! Error types for the load generator.

use fanout_core::ConfigError;
use fanout_payload::PayloadError;
use fanout_transport::TransportError;
use thiserror::Error;

/// Errors that end a send loop.
///
/// Every variant raised by the loop carries the number of messages that had
/// been accepted by the transport before the failure.
#[derive(Error, Debug)]
pub enum SenderError {
    #[error("Invalid sender configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Transport failed after {total_sent} messages: {source}")]
    Transport {
        total_sent: u64,
        #[source]
        source: TransportError,
    },

    #[error("Payload generation failed after {total_sent} messages: {source}")]
    Payload {
        total_sent: u64,
        #[source]
        source: PayloadError,
    },
}

impl SenderError {
    /// Messages successfully sent before the loop stopped, if known.
    pub fn total_sent(&self) -> Option<u64> {
        match self {
            SenderError::Config(_) => None,
            SenderError::Transport { total_sent, .. } | SenderError::Payload { total_sent, .. } => {
                Some(*total_sent)
            }
        }
    }
}
