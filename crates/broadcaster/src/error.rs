use fanout_core::ConfigError;
use fanout_transport::TransportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BroadcasterError {
    #[error("Invalid broadcaster configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to bind broadcaster sockets: {0}")]
    Bind(#[source] TransportError),

    #[error("Router receive failed after {processed} messages: {source}")]
    Receive {
        processed: u64,
        #[source]
        source: TransportError,
    },
}
