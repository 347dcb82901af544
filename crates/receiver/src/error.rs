use fanout_core::ConfigError;
use fanout_transport::TransportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReceiverError {
    #[error("Invalid receiver configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to connect to publishers: {0}")]
    Connect(#[source] TransportError),

    #[error("Receive failed after {total_received} messages: {source}")]
    Receive {
        total_received: u64,
        #[source]
        source: TransportError,
    },
}
