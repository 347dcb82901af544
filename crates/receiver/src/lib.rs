//! Multi-endpoint fan-in aggregator for the fanout-bench harness.
//!
//! The receiver subscribes to every configured publisher endpoint with a
//! catch-all filter, counts every message that arrives on any of them, and
//! logs a timestamped report line every `report_every` messages.

pub mod aggregator;
pub mod args;
pub mod config;
pub mod error;

// Re-exports for convenience
pub use aggregator::FanInAggregator;
pub use args::ReceiverArgs;
pub use config::ReceiverConfig;
pub use error::ReceiverError;

use fanout_transport::SubscriberSource;
use tracing::info;

/// Validate `config`, subscribe to every publisher and run the receive loop.
pub async fn run(config: ReceiverConfig) -> Result<u64, ReceiverError> {
    config.validate()?;

    info!("Initializing receiver");

    let source = SubscriberSource::connect_all(&config.endpoints, config.connect_timeout)
        .await
        .map_err(ReceiverError::Connect)?;

    let mut aggregator = FanInAggregator::new(source, config.report_policy()?);
    aggregator.run(config.max_messages).await
}
