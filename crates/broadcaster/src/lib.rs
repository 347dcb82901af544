//! Router-to-publisher relay for the fanout-bench harness.
//!
//! The broadcaster sits between the two halves of the topology: senders
//! connect dealer sockets to its router endpoint, receivers subscribe to its
//! publisher endpoints.
//!
//! ```text
//!  senders ──▶ RouterSource ──▶ Broadcaster ──▶ PublisherSink[lru] ──▶ receivers
//!                                   ▲    │
//!                                   └────┘ failed publishes are retried first
//! ```

pub mod args;
pub mod config;
pub mod error;
pub mod relay;

// Re-exports for convenience
pub use args::BroadcasterArgs;
pub use config::BroadcasterConfig;
pub use error::BroadcasterError;
pub use relay::{Broadcaster, Origin, RelayStats, StepOutcome};

use fanout_transport::{PublisherSink, RouterSource};
use tracing::info;

/// Validate `config`, bind every socket and relay forever.
pub async fn run(config: BroadcasterConfig) -> Result<RelayStats, BroadcasterError> {
    config.validate()?;

    let router = RouterSource::bind(&config.router_endpoint)
        .await
        .map_err(BroadcasterError::Bind)?;

    let mut publishers = Vec::with_capacity(config.publisher_endpoints.len());
    for endpoint in &config.publisher_endpoints {
        publishers.push(
            PublisherSink::bind(endpoint)
                .await
                .map_err(BroadcasterError::Bind)?,
        );
    }

    info!(
        "Broadcaster ready: router on {}, publishers on {}",
        router.endpoint(),
        publishers
            .iter()
            .map(|publisher| publisher.endpoint().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let mut broadcaster = Broadcaster::new(router, publishers, config.report_every()?)?;
    broadcaster.run(None).await
}
