//! Rate-controlled load generator for the fanout-bench harness.
//!
//! The sender connects one dealer socket to the router endpoint and then
//! repeats rate windows forever: send `batch_size` freshly generated
//! payloads, sleep for whatever is left of `interval`, repeat.
//!
//! # Architecture
//!
//! ```text
//!  PayloadGenerator ──▶ LoadGenerator ──▶ MessageSink (DealerSink)
//!                            │
//!                            ▼
//!                     RateController
//!                  (batch, then sleep rest)
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use fanout_sender::SenderConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), fanout_sender::SenderError> {
//!     let config = SenderConfig {
//!         batch_size: 200_000,
//!         max_windows: Some(10),
//!         ..Default::default()
//!     };
//!     let metrics = fanout_sender::run(config).await?;
//!     println!("{:.2} msg/sec", metrics.messages_per_second());
//!     Ok(())
//! }
//! ```

pub mod args;
pub mod config;
pub mod error;
pub mod generator;
pub mod metrics;
pub mod rate;

// Re-exports for convenience
pub use args::SenderArgs;
pub use config::SenderConfig;
pub use error::SenderError;
pub use generator::{LoadGenerator, WindowReport};
pub use metrics::SendMetrics;
pub use rate::{RateController, RateWindow, SendOne, WindowOutcome};

use fanout_transport::DealerSink;
use tracing::info;

/// Validate `config`, connect to the router and run the send loop.
///
/// Returns only when a bounded run completes or the loop fails.
pub async fn run(config: SenderConfig) -> Result<SendMetrics, SenderError> {
    config.validate()?;

    info!("Initializing sender for {}", config.endpoint);

    let sink = DealerSink::connect(&config.endpoint, config.connect_timeout)
        .await
        .map_err(|source| SenderError::Transport {
            total_sent: 0,
            source,
        })?;

    let mut generator = LoadGenerator::from_config(sink, &config)?;
    generator.run(config.max_windows).await
}
