//! fanout-bench library
//!
//! Throughput harness for a router/publisher fan-out topology. The three
//! roles live in their own crates and are re-exported here:
//!
//! - [`sender`] - rate-controlled load generation against a router endpoint
//! - [`receiver`] - fan-in aggregation across publisher endpoints
//! - [`broadcaster`] - router-to-publisher relay between the two
//!
//! # CLI Usage
//!
//! ```bash
//! # Relay between the two halves
//! fanout-bench broadcast
//!
//! # Count everything published on two of the endpoints
//! fanout-bench receive --endpoints 127.0.0.1:56738,127.0.0.1:56739
//!
//! # 200k messages per second
//! fanout-bench send --batch-size 200000 --interval 1s
//!
//! # One message per second
//! fanout-bench send --probe
//! ```

pub mod config;

pub use config::HarnessConfig;

// Re-export role crates for convenience
pub use fanout_broadcaster as broadcaster;
pub use fanout_receiver as receiver;
pub use fanout_sender as sender;
