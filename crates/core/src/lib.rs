//! Shared types for the fanout-bench throughput harness.
//!
//! Everything here is transport-agnostic and used by both ends of the
//! topology:
//!
//! - [`Endpoint`] - a `host:port` address rendered as `tcp://host:port`
//! - [`parse_duration`] - human-friendly interval parsing (`250ms`, `1s`, ...)
//! - [`ThroughputCounter`] - a loop-owned message counter that decides when
//!   a progress line is due
//! - [`ProgressReport`] - a timestamped counter snapshot rendered as a log line
//!
//! # Example
//!
//! ```rust
//! use fanout_core::{ReportPolicy, ThroughputCounter, ReportVerb};
//! use std::num::NonZeroU64;
//!
//! let policy = ReportPolicy::EveryMessages(NonZeroU64::new(2).unwrap());
//! let mut counter = ThroughputCounter::new(policy, ReportVerb::Received);
//!
//! assert!(counter.record_one().is_none());
//! let report = counter.record_one().unwrap();
//! assert_eq!(report.total, 2);
//! ```

pub mod counter;
pub mod duration;
pub mod endpoint;
pub mod error;
pub mod report;

// Re-exports for convenience
pub use counter::{ReportPolicy, ThroughputCounter};
pub use duration::{format_duration, parse_duration};
pub use endpoint::Endpoint;
pub use error::ConfigError;
pub use report::{ProgressReport, ReportVerb};
