//! Sender configuration.

use crate::rate::RateWindow;
use fanout_core::duration::serde_duration;
use fanout_core::{ConfigError, Endpoint, ReportPolicy};
use fanout_payload::DEFAULT_MESSAGE_LENGTH;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU64;
use std::time::Duration;

/// Default router endpoint the sender connects to.
pub const DEFAULT_ROUTER_ENDPOINT: &str = "127.0.0.1:56731";
/// Default length of one rate window.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1_000);
/// Default number of messages per rate window.
pub const DEFAULT_BATCH_SIZE: u64 = 10_000;
/// Default number of messages between report lines.
pub const DEFAULT_REPORT_EVERY: u64 = 10_000;
/// Default bound on establishing the router connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Startup configuration of one sender process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SenderConfig {
    /// Router endpoint to connect to
    pub endpoint: Endpoint,
    /// Give up if the router connection is not up within this time
    #[serde(with = "serde_duration")]
    pub connect_timeout: Duration,
    /// Length of the generated content of each message
    pub message_length: usize,
    /// Length of one rate window
    #[serde(with = "serde_duration")]
    pub interval: Duration,
    /// Messages attempted per rate window
    pub batch_size: u64,
    /// Emit a report line every this many messages
    pub report_every: u64,
    /// Emit report lines on a wall-clock cadence instead of a message count
    #[serde(
        with = "serde_duration::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub report_cadence: Option<Duration>,
    /// Stop after this many windows (unbounded when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_windows: Option<u64>,
    /// Seed for payload generation (OS entropy when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::new("127.0.0.1", 56731),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            message_length: DEFAULT_MESSAGE_LENGTH,
            interval: DEFAULT_INTERVAL,
            batch_size: DEFAULT_BATCH_SIZE,
            report_every: DEFAULT_REPORT_EVERY,
            report_cadence: None,
            max_windows: None,
            seed: None,
        }
    }
}

impl SenderConfig {
    /// Switch to low-throughput probe mode: one message per interval and a
    /// report line per interval.
    pub fn into_probe(mut self) -> Self {
        self.batch_size = 1;
        self.interval = DEFAULT_INTERVAL;
        self.report_cadence = Some(DEFAULT_INTERVAL);
        self
    }

    pub fn rate_window(&self) -> Result<RateWindow, ConfigError> {
        let batch_size = NonZeroU64::new(self.batch_size).ok_or(ConfigError::ZeroBatchSize)?;
        Ok(RateWindow {
            interval: self.interval,
            batch_size,
        })
    }

    pub fn report_policy(&self) -> Result<ReportPolicy, ConfigError> {
        ReportPolicy::from_config(self.report_every, self.report_cadence)
    }

    /// Check everything that can be checked before connecting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.connect_timeout.is_zero() {
            return Err(ConfigError::ZeroConnectTimeout);
        }
        self.rate_window()?;
        self.report_policy()?;
        Ok(())
    }
}
