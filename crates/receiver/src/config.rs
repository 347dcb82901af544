//! Receiver configuration.

use fanout_core::duration::serde_duration;
use fanout_core::{ConfigError, Endpoint, ReportPolicy};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// First port of the default publisher endpoint range.
pub const DEFAULT_PUBLISHER_BASE_PORT: u16 = 56738;
/// Number of publishers in the default topology.
pub const DEFAULT_PUBLISHER_COUNT: u16 = 5;
/// Default number of messages between report lines.
pub const DEFAULT_REPORT_EVERY: u64 = 10_000;
/// Default bound on establishing each publisher connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// The default publisher endpoints, `127.0.0.1:56738` through `:56742`.
pub fn default_publisher_endpoints() -> Vec<Endpoint> {
    (0..DEFAULT_PUBLISHER_COUNT)
        .map(|i| Endpoint::new("127.0.0.1", DEFAULT_PUBLISHER_BASE_PORT + i))
        .collect()
}

/// Startup configuration of one receiver process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReceiverConfig {
    /// Publisher endpoints to subscribe to, one connection each
    pub endpoints: Vec<Endpoint>,
    /// Give up if a publisher connection is not up within this time
    #[serde(with = "serde_duration")]
    pub connect_timeout: Duration,
    /// Emit a report line every this many messages
    pub report_every: u64,
    /// Emit report lines on a wall-clock cadence instead of a message count
    #[serde(
        with = "serde_duration::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub report_cadence: Option<Duration>,
    /// Stop after this many messages (unbounded when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_messages: Option<u64>,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            endpoints: default_publisher_endpoints(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            report_every: DEFAULT_REPORT_EVERY,
            report_cadence: None,
            max_messages: None,
        }
    }
}

impl ReceiverConfig {
    pub fn report_policy(&self) -> Result<ReportPolicy, ConfigError> {
        ReportPolicy::from_config(self.report_every, self.report_cadence)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoints.is_empty() {
            return Err(ConfigError::EmptyEndpoints("publisher"));
        }
        if self.connect_timeout.is_zero() {
            return Err(ConfigError::ZeroConnectTimeout);
        }
        self.report_policy()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_topology() {
        let config = ReceiverConfig::default();
        let ports: Vec<u16> = config.endpoints.iter().map(Endpoint::port).collect();
        assert_eq!(ports, vec![56738, 56739, 56740, 56741, 56742]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_endpoints_rejected() {
        let config = ReceiverConfig {
            endpoints: vec![],
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyEndpoints("publisher"))
        );
    }

    #[test]
    fn test_zero_connect_timeout_rejected() {
        let config = ReceiverConfig {
            connect_timeout: Duration::ZERO,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroConnectTimeout));
    }
}
