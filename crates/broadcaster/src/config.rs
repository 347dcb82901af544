//! Broadcaster configuration.

use fanout_core::{ConfigError, Endpoint};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU64;

pub const DEFAULT_REPORT_EVERY: u64 = 10_000;

/// Startup configuration of the broadcaster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BroadcasterConfig {
    /// Endpoint the router socket binds, senders connect here
    pub router_endpoint: Endpoint,
    /// Endpoints the publisher sockets bind, receivers connect here
    pub publisher_endpoints: Vec<Endpoint>,
    /// Emit a report line every this many processed messages
    pub report_every: u64,
}

impl Default for BroadcasterConfig {
    fn default() -> Self {
        Self {
            router_endpoint: Endpoint::new("0.0.0.0", 56731),
            publisher_endpoints: (56738..=56742)
                .map(|port| Endpoint::new("0.0.0.0", port))
                .collect(),
            report_every: DEFAULT_REPORT_EVERY,
        }
    }
}

impl BroadcasterConfig {
    pub fn report_every(&self) -> Result<NonZeroU64, ConfigError> {
        NonZeroU64::new(self.report_every).ok_or(ConfigError::ZeroReportInterval)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.publisher_endpoints.is_empty() {
            return Err(ConfigError::EmptyEndpoints("publisher"));
        }
        self.report_every()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_binds_all_interfaces() {
        let config = BroadcasterConfig::default();
        assert_eq!(config.router_endpoint.to_string(), "tcp://0.0.0.0:56731");
        assert_eq!(config.publisher_endpoints.len(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let empty = BroadcasterConfig {
            publisher_endpoints: vec![],
            ..Default::default()
        };
        assert_eq!(
            empty.validate(),
            Err(ConfigError::EmptyEndpoints("publisher"))
        );

        let zero = BroadcasterConfig {
            report_every: 0,
            ..Default::default()
        };
        assert_eq!(zero.validate(), Err(ConfigError::ZeroReportInterval));
    }
}
