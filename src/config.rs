//! Configuration file support.
//!
//! A single TOML file can configure every role; each process reads only its
//! own section. Missing sections and fields fall back to the built-in
//! defaults.
//!
//! ```toml
//! [sender]
//! endpoint = "127.0.0.1:56731"
//! message_length = 16
//! interval = "1s"
//! batch_size = 200000
//! report_every = 200000
//!
//! [receiver]
//! endpoints = ["127.0.0.1:56738", "127.0.0.1:56739"]
//! report_every = 10000
//!
//! [broadcaster]
//! router_endpoint = "0.0.0.0:56731"
//! publisher_endpoints = ["0.0.0.0:56738", "0.0.0.0:56739"]
//! ```

use anyhow::Context;
use fanout_broadcaster::BroadcasterConfig;
use fanout_receiver::ReceiverConfig;
use fanout_sender::SenderConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for every role of the harness.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    pub sender: SenderConfig,
    pub receiver: ReceiverConfig,
    pub broadcaster: BroadcasterConfig,
}

impl HarnessConfig {
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("Failed to parse configuration")
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {path:?}"))?;
        Self::from_toml(&content).with_context(|| format!("Invalid configuration file {path:?}"))
    }

    /// Load from `path` when given, otherwise use the defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = HarnessConfig::from_toml(
            r#"
[sender]
batch_size = 200000
interval = "500ms"
"#,
        )
        .unwrap();

        assert_eq!(config.sender.batch_size, 200_000);
        assert_eq!(config.sender.interval, Duration::from_millis(500));
        assert_eq!(config.sender.message_length, 16);
        assert_eq!(config.receiver, ReceiverConfig::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = HarnessConfig::from_toml("[sender]\nbatchsize = 1\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let result = HarnessConfig::from_toml("[receiver]\nendpoints = [\"nowhere\"]\n");
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("nowhere"), "{message}");
    }

    #[test]
    fn test_defaults_round_trip() {
        let config = HarnessConfig::default();
        let text = config.to_toml().unwrap();
        assert_eq!(HarnessConfig::from_toml(&text).unwrap(), config);
    }
}
