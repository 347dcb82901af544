//! CLI argument definitions for the broadcaster.

use crate::config::BroadcasterConfig;
use clap::Args;
use fanout_core::Endpoint;

/// Broadcaster overrides. Anything left unset keeps its configured value.
#[derive(Args, Clone, Debug, Default)]
pub struct BroadcasterArgs {
    /// Endpoint for the router socket to bind
    #[arg(long, env = "FANOUT_ROUTER_ENDPOINT")]
    pub router_endpoint: Option<Endpoint>,

    /// Endpoints for the publisher sockets to bind (comma-separated)
    #[arg(long, env = "FANOUT_PUBLISHER_ENDPOINTS", value_delimiter = ',')]
    pub publisher_endpoints: Vec<Endpoint>,

    /// Emit a report line every this many processed messages
    #[arg(long, env = "FANOUT_BROADCASTER_REPORT_EVERY")]
    pub report_every: Option<u64>,
}

impl BroadcasterArgs {
    pub fn apply(&self, mut config: BroadcasterConfig) -> BroadcasterConfig {
        if let Some(endpoint) = &self.router_endpoint {
            config.router_endpoint = endpoint.clone();
        }
        if !self.publisher_endpoints.is_empty() {
            config.publisher_endpoints = self.publisher_endpoints.clone();
        }
        if let Some(every) = self.report_every {
            config.report_every = every;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: BroadcasterArgs,
    }

    #[test]
    fn test_publisher_list_replaces_defaults() {
        let cli = TestCli::parse_from([
            "test",
            "--router-endpoint",
            "0.0.0.0:6000",
            "--publisher-endpoints",
            "0.0.0.0:6001,0.0.0.0:6002",
        ]);
        let config = cli.args.apply(BroadcasterConfig::default());

        assert_eq!(config.router_endpoint, Endpoint::new("0.0.0.0", 6000));
        assert_eq!(config.publisher_endpoints.len(), 2);
        assert_eq!(config.report_every, 10_000);
    }
}
