//! CLI argument definitions for the receiver.

use crate::config::ReceiverConfig;
use clap::Args;
use fanout_core::{parse_duration, Endpoint};
use std::time::Duration;

/// Receiver overrides. Anything left unset keeps its configured value.
#[derive(Args, Clone, Debug, Default)]
pub struct ReceiverArgs {
    /// Publisher endpoints to subscribe to (comma-separated host:port list)
    #[arg(long = "endpoints", env = "FANOUT_RECEIVER_ENDPOINTS", value_delimiter = ',')]
    pub endpoints: Vec<Endpoint>,

    /// Give up if a publisher connection is not up within this time
    #[arg(long, env = "FANOUT_RECEIVER_CONNECT_TIMEOUT", value_parser = parse_duration)]
    pub connect_timeout: Option<Duration>,

    /// Emit a report line every this many messages
    #[arg(long, env = "FANOUT_RECEIVER_REPORT_EVERY")]
    pub report_every: Option<u64>,

    /// Report on a wall-clock cadence instead of a message count
    #[arg(long, env = "FANOUT_RECEIVER_REPORT_CADENCE", value_parser = parse_duration)]
    pub report_cadence: Option<Duration>,

    /// Stop after this many messages
    #[arg(long, env = "FANOUT_RECEIVER_EXPECT")]
    pub expect: Option<u64>,
}

impl ReceiverArgs {
    /// Layer these arguments over `config`.
    pub fn apply(&self, mut config: ReceiverConfig) -> ReceiverConfig {
        if !self.endpoints.is_empty() {
            config.endpoints = self.endpoints.clone();
        }
        if let Some(limit) = self.connect_timeout {
            config.connect_timeout = limit;
        }
        if let Some(every) = self.report_every {
            config.report_every = every;
        }
        if self.report_cadence.is_some() {
            config.report_cadence = self.report_cadence;
        }
        if self.expect.is_some() {
            config.max_messages = self.expect;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: ReceiverArgs,
    }

    #[test]
    fn test_endpoint_list() {
        let cli = TestCli::parse_from(["test", "--endpoints", "a:1,tcp://b:2", "--expect", "5"]);
        let config = cli.args.apply(ReceiverConfig::default());

        assert_eq!(
            config.endpoints,
            vec![Endpoint::new("a", 1), Endpoint::new("b", 2)]
        );
        assert_eq!(config.max_messages, Some(5));
    }

    #[test]
    fn test_every_flag_reads_an_environment_variable() {
        let command = TestCli::command();
        for arg in command.get_arguments() {
            if matches!(arg.get_id().as_str(), "help" | "version") {
                continue;
            }
            let env = arg
                .get_env()
                .and_then(|env| env.to_str())
                .unwrap_or_default();
            assert!(
                env.starts_with("FANOUT_"),
                "--{} has no FANOUT_* variable",
                arg.get_id()
            );
        }
    }

    #[test]
    fn test_no_flags_keeps_config() {
        let cli = TestCli::parse_from(["test"]);
        assert_eq!(
            cli.args.apply(ReceiverConfig::default()),
            ReceiverConfig::default()
        );
    }
}
