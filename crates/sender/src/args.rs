//! CLI argument definitions for the sender.

use crate::config::SenderConfig;
use clap::Args;
use fanout_core::{parse_duration, Endpoint};
use std::time::Duration;

/// Sender overrides. Anything left unset keeps its configured value.
#[derive(Args, Clone, Debug, Default)]
pub struct SenderArgs {
    /// Router endpoint to connect to (host:port or tcp://host:port)
    #[arg(long, env = "FANOUT_SENDER_ENDPOINT")]
    pub endpoint: Option<Endpoint>,

    /// Give up if the router connection is not up within this time
    #[arg(long, env = "FANOUT_SENDER_CONNECT_TIMEOUT", value_parser = parse_duration)]
    pub connect_timeout: Option<Duration>,

    /// Length of the generated content of each message
    #[arg(long, env = "FANOUT_MESSAGE_LENGTH")]
    pub message_length: Option<usize>,

    /// Length of one rate window (e.g. 1000, 250ms, 1s)
    #[arg(long, env = "FANOUT_INTERVAL", value_parser = parse_duration)]
    pub interval: Option<Duration>,

    /// Messages attempted per rate window
    #[arg(long, env = "FANOUT_BATCH_SIZE")]
    pub batch_size: Option<u64>,

    /// Emit a report line every this many messages
    #[arg(long, env = "FANOUT_SENDER_REPORT_EVERY")]
    pub report_every: Option<u64>,

    /// Report on a wall-clock cadence instead of a message count
    #[arg(long, env = "FANOUT_SENDER_REPORT_CADENCE", value_parser = parse_duration)]
    pub report_cadence: Option<Duration>,

    /// Stop after this many rate windows
    #[arg(long, env = "FANOUT_WINDOWS")]
    pub windows: Option<u64>,

    /// Random seed for payload generation (same seed = same payloads)
    #[arg(long, env = "FANOUT_SEED")]
    pub seed: Option<u64>,

    /// Low-throughput probe mode: one message and one report line per second
    #[arg(long, env = "FANOUT_PROBE")]
    pub probe: bool,
}

impl SenderArgs {
    /// Layer these arguments over `config`.
    ///
    /// `--probe` is applied first so that explicit flags still win over it.
    /// An explicit `--report-every` switches back to message-count reporting
    /// unless `--report-cadence` is given as well.
    pub fn apply(&self, mut config: SenderConfig) -> SenderConfig {
        if self.probe {
            config = config.into_probe();
        }
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(limit) = self.connect_timeout {
            config.connect_timeout = limit;
        }
        if let Some(length) = self.message_length {
            config.message_length = length;
        }
        if let Some(interval) = self.interval {
            config.interval = interval;
        }
        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }
        if let Some(every) = self.report_every {
            config.report_every = every;
            config.report_cadence = None;
        }
        if self.report_cadence.is_some() {
            config.report_cadence = self.report_cadence;
        }
        if self.windows.is_some() {
            config.max_windows = self.windows;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};
    use fanout_core::ReportPolicy;
    use std::num::NonZeroU64;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: SenderArgs,
    }

    #[test]
    fn test_flags_override_config() {
        let cli = TestCli::parse_from([
            "test",
            "--endpoint",
            "tcp://10.0.0.1:6000",
            "--interval",
            "250ms",
            "--batch-size",
            "200000",
            "--windows",
            "3",
        ]);

        let config = cli.args.apply(SenderConfig::default());
        assert_eq!(config.endpoint, Endpoint::new("10.0.0.1", 6000));
        assert_eq!(config.interval, Duration::from_millis(250));
        assert_eq!(config.batch_size, 200_000);
        assert_eq!(config.max_windows, Some(3));
        assert_eq!(config.message_length, 16);
    }

    #[test]
    fn test_explicit_batch_wins_over_probe() {
        let cli = TestCli::parse_from(["test", "--probe", "--batch-size", "5"]);
        let config = cli.args.apply(SenderConfig::default());
        assert_eq!(config.batch_size, 5);
        assert_eq!(config.report_cadence, Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_explicit_report_every_wins_over_probe_cadence() {
        let cli = TestCli::parse_from(["test", "--probe", "--report-every", "5"]);
        let config = cli.args.apply(SenderConfig::default());

        assert_eq!(config.batch_size, 1);
        assert_eq!(config.report_cadence, None);
        assert_eq!(
            config.report_policy().unwrap(),
            ReportPolicy::EveryMessages(NonZeroU64::new(5).unwrap())
        );
    }

    #[test]
    fn test_explicit_cadence_kept_alongside_report_every() {
        let cli = TestCli::parse_from([
            "test",
            "--report-every",
            "5",
            "--report-cadence",
            "2s",
        ]);
        let config = cli.args.apply(SenderConfig::default());
        assert_eq!(config.report_cadence, Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_connect_timeout_flag() {
        let cli = TestCli::parse_from(["test", "--connect-timeout", "250ms"]);
        let config = cli.args.apply(SenderConfig::default());
        assert_eq!(config.connect_timeout, Duration::from_millis(250));
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
    fn test_invalid_interval_rejected_by_parser() {
        let result = TestCli::try_parse_from(["test", "--interval", "soon"]);
        assert!(result.is_err());
    }
}
