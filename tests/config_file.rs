//! Configuration files layered under command-line overrides.

use clap::Parser;
use fanout_bench::receiver::ReceiverArgs;
use fanout_bench::sender::SenderArgs;
use fanout_bench::HarnessConfig;
use fanout_core::Endpoint;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

#[derive(Parser)]
struct SendCli {
    #[command(flatten)]
    args: SenderArgs,
}

#[derive(Parser)]
struct ReceiveCli {
    #[command(flatten)]
    args: ReceiverArgs,
}

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_file_values_apply_to_each_role() {
    let file = write_config(
        r#"
[sender]
endpoint = "tcp://10.0.0.5:6000"
batch_size = 200000
report_every = 200000
interval = "2s"

[receiver]
endpoints = ["10.0.0.5:7000", "10.0.0.5:7001"]
report_every = 500
"#,
    );

    let config = HarnessConfig::load(Some(file.path())).unwrap();

    assert_eq!(config.sender.endpoint, Endpoint::new("10.0.0.5", 6000));
    assert_eq!(config.sender.batch_size, 200_000);
    assert_eq!(config.sender.interval, Duration::from_secs(2));
    assert_eq!(config.receiver.endpoints.len(), 2);
    assert_eq!(config.receiver.report_every, 500);
    assert_eq!(config.broadcaster, Default::default());
}

#[test]
fn test_flags_override_file_values() {
    let file = write_config(
        r#"
[sender]
batch_size = 200000
interval = "2s"
"#,
    );
    let config = HarnessConfig::load(Some(file.path())).unwrap();

    let cli = SendCli::try_parse_from(["send", "--batch-size", "50"]).unwrap();
    let sender = cli.args.apply(config.sender);

    assert_eq!(sender.batch_size, 50);
    assert_eq!(sender.interval, Duration::from_secs(2));
}

#[test]
fn test_probe_overrides_file_rate() {
    let file = write_config(
        r#"
[sender]
batch_size = 200000
report_every = 200000
"#,
    );
    let config = HarnessConfig::load(Some(file.path())).unwrap();

    let cli = SendCli::try_parse_from(["send", "--probe"]).unwrap();
    let sender = cli.args.apply(config.sender);

    assert_eq!(sender.batch_size, 1);
    assert_eq!(sender.interval, Duration::from_secs(1));
    assert_eq!(sender.report_cadence, Some(Duration::from_secs(1)));
}

#[test]
fn test_receiver_endpoint_list_from_flags() {
    let config = HarnessConfig::load(None).unwrap();

    let cli = ReceiveCli::try_parse_from([
        "receive",
        "--endpoints",
        "127.0.0.1:9001,tcp://127.0.0.1:9002",
    ])
    .unwrap();
    let receiver = cli.args.apply(config.receiver);

    assert_eq!(
        receiver.endpoints,
        vec![
            Endpoint::new("127.0.0.1", 9001),
            Endpoint::new("127.0.0.1", 9002)
        ]
    );
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = HarnessConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to read configuration file"));
}

#[test]
fn test_printed_defaults_load_back() {
    let printed = HarnessConfig::default().to_toml().unwrap();
    let file = write_config(&printed);

    let config = HarnessConfig::load(Some(file.path())).unwrap();
    assert_eq!(config, HarnessConfig::default());
}
