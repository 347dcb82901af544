//! Command-line interface for fanout-bench
//!
//! # Usage Examples
//!
//! ## Topology
//! ```bash
//! # Router on :56731, publishers on :56738-56742
//! fanout-bench broadcast
//!
//! # Receiver subscribed to all five publishers
//! fanout-bench receive
//!
//! # Sender pushing 10k messages per second into the router
//! fanout-bench send
//! ```
//!
//! ## Load Shapes
//! ```bash
//! # High throughput: 200k 16-byte payloads per 1s window
//! fanout-bench send --batch-size 200000 --report-every 200000
//!
//! # Probe: one message and one report line per second
//! fanout-bench send --probe
//!
//! # Bounded run with a summary line at the end
//! fanout-bench send --windows 30
//! ```
//!
//! ## Configuration
//! ```bash
//! # Print the defaults, edit, and feed them back
//! fanout-bench config > fanout.toml
//! fanout-bench --config fanout.toml receive
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use fanout_bench::broadcaster::BroadcasterArgs;
use fanout_bench::receiver::ReceiverArgs;
use fanout_bench::sender::SenderArgs;
use fanout_bench::HarnessConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fanout-bench")]
#[command(about = "Throughput harness for a router/publisher fan-out topology")]
#[command(long_about = None)]
struct Cli {
    /// TOML configuration file (defaults are used when absent)
    #[arg(long, short = 'c', global = true, env = "FANOUT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Push fixed-size payloads into a router endpoint at a controlled rate
    Send {
        #[command(flatten)]
        args: SenderArgs,
    },

    /// Subscribe to every publisher endpoint and report arrival counts
    Receive {
        #[command(flatten)]
        args: ReceiverArgs,
    },

    /// Relay router messages to the least recently used publisher
    Broadcast {
        #[command(flatten)]
        args: BroadcasterArgs,
    },

    /// Print the effective configuration as TOML
    Config,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing, showing report lines unless RUST_LOG says otherwise
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = HarnessConfig::load(cli.config.as_deref())?;
    tracing::debug!("Loaded configuration: {config:?}");

    match cli.command {
        Commands::Send { args } => {
            let sender_config = args.apply(config.sender);
            fanout_bench::sender::run(sender_config)
                .await
                .context("Sender failed")?;
        }
        Commands::Receive { args } => {
            let receiver_config = args.apply(config.receiver);
            fanout_bench::receiver::run(receiver_config)
                .await
                .context("Receiver failed")?;
        }
        Commands::Broadcast { args } => {
            let broadcaster_config = args.apply(config.broadcaster);
            fanout_bench::broadcaster::run(broadcaster_config)
                .await
                .context("Broadcaster failed")?;
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}
