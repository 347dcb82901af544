//! The load generator: payloads + rate control + one outbound socket.

use crate::config::SenderConfig;
use crate::error::SenderError;
use crate::metrics::SendMetrics;
use crate::rate::{RateController, RateWindow, SendOne, WindowOutcome};
use async_trait::async_trait;
use fanout_core::{ProgressReport, ReportPolicy, ReportVerb, ThroughputCounter};
use fanout_payload::PayloadGenerator;
use fanout_transport::MessageSink;
use tracing::{debug, error, info, trace};

/// Result of one completed rate window.
#[derive(Debug, Clone)]
pub struct WindowReport {
    pub outcome: WindowOutcome,
    /// Cumulative messages sent after this window.
    pub total_sent: u64,
    /// Report lines emitted during this window, in order.
    pub reports: Vec<ProgressReport>,
}

/// Drives a [`MessageSink`] at a controlled rate with fresh payloads.
///
/// The `total_sent` counter belongs to the generator and is only touched by
/// its own loop.
pub struct LoadGenerator<S> {
    sink: S,
    payloads: PayloadGenerator,
    controller: RateController,
    counter: ThroughputCounter,
    pending_reports: Vec<ProgressReport>,
}

impl<S: MessageSink> LoadGenerator<S> {
    pub fn new(
        sink: S,
        payloads: PayloadGenerator,
        window: RateWindow,
        policy: ReportPolicy,
    ) -> Self {
        Self {
            sink,
            payloads,
            controller: RateController::new(window),
            counter: ThroughputCounter::new(policy, ReportVerb::Sent),
            pending_reports: Vec::new(),
        }
    }

    /// Build a generator for an already connected sink from configuration.
    pub fn from_config(sink: S, config: &SenderConfig) -> Result<Self, SenderError> {
        let payloads = match config.seed {
            Some(seed) => PayloadGenerator::with_seed(config.message_length, seed),
            None => PayloadGenerator::new(config.message_length),
        };

        Ok(Self::new(
            sink,
            payloads,
            config.rate_window()?,
            config.report_policy()?,
        ))
    }

    pub fn total_sent(&self) -> u64 {
        self.counter.total()
    }

    pub fn window(&self) -> RateWindow {
        self.controller.window()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Run a single rate window.
    pub async fn run_window(&mut self) -> Result<WindowReport, SenderError> {
        let controller = self.controller;
        let outcome = controller.run_window(&mut *self).await?;

        if let Some(report) = self.counter.poll_cadence() {
            info!("{report}");
            self.pending_reports.push(report);
        }

        if outcome.overran {
            debug!(
                "Window overran its interval: {} messages in {:?}",
                outcome.sent, outcome.elapsed
            );
        } else {
            debug!(
                "Window complete: {} messages in {:?}, slept {:?}",
                outcome.sent, outcome.elapsed, outcome.slept
            );
        }

        Ok(WindowReport {
            outcome,
            total_sent: self.counter.total(),
            reports: std::mem::take(&mut self.pending_reports),
        })
    }

    /// Run windows until `max_windows` is reached, or forever when `None`.
    ///
    /// The first failure stops the loop; nothing is retried.
    pub async fn run(&mut self, max_windows: Option<u64>) -> Result<SendMetrics, SenderError> {
        let window = self.window();
        info!(
            "Sending {} message(s) of {} characters every {:?}",
            window.batch_size,
            self.payloads.length(),
            window.interval
        );

        let mut metrics = SendMetrics::default();

        while max_windows.map_or(true, |max| metrics.windows < max) {
            let report = self.run_window().await.inspect_err(|e| {
                error!("Sender stopped: {e}");
            })?;
            metrics.observe(&report.outcome);
        }

        info!(
            "Send complete: {} messages in {} windows over {:?} ({:.2} msg/sec, {} overrun)",
            metrics.messages_sent,
            metrics.windows,
            metrics.total_duration(),
            metrics.messages_per_second(),
            metrics.overrun_windows
        );

        Ok(metrics)
    }
}

#[async_trait]
impl<S: MessageSink> SendOne for LoadGenerator<S> {
    type Error = SenderError;

    async fn send_one(&mut self) -> Result<(), SenderError> {
        let total_sent = self.counter.total();

        let payload = self
            .payloads
            .next_payload()
            .map_err(|source| SenderError::Payload { total_sent, source })?;

        trace!("Sending payload: {:?}", payload);

        self.sink
            .send(payload)
            .await
            .map_err(|source| SenderError::Transport { total_sent, source })?;

        if let Some(report) = self.counter.record_one() {
            info!("{report}");
            self.pending_reports.push(report);
        }

        Ok(())
    }
}
