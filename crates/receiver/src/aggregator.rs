//! Fan-in aggregation of inbound messages.

use crate::error::ReceiverError;
use fanout_core::{ProgressReport, ReportPolicy, ReportVerb, ThroughputCounter};
use fanout_transport::MessageSource;
use tracing::{error, info, trace};

/// Counts every message arriving on a [`MessageSource`].
///
/// The source already multiplexes all publisher connections, so there is a
/// single aggregate counter and no notion of which publisher a message came
/// from.
pub struct FanInAggregator<S> {
    source: S,
    counter: ThroughputCounter,
}

impl<S: MessageSource> FanInAggregator<S> {
    pub fn new(source: S, policy: ReportPolicy) -> Self {
        Self {
            source,
            counter: ThroughputCounter::new(policy, ReportVerb::Received),
        }
    }

    pub fn total_received(&self) -> u64 {
        self.counter.total()
    }

    /// Wait for one message and count it.
    ///
    /// Returns the report line emitted for this message, if one was due.
    pub async fn receive_one(&mut self) -> Result<Option<ProgressReport>, ReceiverError> {
        let message = self
            .source
            .recv()
            .await
            .map_err(|source| ReceiverError::Receive {
                total_received: self.counter.total(),
                source,
            })?;

        trace!("Received message: {}", String::from_utf8_lossy(&message));

        let report = self.counter.record_one();
        if let Some(report) = &report {
            info!("{report}");
        }
        Ok(report)
    }

    /// Receive until `max_messages` have arrived, or forever when `None`.
    ///
    /// Returns the final total. The first receive failure stops the loop.
    pub async fn run(&mut self, max_messages: Option<u64>) -> Result<u64, ReceiverError> {
        while max_messages.map_or(true, |max| self.counter.total() < max) {
            self.receive_one().await.inspect_err(|e| {
                error!("Receiver stopped: {e}");
            })?;
        }

        info!("Receive complete: {}", self.counter.snapshot());
        Ok(self.counter.total())
    }
}
