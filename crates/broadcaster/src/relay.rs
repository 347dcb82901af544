//! Router-to-publisher relay.
//!
//! Every message taken from the router is forwarded to exactly one
//! publisher, the one that was used least recently. A message whose publish
//! fails is queued and takes priority over new router input on the next
//! step, so a failing publisher delays but never loses it.

use crate::error::BroadcasterError;
use bytes::Bytes;
use fanout_core::{ConfigError, ProgressReport, ReportVerb};
use fanout_transport::{MessageSink, MessageSource};
use std::collections::VecDeque;
use std::num::NonZeroU64;
use tracing::{debug, error, info};

/// Where the message handled by a step came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Incoming,
    Redelivery,
}

/// Relay counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelayStats {
    /// Messages published on their first attempt.
    pub incoming: u64,
    /// Messages published after at least one failed attempt.
    pub redelivered: u64,
    /// Publish attempts that failed.
    pub failed_sends: u64,
}

impl RelayStats {
    pub fn processed(&self) -> u64 {
        self.incoming + self.redelivered
    }
}

/// What happened during one relay step.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub origin: Origin,
    /// Index of the publisher the message was handed to.
    pub publisher: usize,
    /// Whether the publisher accepted the message.
    pub delivered: bool,
    pub report: Option<ProgressReport>,
}

struct PublisherSlot<P> {
    sink: P,
    last_used: u64,
}

pub struct Broadcaster<R, P> {
    router: R,
    publishers: Vec<PublisherSlot<P>>,
    redeliveries: VecDeque<Bytes>,
    stats: RelayStats,
    report_every: NonZeroU64,
    // Logical clock for least-recently-used selection
    tick: u64,
}

impl<R: MessageSource, P: MessageSink> Broadcaster<R, P> {
    pub fn new(
        router: R,
        publishers: Vec<P>,
        report_every: NonZeroU64,
    ) -> Result<Self, ConfigError> {
        if publishers.is_empty() {
            return Err(ConfigError::EmptyEndpoints("publisher"));
        }

        Ok(Self {
            router,
            publishers: publishers
                .into_iter()
                .map(|sink| PublisherSlot { sink, last_used: 0 })
                .collect(),
            redeliveries: VecDeque::new(),
            stats: RelayStats::default(),
            report_every,
            tick: 0,
        })
    }

    pub fn stats(&self) -> RelayStats {
        self.stats
    }

    /// Messages waiting for another publish attempt.
    pub fn pending_redeliveries(&self) -> usize {
        self.redeliveries.len()
    }

    fn least_recently_used(&self) -> usize {
        self.publishers
            .iter()
            .enumerate()
            .min_by_key(|(_, slot)| slot.last_used)
            .map(|(index, _)| index)
            .unwrap_or(0)
    }

    /// Relay one message.
    ///
    /// Queued redeliveries are handled before anything new is read from the
    /// router. Only a router failure is returned as an error.
    pub async fn step(&mut self) -> Result<StepOutcome, BroadcasterError> {
        let (message, origin) = match self.redeliveries.pop_front() {
            Some(message) => (message, Origin::Redelivery),
            None => {
                let message =
                    self.router
                        .recv()
                        .await
                        .map_err(|source| BroadcasterError::Receive {
                            processed: self.stats.processed(),
                            source,
                        })?;
                (message, Origin::Incoming)
            }
        };

        let index = self.least_recently_used();
        self.tick += 1;
        let slot = &mut self.publishers[index];
        slot.last_used = self.tick;

        let delivered = match slot.sink.send(message.clone()).await {
            Ok(()) => {
                match origin {
                    Origin::Incoming => self.stats.incoming += 1,
                    Origin::Redelivery => self.stats.redelivered += 1,
                }
                true
            }
            Err(e) => {
                error!("Publisher {index} failed to send message: {e}");
                self.stats.failed_sends += 1;
                self.redeliveries.push_back(message);
                false
            }
        };

        let report = (delivered && self.stats.processed() % self.report_every.get() == 0)
            .then(|| ProgressReport::now(self.stats.processed(), ReportVerb::Processed));

        if let Some(report) = &report {
            info!(
                "{report} ({} incoming, {} redelivered)",
                self.stats.incoming, self.stats.redelivered
            );
        }

        debug!("Relayed {origin:?} message via publisher {index} (delivered: {delivered})");

        Ok(StepOutcome {
            origin,
            publisher: index,
            delivered,
            report,
        })
    }

    /// Relay until `max_processed` messages were published, or forever.
    pub async fn run(&mut self, max_processed: Option<u64>) -> Result<RelayStats, BroadcasterError> {
        info!(
            "Relaying router messages to {} publisher(s)",
            self.publishers.len()
        );

        while max_processed.map_or(true, |max| self.stats.processed() < max) {
            self.step().await.inspect_err(|e| {
                error!("Broadcaster stopped: {e}");
            })?;
        }

        Ok(self.stats)
    }
}
