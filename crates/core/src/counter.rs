//! Loop-owned throughput counters.
//!
//! A [`ThroughputCounter`] lives inside exactly one send or receive loop and
//! is never shared. It only decides *when* a report is due; emitting the log
//! line is left to the loop.

use crate::error::ConfigError;
use crate::report::{ProgressReport, ReportVerb};
use std::num::NonZeroU64;
use std::time::Duration;
use tokio::time::Instant;

/// When a counter should produce a [`ProgressReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPolicy {
    /// Report whenever the total is a multiple of `n`.
    EveryMessages(NonZeroU64),
    /// Report at most once per wall-clock period.
    Cadence(Duration),
}

impl ReportPolicy {
    /// Build a policy from the raw configuration values.
    ///
    /// A cadence, when present, takes precedence over the message interval.
    pub fn from_config(every: u64, cadence: Option<Duration>) -> Result<Self, ConfigError> {
        match cadence {
            Some(period) if period.is_zero() => Err(ConfigError::ZeroReportCadence),
            Some(period) => Ok(ReportPolicy::Cadence(period)),
            None => NonZeroU64::new(every)
                .map(ReportPolicy::EveryMessages)
                .ok_or(ConfigError::ZeroReportInterval),
        }
    }
}

/// A monotonically increasing message counter with a report policy.
#[derive(Debug, Clone)]
pub struct ThroughputCounter {
    total: u64,
    policy: ReportPolicy,
    verb: ReportVerb,
    last_report: Instant,
}

impl ThroughputCounter {
    pub fn new(policy: ReportPolicy, verb: ReportVerb) -> Self {
        Self {
            total: 0,
            policy,
            verb,
            last_report: Instant::now(),
        }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Count one message and return a report if one is due.
    pub fn record_one(&mut self) -> Option<ProgressReport> {
        self.total += 1;

        match self.policy {
            ReportPolicy::EveryMessages(every) => {
                (self.total % every.get() == 0).then(|| ProgressReport::now(self.total, self.verb))
            }
            ReportPolicy::Cadence(_) => self.poll_cadence(),
        }
    }

    /// Return a report if the policy is cadence-based and the period elapsed.
    ///
    /// Message-interval policies never report from here, so loops can call
    /// this at window boundaries unconditionally.
    pub fn poll_cadence(&mut self) -> Option<ProgressReport> {
        let ReportPolicy::Cadence(period) = self.policy else {
            return None;
        };

        let now = Instant::now();
        if now.duration_since(self.last_report) >= period {
            self.last_report = now;
            Some(ProgressReport::now(self.total, self.verb))
        } else {
            None
        }
    }

    /// Snapshot the counter regardless of policy.
    pub fn snapshot(&self) -> ProgressReport {
        ProgressReport::now(self.total, self.verb)
    }
}
