//! Summary metrics for a bounded send run.

use crate::rate::WindowOutcome;
use std::time::Duration;

/// Metrics accumulated over the rate windows of one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SendMetrics {
    /// Number of messages accepted by the transport.
    pub messages_sent: u64,
    /// Number of rate windows completed.
    pub windows: u64,
    /// Windows whose batch alone used up the whole interval.
    pub overrun_windows: u64,
    /// Time spent sending.
    pub send_duration: Duration,
    /// Time spent sleeping between batches.
    pub sleep_duration: Duration,
}

impl SendMetrics {
    pub fn observe(&mut self, outcome: &WindowOutcome) {
        self.messages_sent += outcome.sent;
        self.windows += 1;
        if outcome.overran {
            self.overrun_windows += 1;
        }
        self.send_duration += outcome.elapsed;
        self.sleep_duration += outcome.slept;
    }

    pub fn total_duration(&self) -> Duration {
        self.send_duration + self.sleep_duration
    }

    /// Calculate messages per second over the whole run.
    pub fn messages_per_second(&self) -> f64 {
        let secs = self.total_duration().as_secs_f64();
        if secs > 0.0 {
            self.messages_sent as f64 / secs
        } else {
            0.0
        }
    }
}
