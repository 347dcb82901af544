//! Timestamped progress lines.

use chrono::{DateTime, Local};
use std::fmt;

/// What a counter is counting, used as the verb of a report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportVerb {
    Sent,
    Received,
    Processed,
}

impl fmt::Display for ReportVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportVerb::Sent => write!(f, "sent"),
            ReportVerb::Received => write!(f, "received"),
            ReportVerb::Processed => write!(f, "processed"),
        }
    }
}

/// A snapshot of a cumulative counter taken when a report was due.
///
/// Renders as `HH:MM:SS.mmm | <verb> <total> messages`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressReport {
    /// Wall-clock time the report was taken.
    pub at: DateTime<Local>,
    /// Cumulative count at that time.
    pub total: u64,
    pub verb: ReportVerb,
}

impl ProgressReport {
    pub fn now(total: u64, verb: ReportVerb) -> Self {
        Self {
            at: Local::now(),
            total,
            verb,
        }
    }
}

impl fmt::Display for ProgressReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} {} messages",
            self.at.format("%H:%M:%S%.3f"),
            self.verb,
            self.total
        )
    }
}
