//! Batch-then-sleep rate control.
//!
//! One rate window sends `batch_size` messages back to back and then sleeps
//! for whatever is left of `interval`. A batch that overruns the interval is
//! not throttled further: the next window starts immediately. The interval
//! is therefore a floor on window length, not a ceiling on throughput.

use async_trait::async_trait;
use std::num::NonZeroU64;
use std::time::Duration;
use tokio::time::{sleep, Instant};

/// Interval and batch size of one rate window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateWindow {
    pub interval: Duration,
    pub batch_size: NonZeroU64,
}

/// A single unit of work driven by the [`RateController`].
#[async_trait]
pub trait SendOne: Send {
    type Error: Send;

    /// Perform one send, resolving once the transport has accepted it.
    async fn send_one(&mut self) -> Result<(), Self::Error>;
}

/// What happened during one rate window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowOutcome {
    /// Sends completed in this window.
    pub sent: u64,
    /// Time spent sending.
    pub elapsed: Duration,
    /// Time spent sleeping afterwards.
    pub slept: Duration,
    /// Whether sending alone used up the whole interval.
    pub overran: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct RateController {
    window: RateWindow,
}

impl RateController {
    pub fn new(window: RateWindow) -> Self {
        Self { window }
    }

    pub fn window(&self) -> RateWindow {
        self.window
    }

    /// Run one window: `batch_size` sequential sends, then sleep the remainder.
    ///
    /// The first failed send aborts the window and is returned as is.
    pub async fn run_window<T>(&self, task: &mut T) -> Result<WindowOutcome, T::Error>
    where
        T: SendOne + ?Sized,
    {
        let batch_size = self.window.batch_size.get();
        let start = Instant::now();

        for _ in 0..batch_size {
            task.send_one().await?;
        }

        let elapsed = start.elapsed();
        let remaining = self.window.interval.saturating_sub(elapsed);

        if !remaining.is_zero() {
            sleep(remaining).await;
        }

        Ok(WindowOutcome {
            sent: batch_size,
            elapsed,
            slept: remaining,
            overran: remaining.is_zero(),
        })
    }
}
