//! Batch pacing for the watchlist scan.
//!
//! The market-data provider enforces a per-minute request quota, so the
//! scan pauses for a fixed duration after every `calls_per_pause` symbol
//! fetches. The pause decision is a pure function of the call count so it
//! can be tested without the clock.

use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

pub struct ScanThrottle {
    calls_per_pause: u32,
    pause: Duration,
    calls: u32,
}

impl ScanThrottle {
    pub fn new(calls_per_pause: u32, pause: Duration) -> Self {
        Self {
            calls_per_pause,
            pause,
            calls: 0,
        }
    }

    /// True when the next call would cross a batch boundary.
    pub fn should_pause(&self) -> bool {
        self.calls_per_pause > 0 && self.calls > 0 && self.calls % self.calls_per_pause == 0
    }

    /// Call before each symbol fetch. Sleeps between batches; never before
    /// the first call or after the last.
    pub async fn pace(&mut self) {
        if self.should_pause() && !self.pause.is_zero() {
            debug!(
                calls = self.calls,
                pause_secs = self.pause.as_secs(),
                "scan throttle pausing for provider quota"
            );
            sleep(self.pause).await;
        }
        self.calls += 1;
    }

    pub fn calls(&self) -> u32 {
        self.calls
    }
}
