use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// How a fetch was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// First load of a feed, or a new search term. Results replace the feed.
    Initial,
    /// Pull-to-refresh of a populated feed. Results are merged in front.
    Refresh,
}

/// Minimum perceived latency applied before each initial or refresh fetch,
/// so loading placeholders don't flash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyPolicy {
    pub initial_min_ms: u64,
    pub initial_max_ms: u64,
    pub refresh_ms: u64,
}

impl Default for LatencyPolicy {
    fn default() -> Self {
        Self {
            initial_min_ms: 2000,
            initial_max_ms: 4000,
            refresh_ms: 500,
        }
    }
}

impl LatencyPolicy {
    /// No artificial delay at all.
    pub fn none() -> Self {
        Self {
            initial_min_ms: 0,
            initial_max_ms: 0,
            refresh_ms: 0,
        }
    }

    pub fn delay_for(&self, mode: FetchMode) -> Duration {
        let ms = match mode {
            FetchMode::Refresh => self.refresh_ms,
            FetchMode::Initial if self.initial_max_ms <= self.initial_min_ms => {
                self.initial_min_ms
            }
            FetchMode::Initial => {
                rand::thread_rng().gen_range(self.initial_min_ms..=self.initial_max_ms)
            }
        };
        Duration::from_millis(ms)
    }

    pub async fn wait(&self, mode: FetchMode) {
        let delay = self.delay_for(mode);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
