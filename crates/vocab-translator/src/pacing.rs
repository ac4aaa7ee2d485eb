use std::time::Duration;

/// How a batch paces its provider calls: a fixed pause between items and a
/// bounded number of retries with a fixed backoff.
///
/// Pacing is per batch, not shared. Two batches running at once each keep
/// their own rhythm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingPolicy {
    pub inter_item_delay: Duration,
    /// Extra attempts after the first one fails
    pub max_retries: u32,
    pub backoff: Duration,
}

impl PacingPolicy {
    pub fn new(inter_item_delay: Duration, max_retries: u32, backoff: Duration) -> Self {
        Self {
            inter_item_delay,
            max_retries,
            backoff,
        }
    }

    pub fn from_millis(inter_item_delay_ms: u64, max_retries: u32, backoff_ms: u64) -> Self {
        Self::new(
            Duration::from_millis(inter_item_delay_ms),
            max_retries,
            Duration::from_millis(backoff_ms),
        )
    }

    /// No pauses at all, same retry count
    pub fn unpaced(max_retries: u32) -> Self {
        Self::new(Duration::ZERO, max_retries, Duration::ZERO)
    }

    pub fn attempts(&self) -> u32 {
        self.max_retries + 1
    }

    pub async fn wait_between_items(&self) {
        if !self.inter_item_delay.is_zero() {
            tokio::time::sleep(self.inter_item_delay).await;
        }
    }

    pub async fn wait_before_retry(&self) {
        if !self.backoff.is_zero() {
            tokio::time::sleep(self.backoff).await;
        }
    }
}

impl Default for PacingPolicy {
    fn default() -> Self {
        Self::from_millis(1000, 2, 1000)
    }
}
