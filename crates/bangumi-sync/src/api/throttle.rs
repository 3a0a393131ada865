//! Fixed-delay request pacing.
//!
//! The Bangumi API publishes no quota, so requests are spaced by constant
//! pauses: one after every full collection page and one after every subject
//! detail lookup.

use shared::config::ApiConfig;
use std::time::Duration;
use tokio::time::sleep;

/// Fixed pauses between API requests
#[derive(Debug, Clone, Copy)]
pub struct Throttle {
    /// Pause before requesting the next collection page
    page_delay: Duration,
    /// Pause after each subject detail request
    detail_delay: Duration,
}

impl Throttle {
    pub fn new(page_delay: Duration, detail_delay: Duration) -> Self {
        Self {
            page_delay,
            detail_delay,
        }
    }

    /// Build from the `[api]` settings
    pub fn from_settings(settings: &ApiConfig) -> Self {
        Self::new(
            Duration::from_millis(settings.page_delay_ms),
            Duration::from_millis(settings.detail_delay_ms),
        )
    }

    /// No pauses at all
    pub fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub async fn after_page(&self) {
        Self::pause(self.page_delay, "page").await;
    }

    pub async fn after_detail(&self) {
        Self::pause(self.detail_delay, "detail").await;
    }

    async fn pause(delay: Duration, kind: &'static str) {
        if delay.is_zero() {
            return;
        }
        tracing::trace!(kind, wait_ms = delay.as_millis() as u64, "Throttling");
        sleep(delay).await;
    }
}
