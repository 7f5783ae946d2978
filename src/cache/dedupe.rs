//! "Already alerted on this mint" guard.
//!
//! A mint is recorded the moment it passes the gate, before holders are
//! fetched or the alert is sent, so a burst of events for the same mint
//! only produces one alert. Entries are overwritten, never removed.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use log::info;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
pub struct DedupCache {
    last_notified: Mutex<HashMap<String, Instant>>,
}

impl DedupCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff `mint` was recorded less than `ttl` before `now`.
    pub async fn should_suppress(&self, mint: &str, now: Instant, ttl: Duration) -> bool {
        let seen = self.last_notified.lock().await;
        is_fresh(seen.get(mint), now, ttl)
    }

    /// Upsert the notification time for `mint`.
    pub async fn record(&self, mint: &str, now: Instant) {
        self.last_notified
            .lock()
            .await
            .insert(mint.to_string(), now);
    }

    /// Gate and record under a single lock. Returns true when the event
    /// must be dropped; otherwise `mint` is now marked as notified.
    pub async fn check_and_record(&self, mint: &str, now: Instant, ttl: Duration) -> bool {
        let mut seen = self.last_notified.lock().await;
        if is_fresh(seen.get(mint), now, ttl) {
            info!("⏭ [DEDUPE] Skip duplicate mint: {}", mint);
            return true;
        }
        seen.insert(mint.to_string(), now);
        false
    }

    pub async fn len(&self) -> usize {
        self.last_notified.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn is_fresh(last: Option<&Instant>, now: Instant, ttl: Duration) -> bool {
    match last {
        Some(&at) => now.saturating_duration_since(at) < ttl,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(300);

    #[tokio::test]
    async fn test_suppressed_within_ttl() {
        let cache = DedupCache::new();
        let t0 = Instant::now();

        assert!(!cache.should_suppress("MINT", t0, TTL).await);
        cache.record("MINT", t0).await;
        assert!(cache.should_suppress("MINT", t0 + Duration::from_secs(10), TTL).await);
        assert!(!cache.should_suppress("OTHER", t0, TTL).await);
    }

    #[tokio::test]
    async fn test_released_after_ttl() {
        let cache = DedupCache::new();
        let t0 = Instant::now();
        cache.record("MINT", t0).await;

        assert!(cache.should_suppress("MINT", t0 + TTL - Duration::from_millis(1), TTL).await);
        assert!(!cache.should_suppress("MINT", t0 + TTL, TTL).await);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_check_and_record() {
        let cache = DedupCache::new();
        let t0 = Instant::now();

        assert!(!cache.check_and_record("MINT", t0, TTL).await);
        assert!(cache.check_and_record("MINT", t0 + Duration::from_secs(1), TTL).await);

        let later = t0 + TTL + Duration::from_secs(1);
        assert!(!cache.check_and_record("MINT", later, TTL).await);
        // the re-record restarts the window
        assert!(cache.should_suppress("MINT", later + Duration::from_secs(5), TTL).await);
    }

    #[tokio::test]
    async fn test_suppressed_check_does_not_extend_window() {
        let cache = DedupCache::new();
        let t0 = Instant::now();
        cache.check_and_record("MINT", t0, TTL).await;
        cache.check_and_record("MINT", t0 + Duration::from_secs(200), TTL).await;

        assert!(!cache.should_suppress("MINT", t0 + TTL, TTL).await);
    }
}
