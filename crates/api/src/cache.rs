//! Single-slot TTL cache for the upload listing.

use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};

/// A one-value cache with a fixed time-to-live.
///
/// `get` returns `None` once the entry is older than the TTL. Writers
/// call [`TtlCache::invalidate`] after mutating the underlying data so
/// readers never see a listing that predates their own write.
pub struct TtlCache<T> {
    ttl: Duration,
    slot: RwLock<Option<(Instant, T)>>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    /// Current value, unless the cache is empty or the entry expired.
    pub async fn get(&self) -> Option<T> {
        let slot = self.slot.read().await;
        match slot.as_ref() {
            Some((stored_at, value)) if stored_at.elapsed() < self.ttl => Some(value.clone()),
            _ => None,
        }
    }

    pub async fn put(&self, value: T) {
        *self.slot.write().await = Some((Instant::now(), value));
    }

    pub async fn invalidate(&self) {
        *self.slot.write().await = None;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn returns_fresh_value() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.put(vec![1, 2]).await;

        assert_eq!(cache.get().await, Some(vec![1, 2]));
    }

    #[tokio::test(start_paused = true)]
    async fn entry_expires_after_ttl() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.put(7).await;

        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(cache.get().await, Some(7));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(cache.get().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn invalidate_clears_the_slot() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.put("cached").await;

        cache.invalidate().await;

        assert_eq!(cache.get().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn put_refreshes_the_clock() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.put(1).await;

        tokio::time::advance(Duration::from_secs(45)).await;
        cache.put(2).await;

        tokio::time::advance(Duration::from_secs(45)).await;
        assert_eq!(cache.get().await, Some(2));
    }
}
