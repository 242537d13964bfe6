//! In-process cache with a fixed time-to-live.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;

use super::Cache;
use crate::TrustResult;

struct CacheEntry<T> {
    value: T,
    expires_at: Instant,
}

impl<T> CacheEntry<T> {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Concurrent in-memory [`Cache`] whose entries expire after a fixed TTL.
///
/// Expired entries read as absent and are dropped on the next lookup of their
/// key. Writes also sweep the whole map at most once per TTL, so keys that are
/// never read again do not accumulate: an entry is gone by the first write
/// after twice its TTL.
pub struct MemoryCache<T> {
    entries: DashMap<String, CacheEntry<T>>,
    ttl: Duration,
    created_at: Instant,
    /// Milliseconds after `created_at` when the next write sweeps.
    next_sweep_ms: AtomicU64,
}

impl<T> MemoryCache<T> {
    /// Creates an empty cache whose entries live for `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            created_at: Instant::now(),
            next_sweep_ms: AtomicU64::new(millis(ttl)),
        }
    }

    /// Time-to-live applied to new entries.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of stored entries, expired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Removes expired entries and returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        let purged = before.saturating_sub(self.entries.len());
        if purged > 0 {
            tracing::debug!(purged, "Purged expired cache entries");
        }
        purged
    }

    /// Purges expired entries if the sweep interval has elapsed.
    fn sweep_if_due(&self, now: Instant) {
        let elapsed = millis(now.saturating_duration_since(self.created_at));
        let due = self.next_sweep_ms.load(Ordering::Relaxed);
        if elapsed < due {
            return;
        }

        let next = elapsed.saturating_add(millis(self.ttl).max(1));
        // one writer sweeps, the others carry on
        if self
            .next_sweep_ms
            .compare_exchange(due, next, Ordering::AcqRel, Ordering::Relaxed)
            .is_ok()
        {
            self.purge_expired();
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[async_trait]
impl<T> Cache<T> for MemoryCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &str) -> TrustResult<Option<T>> {
        let now = Instant::now();

        if let Some(entry) = self.entries.get(key)
            && !entry.is_expired(now)
        {
            return Ok(Some(entry.value.clone()));
        }

        self.entries.remove_if(key, |_, entry| entry.is_expired(now));
        Ok(None)
    }

    async fn set(&self, key: &str, value: T) -> TrustResult<()> {
        let now = Instant::now();
        self.sweep_if_due(now);

        let expires_at = now + self.ttl;
        self.entries
            .insert(key.to_string(), CacheEntry { value, expires_at });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_then_get() {
        let cache = MemoryCache::new(Duration::from_secs(60));
        assert!(cache.get("k").await.unwrap().is_none());

        cache.set("k", 42u32).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), Some(42));
        assert_eq!(cache.len(), 1);

        cache.set("k", 7).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), Some(7));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_expired_entry_reads_as_absent() {
        let cache = MemoryCache::new(Duration::from_millis(20));
        cache.set("k", "v".to_string()).await.unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(cache.get("k").await.unwrap().is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let cache = MemoryCache::new(Duration::from_millis(20));
        cache.set("a", 1u8).await.unwrap();
        cache.set("b", 2u8).await.unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(cache.purge_expired(), 2);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_write_sweeps_keys_never_read_again() {
        let cache = MemoryCache::new(Duration::from_millis(10));
        for i in 0..1000 {
            cache.set(&format!("ref-{i}"), true).await.unwrap();
        }

        tokio::time::sleep(Duration::from_millis(50)).await;
        cache.set("ref-last", true).await.unwrap();

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("ref-last").await.unwrap(), Some(true));
    }

    #[tokio::test]
    async fn test_write_keeps_live_entries() {
        let cache = MemoryCache::new(Duration::from_secs(60));
        cache.set("a", 1u8).await.unwrap();
        cache.set("b", 2u8).await.unwrap();

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("a").await.unwrap(), Some(1));
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = MemoryCache::new(Duration::from_secs(60));
        cache.set("a", 1u8).await.unwrap();
        cache.clear();
        assert!(cache.get("a").await.unwrap().is_none());
    }
}
