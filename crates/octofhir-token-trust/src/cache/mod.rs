//! Cache-aside access over an abstract keyed cache.
//!
//! [`Cache`] is the capability a backend implements; [`get_or_compute`] is the
//! cache-aside helper built on top of it. [`MemoryCache`] is the in-process
//! backend with a fixed time-to-live.
//!
//! # Example
//!
//! ```ignore
//! use octofhir_token_trust::cache::{MemoryCache, get_or_compute};
//! use std::time::Duration;
//!
//! let cache = MemoryCache::new(Duration::from_secs(300));
//! let client = get_or_compute(&cache, "c1", || async {
//!     store.find_by_id("c1").await
//! })
//! .await?;
//! ```

pub mod memory;

use std::future::Future;

use async_trait::async_trait;

use crate::TrustResult;
use crate::error::TrustError;

pub use memory::MemoryCache;

// =============================================================================
// Cache Trait
// =============================================================================

/// Keyed store for values of type `T`.
///
/// No ordering or expiry guarantees are implied; eviction is up to the
/// implementation.
#[async_trait]
pub trait Cache<T>: Send + Sync
where
    T: Send + 'static,
{
    /// Returns the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    async fn get(&self, key: &str) -> TrustResult<Option<T>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    async fn set(&self, key: &str, value: T) -> TrustResult<()>;
}

// =============================================================================
// Cache-Aside
// =============================================================================

/// Returns the cached value for `key`, computing and storing it on a miss.
///
/// On a hit `compute` is never invoked. On a miss it is invoked once; a value
/// it yields is written to the cache exactly once, while `None` leaves the
/// slot empty so the next call computes again.
///
/// The lookup and the write are separate steps. Two callers missing on the
/// same key at the same time may both compute and both write; the last write
/// wins. Values must therefore be safe to recompute.
///
/// # Errors
///
/// - `TrustError::InvalidArgument` if `key` is empty, before the cache is touched
/// - any error from the cache backend
/// - any error from `compute`, in which case nothing is written
pub async fn get_or_compute<T, C, F, Fut>(
    cache: &C,
    key: &str,
    compute: F,
) -> TrustResult<Option<T>>
where
    T: Clone + Send + 'static,
    C: Cache<T> + ?Sized,
    F: FnOnce() -> Fut,
    Fut: Future<Output = TrustResult<Option<T>>>,
{
    if key.is_empty() {
        return Err(TrustError::invalid_argument("key", "cache key must not be empty"));
    }

    if let Some(item) = cache.get(key).await? {
        tracing::trace!(key = %key, "Cache hit");
        return Ok(Some(item));
    }

    tracing::debug!(key = %key, "Cache miss");

    let Some(item) = compute().await? else {
        return Ok(None);
    };

    cache.set(key, item.clone()).await?;
    Ok(Some(item))
}

// =============================================================================
// Tests
// =============================================================================
