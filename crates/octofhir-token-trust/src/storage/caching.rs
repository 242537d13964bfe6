//! Caching decorators for the status providers.
//!
//! Each decorator wraps a provider and answers repeated lookups for the same
//! key from a [`Cache`] through [`get_or_compute`]. Staleness is bounded by
//! the cache's expiry: a client disabled or a subject deactivated after its
//! status was cached is only noticed once the entry expires.

use std::sync::Arc;

use async_trait::async_trait;

use super::{ClientStatusProvider, SubjectStatusProvider};
use crate::TrustResult;
use crate::cache::{Cache, get_or_compute};
use crate::types::{Client, IdentityContext};

// =============================================================================
// Caching Client Status Provider
// =============================================================================

/// Caches client lookups by client id.
///
/// Unknown clients are not cached, so a client registered after a failed
/// lookup is found on the next call.
pub struct CachingClientStatusProvider {
    inner: Arc<dyn ClientStatusProvider>,
    cache: Arc<dyn Cache<Client>>,
}

impl CachingClientStatusProvider {
    /// Wraps `inner` with `cache`.
    #[must_use]
    pub fn new(inner: Arc<dyn ClientStatusProvider>, cache: Arc<dyn Cache<Client>>) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl ClientStatusProvider for CachingClientStatusProvider {
    async fn find_by_id(&self, client_id: &str) -> TrustResult<Option<Client>> {
        // an empty id cannot be a cache key; let the store decide
        if client_id.is_empty() {
            return self.inner.find_by_id(client_id).await;
        }

        get_or_compute(self.cache.as_ref(), client_id, || {
            self.inner.find_by_id(client_id)
        })
        .await
    }
}

// =============================================================================
// Caching Subject Status Provider
// =============================================================================

/// Caches subject activity by subject id and reference token handle.
pub struct CachingSubjectStatusProvider {
    inner: Arc<dyn SubjectStatusProvider>,
    cache: Arc<dyn Cache<bool>>,
}

impl CachingSubjectStatusProvider {
    /// Wraps `inner` with `cache`.
    #[must_use]
    pub fn new(inner: Arc<dyn SubjectStatusProvider>, cache: Arc<dyn Cache<bool>>) -> Self {
        Self { inner, cache }
    }

    /// Cache key for an identity, `None` if it has no usable subject.
    ///
    /// The subject is length-prefixed so no subject id can be mistaken for a
    /// subject plus reference token: `5:alice#x` and `7:alice#x` differ.
    fn cache_key(identity: &IdentityContext) -> Option<String> {
        let subject_id = identity.subject_id().filter(|s| !s.is_empty())?;
        Some(match identity.reference_token_id() {
            Some(reference) => format!("{}:{subject_id}#{reference}", subject_id.len()),
            None => format!("{}:{subject_id}", subject_id.len()),
        })
    }
}

#[async_trait]
impl SubjectStatusProvider for CachingSubjectStatusProvider {
    async fn is_active(&self, identity: &IdentityContext) -> TrustResult<bool> {
        let Some(key) = Self::cache_key(identity) else {
            return self.inner.is_active(identity).await;
        };

        let active = get_or_compute(self.cache.as_ref(), &key, || async {
            self.inner.is_active(identity).await.map(Some)
        })
        .await?;

        Ok(active.unwrap_or(false))
    }
}
