//! Post-issuance trust re-validation of tokens.
//!
//! A token that passed signature and expiry checks can still be unusable: its
//! subject may have been deactivated or its client disabled after issuance.
//! [`TokenTrustValidator`] is the last gate before a token is honored.
//!
//! # Example
//!
//! ```ignore
//! use octofhir_token_trust::validation::{DefaultTokenTrustValidator, TokenTrustValidator};
//!
//! let validator = DefaultTokenTrustValidator::new(subjects, clients);
//! let verdict = validator.validate_access_token(verdict).await?;
//! if verdict.is_error() {
//!     // reject with verdict.error()
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::TrustResult;
use crate::cache::MemoryCache;
use crate::config::{CacheConfig, ValidationConfig};
use crate::storage::{
    CachingClientStatusProvider, CachingSubjectStatusProvider, ClientStatusProvider,
    SubjectStatusProvider,
};
use crate::types::{
    Claim, Client, IdentityContext, ProtectedResourceError, TokenVerdict, claim_types,
};

// =============================================================================
// Validator Trait
// =============================================================================

/// Re-validates verified tokens against live subject and client status.
///
/// The verdict is moved in and handed back. A trust failure is an `Ok`
/// verdict with [`TokenVerdict::is_error`] set; `Err` means a collaborator
/// failed and no decision was reached.
#[async_trait]
pub trait TokenTrustValidator: Send + Sync {
    /// Re-validates an access token.
    ///
    /// # Errors
    ///
    /// Returns an error if a status provider fails.
    async fn validate_access_token(&self, verdict: TokenVerdict) -> TrustResult<TokenVerdict>;

    /// Re-validates an identity token.
    ///
    /// # Errors
    ///
    /// Returns an error if a status provider fails.
    async fn validate_identity_token(&self, verdict: TokenVerdict) -> TrustResult<TokenVerdict>;
}

// =============================================================================
// Default Validator
// =============================================================================

/// Checks that the subject is still active and the client still enabled.
///
/// Both outcomes are reported as `expired_token`; which one fired is only
/// visible in the logs.
pub struct DefaultTokenTrustValidator {
    subjects: Arc<dyn SubjectStatusProvider>,
    clients: Arc<dyn ClientStatusProvider>,
    short_circuit_identity_errors: bool,
}

impl DefaultTokenTrustValidator {
    /// Creates a validator over the given providers.
    #[must_use]
    pub fn new(
        subjects: Arc<dyn SubjectStatusProvider>,
        clients: Arc<dyn ClientStatusProvider>,
    ) -> Self {
        Self {
            subjects,
            clients,
            short_circuit_identity_errors: false,
        }
    }

    /// Creates a validator configured by `validation` and `cache`.
    ///
    /// With `cache_status_lookups` set, both providers are wrapped in caching
    /// decorators backed by [`MemoryCache`]s with the configured TTL.
    ///
    /// # Errors
    ///
    /// Returns `TrustError::Configuration` if caching is enabled with a zero
    /// TTL.
    pub fn from_config(
        subjects: Arc<dyn SubjectStatusProvider>,
        clients: Arc<dyn ClientStatusProvider>,
        validation: &ValidationConfig,
        cache: &CacheConfig,
    ) -> TrustResult<Self> {
        validation.validate_cache(cache)?;

        if !validation.cache_status_lookups {
            return Ok(Self::new(subjects, clients)
                .with_identity_short_circuit(validation.short_circuit_identity_errors));
        }

        let subjects: Arc<dyn SubjectStatusProvider> = Arc::new(CachingSubjectStatusProvider::new(
            subjects,
            Arc::new(MemoryCache::<bool>::new(cache.ttl)),
        ));
        let clients: Arc<dyn ClientStatusProvider> = Arc::new(CachingClientStatusProvider::new(
            clients,
            Arc::new(MemoryCache::<Client>::new(cache.ttl)),
        ));

        Ok(Self {
            subjects,
            clients,
            short_circuit_identity_errors: validation.short_circuit_identity_errors,
        })
    }

    /// Skip identity token re-validation for verdicts that already failed.
    #[must_use]
    pub fn with_identity_short_circuit(mut self, enabled: bool) -> Self {
        self.short_circuit_identity_errors = enabled;
        self
    }

    /// Rejects the verdict if its subject is no longer active.
    ///
    /// Returns `true` if the verdict was rejected.
    async fn check_subject(
        &self,
        verdict: &mut TokenVerdict,
        attach_reference_token: bool,
    ) -> TrustResult<bool> {
        let Some(subject_id) = verdict.claims().subject_id().map(ToString::to_string) else {
            return Ok(false);
        };

        let mut identity = IdentityContext::for_token_validator(verdict.claims());
        if attach_reference_token
            && let Some(reference) = verdict.reference_token_id()
        {
            identity.add_claim(Claim::new(claim_types::REFERENCE_TOKEN_ID, reference));
        }

        if self.subjects.is_active(&identity).await? {
            return Ok(false);
        }

        tracing::warn!(subject_id = %subject_id, "Subject is no longer active");
        verdict.reject(ProtectedResourceError::ExpiredToken);
        Ok(true)
    }

    /// Rejects the verdict if its client is unknown or disabled.
    ///
    /// Returns `true` if the verdict was rejected.
    async fn check_client(&self, verdict: &mut TokenVerdict) -> TrustResult<bool> {
        let Some(client_id) = verdict.claims().client_id().map(ToString::to_string) else {
            return Ok(false);
        };

        match self.clients.find_by_id(&client_id).await? {
            Some(client) if client.enabled => Ok(false),
            Some(_) => {
                tracing::warn!(client_id = %client_id, "Client is disabled");
                verdict.reject(ProtectedResourceError::ExpiredToken);
                Ok(true)
            }
            None => {
                tracing::warn!(client_id = %client_id, "Unknown client");
                verdict.reject(ProtectedResourceError::ExpiredToken);
                Ok(true)
            }
        }
    }
}

#[async_trait]
impl TokenTrustValidator for DefaultTokenTrustValidator {
    async fn validate_access_token(&self, mut verdict: TokenVerdict) -> TrustResult<TokenVerdict> {
        if verdict.is_error() {
            tracing::debug!(
                error = verdict.error().unwrap_or_default(),
                "Skipping access token re-validation for failed verdict"
            );
            return Ok(verdict);
        }

        // subject before client: callers auditing the root cause rely on it
        if self.check_subject(&mut verdict, true).await? {
            return Ok(verdict);
        }

        self.check_client(&mut verdict).await?;
        Ok(verdict)
    }

    async fn validate_identity_token(
        &self,
        mut verdict: TokenVerdict,
    ) -> TrustResult<TokenVerdict> {
        if self.short_circuit_identity_errors && verdict.is_error() {
            tracing::debug!(
                error = verdict.error().unwrap_or_default(),
                "Skipping identity token re-validation for failed verdict"
            );
            return Ok(verdict);
        }

        self.check_subject(&mut verdict, false).await?;
        Ok(verdict)
    }
}

// =============================================================================
// Tests
// =============================================================================
