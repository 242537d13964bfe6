//! # octofhir-token-trust
//!
//! Post-issuance trust re-verification for OctoFHIR bearer tokens.
//!
//! A token that passed signature and expiry checks was trustworthy when it was
//! issued. This crate decides whether it is still trustworthy now: whether its
//! subject is still active and its client still enabled.
//!
//! This crate provides:
//! - Access token and identity token re-validation
//! - Cache-aside lookups over a pluggable cache
//! - Caching decorators and in-memory stores for subject and client status
//! - Audit notifications for login outcomes
//!
//! ## Modules
//!
//! - [`config`] - Validator, cache and audit configuration
//! - [`validation`] - The [`TokenTrustValidator`] and its default implementation
//! - [`cache`] - Cache capability, cache-aside helper and in-memory TTL cache
//! - [`storage`] - Status provider traits and implementations
//! - [`audit`] - Security event notifications
//! - [`types`] - Claims, verdicts, identities, clients and subjects

pub mod audit;
pub mod cache;
pub mod config;
pub mod error;
pub mod storage;
pub mod types;
pub mod validation;

pub use audit::{
    AuthenticateResult, Event, EventSink, EventType, SignInMessage, TracingEventSink,
    notify_local_login_failure, notify_local_login_success,
};
pub use cache::{Cache, MemoryCache, get_or_compute};
pub use config::{AuditConfig, CacheConfig, ConfigError, TrustConfig, ValidationConfig};
pub use error::{ErrorCategory, TrustError};
pub use storage::{
    CachingClientStatusProvider, CachingSubjectStatusProvider, ClientStatusProvider,
    InMemoryClientStore, InMemorySubjectStore, SubjectStatusProvider,
};
pub use types::{
    Claim, ClaimSet, Client, IdentityContext, ProtectedResourceError, Subject, TokenVerdict,
    claim_types,
};
pub use validation::{DefaultTokenTrustValidator, TokenTrustValidator};

/// Type alias for token trust results.
pub type TrustResult<T> = Result<T, TrustError>;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use octofhir_token_trust::prelude::*;
/// ```
pub mod prelude {
    pub use crate::TrustResult;
    pub use crate::cache::{Cache, get_or_compute};
    pub use crate::config::TrustConfig;
    pub use crate::error::TrustError;
    pub use crate::storage::{ClientStatusProvider, SubjectStatusProvider};
    pub use crate::types::{
        Claim, ClaimSet, Client, IdentityContext, ProtectedResourceError, TokenVerdict,
        claim_types,
    };
    pub use crate::validation::{DefaultTokenTrustValidator, TokenTrustValidator};
}
