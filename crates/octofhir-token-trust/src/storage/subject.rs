//! Subject status provider trait.
//!
//! Defines how the validator asks whether an end user may still act.
//! Implementations are provided by user stores.

use async_trait::async_trait;

use crate::TrustResult;
use crate::types::IdentityContext;

// =============================================================================
// Subject Status Provider Trait
// =============================================================================

/// Decides whether the subject behind an identity is still active.
///
/// The identity carries every claim of the token, plus a
/// `reference_token_id` claim when the token is a reference token, so
/// implementations can treat server-side sessions differently from
/// self-contained tokens.
#[async_trait]
pub trait SubjectStatusProvider: Send + Sync {
    /// Returns `true` if the subject may still authenticate and act.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn is_active(&self, identity: &IdentityContext) -> TrustResult<bool>;
}
