//! Token validation verdict.
//!
//! A [`TokenVerdict`] is threaded by value through the validation pipeline.
//! Each stage takes ownership, possibly rejects it, and hands it back.

use serde::Serialize;

use super::claims::ClaimSet;

// =============================================================================
// Protected Resource Errors
// =============================================================================

/// Error codes a protected resource reports for bearer tokens (RFC 6750).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtectedResourceError {
    /// The request is missing a parameter or is malformed.
    InvalidRequest,
    /// The token is malformed or otherwise invalid.
    InvalidToken,
    /// The token was valid once but must no longer be honored.
    ExpiredToken,
    /// The token lacks the scope required by the resource.
    InsufficientScope,
}

impl ProtectedResourceError {
    /// Returns the wire value of the error code.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::InvalidToken => "invalid_token",
            Self::ExpiredToken => "expired_token",
            Self::InsufficientScope => "insufficient_scope",
        }
    }
}

impl std::fmt::Display for ProtectedResourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Token Verdict
// =============================================================================

/// In-flight pass/fail result of token validation.
///
/// Once the verdict is in error its claim set is empty. The only way into the
/// error state is [`reject`](Self::reject) (or the [`failed`](Self::failed)
/// constructor), both of which drop the claims in the same step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenVerdict {
    is_error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    claims: ClaimSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference_token_id: Option<String>,
}

impl TokenVerdict {
    /// Creates a successful verdict carrying the given claims.
    #[must_use]
    pub fn success(claims: ClaimSet) -> Self {
        Self {
            is_error: false,
            error: None,
            claims,
            reference_token_id: None,
        }
    }

    /// Creates a verdict that already failed at an earlier stage.
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            is_error: true,
            error: Some(error.into()),
            claims: ClaimSet::new(),
            reference_token_id: None,
        }
    }

    /// Attaches the server-side handle of a reference token.
    #[must_use]
    pub fn with_reference_token_id(mut self, id: impl Into<String>) -> Self {
        self.reference_token_id = Some(id.into());
        self
    }

    /// Puts the verdict into the error state and drops its claims.
    pub fn reject(&mut self, error: ProtectedResourceError) {
        self.is_error = true;
        self.error = Some(error.as_str().to_string());
        self.claims = ClaimSet::new();
    }

    /// Returns `true` if the token must not be honored.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.is_error
    }

    /// The error code, set only when [`is_error`](Self::is_error) is true.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Claims of the token; empty for rejected verdicts.
    #[must_use]
    pub fn claims(&self) -> &ClaimSet {
        &self.claims
    }

    /// Consumes the verdict and returns its claims.
    #[must_use]
    pub fn into_claims(self) -> ClaimSet {
        self.claims
    }

    /// Reference token handle, if the token was a reference token.
    #[must_use]
    pub fn reference_token_id(&self) -> Option<&str> {
        self.reference_token_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::claims::claim_types;

    #[test]
    fn test_error_codes() {
        assert_eq!(ProtectedResourceError::ExpiredToken.as_str(), "expired_token");
        assert_eq!(ProtectedResourceError::InvalidToken.as_str(), "invalid_token");
        assert_eq!(
            ProtectedResourceError::InsufficientScope.to_string(),
            "insufficient_scope"
        );
    }

    #[test]
    fn test_reject_clears_claims() {
        let mut verdict = TokenVerdict::success(ClaimSet::new().with(claim_types::SUBJECT, "u1"))
            .with_reference_token_id("ref-1");
        assert!(!verdict.is_error());
        assert!(verdict.error().is_none());

        verdict.reject(ProtectedResourceError::ExpiredToken);

        assert!(verdict.is_error());
        assert_eq!(verdict.error(), Some("expired_token"));
        assert!(verdict.claims().is_empty());
        assert_eq!(verdict.reference_token_id(), Some("ref-1"));
    }

    #[test]
    fn test_failed_has_no_claims() {
        let verdict = TokenVerdict::failed("invalid_token");
        assert!(verdict.is_error());
        assert_eq!(verdict.error(), Some("invalid_token"));
        assert!(verdict.claims().is_empty());
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let verdict = TokenVerdict::success(ClaimSet::new());
        let json = serde_json::to_string(&verdict).unwrap();
        assert_eq!(json, r#"{"is_error":false,"claims":[]}"#);
    }
}
