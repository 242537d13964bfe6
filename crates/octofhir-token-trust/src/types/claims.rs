//! Claim and claim set types.
//!
//! A [`ClaimSet`] is the ordered list of `(type, value)` pairs extracted from a
//! token that already passed signature and expiry checks. Several claims may
//! share a type; lookups return the first match.

use serde::{Deserialize, Serialize};

// =============================================================================
// Claim Types
// =============================================================================

/// Well-known claim type names.
pub mod claim_types {
    /// Subject identifier of the end user.
    pub const SUBJECT: &str = "sub";

    /// Identifier of the client the token was issued to.
    pub const CLIENT_ID: &str = "client_id";

    /// Server-side handle of a reference token.
    pub const REFERENCE_TOKEN_ID: &str = "reference_token_id";

    /// Preferred username of the end user.
    pub const PREFERRED_USERNAME: &str = "preferred_username";

    /// Authentication method reference.
    pub const AUTHENTICATION_METHOD: &str = "amr";

    /// Identity provider that authenticated the user.
    pub const IDENTITY_PROVIDER: &str = "idp";
}

// =============================================================================
// Claim
// =============================================================================

/// A single typed fact about a token subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Claim {
    /// Claim type, e.g. `sub`.
    #[serde(rename = "type")]
    pub claim_type: String,

    /// Claim value.
    pub value: String,
}

impl Claim {
    /// Creates a new claim.
    #[must_use]
    pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            value: value.into(),
        }
    }

    /// Returns `true` if this claim has the given type.
    #[must_use]
    pub fn is_type(&self, claim_type: &str) -> bool {
        self.claim_type == claim_type
    }
}

// =============================================================================
// Claim Set
// =============================================================================

/// Ordered collection of claims.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet {
    claims: Vec<Claim>,
}

impl ClaimSet {
    /// Creates an empty claim set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a claim, keeping insertion order.
    #[must_use]
    pub fn with(mut self, claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        self.claims.push(Claim::new(claim_type, value));
        self
    }

    /// Returns the first claim of the given type.
    #[must_use]
    pub fn find_first(&self, claim_type: &str) -> Option<&Claim> {
        self.claims.iter().find(|c| c.is_type(claim_type))
    }

    /// Returns the value of the first claim of the given type.
    #[must_use]
    pub fn first_value(&self, claim_type: &str) -> Option<&str> {
        self.find_first(claim_type).map(|c| c.value.as_str())
    }

    /// Returns the value of the first `sub` claim.
    #[must_use]
    pub fn subject_id(&self) -> Option<&str> {
        self.first_value(claim_types::SUBJECT)
    }

    /// Returns the value of the first `client_id` claim.
    #[must_use]
    pub fn client_id(&self) -> Option<&str> {
        self.first_value(claim_types::CLIENT_ID)
    }

    /// Iterates over the claims in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Claim> {
        self.claims.iter()
    }

    /// Number of claims.
    #[must_use]
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// Returns `true` if the set holds no claims.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Returns the claims as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Claim] {
        &self.claims
    }
}

impl From<Vec<Claim>> for ClaimSet {
    fn from(claims: Vec<Claim>) -> Self {
        Self { claims }
    }
}

impl FromIterator<Claim> for ClaimSet {
    fn from_iter<I: IntoIterator<Item = Claim>>(iter: I) -> Self {
        Self {
            claims: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ClaimSet {
    type Item = &'a Claim;
    type IntoIter = std::slice::Iter<'a, Claim>;

    fn into_iter(self) -> Self::IntoIter {
        self.claims.iter()
    }
}

impl IntoIterator for ClaimSet {
    type Item = Claim;
    type IntoIter = std::vec::IntoIter<Claim>;

    fn into_iter(self) -> Self::IntoIter {
        self.claims.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_match_semantics() {
        let claims = ClaimSet::new()
            .with("amr", "pwd")
            .with(claim_types::SUBJECT, "u1")
            .with(claim_types::SUBJECT, "u2");

        assert_eq!(claims.subject_id(), Some("u1"));
        assert_eq!(claims.first_value("amr"), Some("pwd"));
        assert!(claims.client_id().is_none());
        assert_eq!(claims.len(), 3);
    }

    #[test]
    fn test_order_preserved() {
        let claims: ClaimSet = vec![Claim::new("a", "1"), Claim::new("b", "2")].into();
        let types: Vec<_> = claims.iter().map(|c| c.claim_type.as_str()).collect();
        assert_eq!(types, vec!["a", "b"]);
    }

    #[test]
    fn test_serializes_as_list() {
        let claims = ClaimSet::new().with(claim_types::CLIENT_ID, "c1");
        let json = serde_json::to_string(&claims).unwrap();
        assert_eq!(json, r#"[{"type":"client_id","value":"c1"}]"#);

        let parsed: ClaimSet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.client_id(), Some("c1"));
    }
}
