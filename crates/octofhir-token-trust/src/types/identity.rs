//! Identity context handed to subject status providers.

use super::claims::{Claim, ClaimSet, claim_types};

/// Authentication type of identities built during token re-validation.
pub const TOKEN_VALIDATOR_AUTHENTICATION_TYPE: &str = "tokenvalidator";

/// A claims identity: "these claims, authenticated by this party".
///
/// The validator builds one per subject check from the token's claims, so a
/// provider can look at more than the bare subject id (reference token handle,
/// authentication method, identity provider).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityContext {
    authentication_type: String,
    claims: Vec<Claim>,
}

impl IdentityContext {
    /// Creates an identity with the given authentication type and claims.
    #[must_use]
    pub fn new(authentication_type: impl Into<String>, claims: &ClaimSet) -> Self {
        Self {
            authentication_type: authentication_type.into(),
            claims: claims.as_slice().to_vec(),
        }
    }

    /// Creates an identity authenticated by the token validator.
    #[must_use]
    pub fn for_token_validator(claims: &ClaimSet) -> Self {
        Self::new(TOKEN_VALIDATOR_AUTHENTICATION_TYPE, claims)
    }

    /// Appends a claim to the identity.
    pub fn add_claim(&mut self, claim: Claim) {
        self.claims.push(claim);
    }

    /// The party that authenticated this identity.
    #[must_use]
    pub fn authentication_type(&self) -> &str {
        &self.authentication_type
    }

    /// All claims of the identity in order.
    #[must_use]
    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    /// Returns the first claim of the given type.
    #[must_use]
    pub fn find_first(&self, claim_type: &str) -> Option<&Claim> {
        self.claims.iter().find(|c| c.is_type(claim_type))
    }

    /// Value of the first `sub` claim.
    #[must_use]
    pub fn subject_id(&self) -> Option<&str> {
        self.find_first(claim_types::SUBJECT)
            .map(|c| c.value.as_str())
    }

    /// Value of the first `reference_token_id` claim.
    #[must_use]
    pub fn reference_token_id(&self) -> Option<&str> {
        self.find_first(claim_types::REFERENCE_TOKEN_ID)
            .map(|c| c.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_validator_identity() {
        let claims = ClaimSet::new()
            .with(claim_types::SUBJECT, "u1")
            .with(claim_types::CLIENT_ID, "c1");
        let mut identity = IdentityContext::for_token_validator(&claims);

        assert_eq!(identity.authentication_type(), "tokenvalidator");
        assert_eq!(identity.subject_id(), Some("u1"));
        assert!(identity.reference_token_id().is_none());

        identity.add_claim(Claim::new(claim_types::REFERENCE_TOKEN_ID, "ref-1"));
        assert_eq!(identity.reference_token_id(), Some("ref-1"));
        assert_eq!(identity.claims().len(), 3);
        // the source claim set is untouched
        assert_eq!(claims.len(), 2);
    }
}
