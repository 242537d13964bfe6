//! Common types used across the token trust modules.
//!
//! ## Domain Types
//!
//! - [`ClaimSet`] - Ordered claims of an already verified token
//! - [`TokenVerdict`] - In-flight pass/fail result of validation
//! - [`IdentityContext`] - Claims identity handed to subject status providers
//! - [`Client`] - Client record with its enabled flag
//! - [`Subject`] - End user record with its active flag

pub mod claims;
pub mod client;
pub mod identity;
pub mod subject;
pub mod verdict;

pub use claims::{Claim, ClaimSet, claim_types};
pub use client::{Client, ClientValidationError};
pub use identity::{IdentityContext, TOKEN_VALIDATOR_AUTHENTICATION_TYPE};
pub use subject::Subject;
pub use verdict::{ProtectedResourceError, TokenVerdict};
