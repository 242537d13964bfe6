//! Client status provider trait.
//!
//! Defines how the validator looks up the client a token was issued to.
//! Implementations are provided by storage backends.

use async_trait::async_trait;

use crate::TrustResult;
use crate::types::Client;

// =============================================================================
// Client Status Provider Trait
// =============================================================================

/// Lookup of client registrations by client id.
///
/// # Example
///
/// ```ignore
/// use octofhir_token_trust::storage::ClientStatusProvider;
///
/// async fn example(clients: &impl ClientStatusProvider) -> TrustResult<()> {
///     if let Some(client) = clients.find_by_id("my-app").await? {
///         println!("{} enabled: {}", client.name, client.enabled);
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait ClientStatusProvider: Send + Sync {
    /// Find a client by its OAuth client_id.
    ///
    /// Returns `None` if the client is unknown. Disabled clients are returned
    /// with `enabled == false`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_id(&self, client_id: &str) -> TrustResult<Option<Client>>;
}
