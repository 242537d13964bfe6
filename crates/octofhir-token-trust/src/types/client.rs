//! OAuth 2.0 client record as seen by trust re-validation.
//!
//! Only the fields that decide whether tokens issued to a client may still be
//! honored are modelled here. Full client registrations live in the client
//! store behind [`ClientStatusProvider`](crate::storage::ClientStatusProvider).

use serde::{Deserialize, Serialize};

// =============================================================================
// Client
// =============================================================================

/// Registered client application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Unique client identifier used in OAuth flows.
    pub client_id: String,

    /// Human-readable display name.
    pub name: String,

    /// Whether tokens issued to this client may still be used.
    #[serde(alias = "active")]
    pub enabled: bool,
}

impl Client {
    /// Creates an enabled client.
    #[must_use]
    pub fn new(client_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            name: name.into(),
            enabled: true,
        }
    }

    /// Returns a copy of this client with `enabled` set to `false`.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Validates the client record.
    ///
    /// # Errors
    ///
    /// Returns an error if the client id or name is empty.
    pub fn validate(&self) -> Result<(), ClientValidationError> {
        if self.client_id.is_empty() {
            return Err(ClientValidationError::EmptyClientId);
        }

        if self.name.is_empty() {
            return Err(ClientValidationError::EmptyName);
        }

        Ok(())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Errors that can occur during client validation.
#[derive(Debug, thiserror::Error)]
pub enum ClientValidationError {
    /// Client ID cannot be empty.
    #[error("Client ID cannot be empty")]
    EmptyClientId,

    /// Client name cannot be empty.
    #[error("Client name cannot be empty")]
    EmptyName,
}
