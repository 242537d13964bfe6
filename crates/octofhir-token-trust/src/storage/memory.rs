//! In-memory subject and client stores.
//!
//! Useful for embedding and tests. Both stores are safe to share across tasks
//! and can be updated while validators are using them.

use async_trait::async_trait;
use dashmap::DashMap;

use super::{ClientStatusProvider, SubjectStatusProvider};
use crate::TrustResult;
use crate::error::TrustError;
use crate::types::{Client, IdentityContext, Subject};

// =============================================================================
// Client Store
// =============================================================================

/// Client registrations keyed by client id.
#[derive(Default)]
pub struct InMemoryClientStore {
    clients: DashMap<String, Client>,
}

impl InMemoryClientStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a client.
    ///
    /// # Errors
    ///
    /// Returns `TrustError::InvalidArgument` if the client fails validation.
    pub fn upsert(&self, client: Client) -> TrustResult<()> {
        client
            .validate()
            .map_err(|e| TrustError::invalid_argument("client", e.to_string()))?;
        self.clients.insert(client.client_id.clone(), client);
        Ok(())
    }

    /// Sets the enabled flag of a client. Returns `false` if it is unknown.
    pub fn set_enabled(&self, client_id: &str, enabled: bool) -> bool {
        match self.clients.get_mut(client_id) {
            Some(mut client) => {
                client.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Removes a client.
    pub fn remove(&self, client_id: &str) -> Option<Client> {
        self.clients.remove(client_id).map(|(_, client)| client)
    }
}

#[async_trait]
impl ClientStatusProvider for InMemoryClientStore {
    async fn find_by_id(&self, client_id: &str) -> TrustResult<Option<Client>> {
        Ok(self.clients.get(client_id).map(|c| c.value().clone()))
    }
}

// =============================================================================
// Subject Store
// =============================================================================

/// Subjects keyed by subject id.
///
/// Unknown subjects are reported inactive.
#[derive(Default)]
pub struct InMemorySubjectStore {
    subjects: DashMap<String, Subject>,
}

impl InMemorySubjectStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a subject.
    ///
    /// # Errors
    ///
    /// Returns `TrustError::InvalidArgument` if the subject id is empty.
    pub fn upsert(&self, subject: Subject) -> TrustResult<()> {
        if subject.subject_id.is_empty() {
            return Err(TrustError::invalid_argument(
                "subject",
                "subject id must not be empty",
            ));
        }
        self.subjects.insert(subject.subject_id.clone(), subject);
        Ok(())
    }

    /// Sets the active flag of a subject. Returns `false` if it is unknown.
    pub fn set_active(&self, subject_id: &str, active: bool) -> bool {
        match self.subjects.get_mut(subject_id) {
            Some(mut subject) => {
                subject.active = active;
                subject.updated_at = time::OffsetDateTime::now_utc();
                true
            }
            None => false,
        }
    }

    /// Looks up a subject by id.
    #[must_use]
    pub fn get(&self, subject_id: &str) -> Option<Subject> {
        self.subjects.get(subject_id).map(|s| s.value().clone())
    }
}

#[async_trait]
impl SubjectStatusProvider for InMemorySubjectStore {
    async fn is_active(&self, identity: &IdentityContext) -> TrustResult<bool> {
        let Some(subject_id) = identity.subject_id() else {
            return Ok(false);
        };

        Ok(self
            .subjects
            .get(subject_id)
            .is_some_and(|subject| subject.active))
    }
}
