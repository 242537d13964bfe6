//! Subject (end user) record.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// An end user tokens are issued for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Subject identifier, matches the `sub` claim.
    pub subject_id: String,

    /// Login name.
    pub username: String,

    /// Whether the subject may still authenticate and act.
    pub active: bool,

    /// When the record was last changed.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Subject {
    /// Creates an active subject.
    #[must_use]
    pub fn new(subject_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            username: username.into(),
            active: true,
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    /// Returns a copy of this subject marked inactive.
    #[must_use]
    pub fn deactivated(mut self) -> Self {
        self.active = false;
        self.updated_at = OffsetDateTime::now_utc();
        self
    }
}
