//! Security event audit notifications.
//!
//! This module provides:
//!
//! - the [`Event`] model raised for authentication outcomes
//! - the [`EventSink`] capability events are handed to, fire-and-forget
//! - [`notify_local_login_success`] / [`notify_local_login_failure`] helpers
//!   used by login flows that sit in front of the validator
//! - [`TracingEventSink`], which writes events to `tracing` according to
//!   [`AuditConfig`]

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::config::AuditConfig;
use crate::types::IdentityContext;

// =============================================================================
// Event Constants
// =============================================================================

/// Stable event identifiers.
pub mod event_ids {
    /// A user logged in with local credentials.
    pub const SUCCESSFUL_LOCAL_LOGIN: u32 = 1010;

    /// A local credential login was rejected.
    pub const FAILED_LOCAL_LOGIN: u32 = 1011;
}

/// Event categories.
pub mod event_categories {
    /// Login and logout events.
    pub const AUTHENTICATION: &str = "Authentication";
}

/// Outcome class of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventType {
    /// The operation succeeded.
    Success,
    /// The operation was refused.
    Failure,
    /// Informational.
    Information,
    /// An unexpected error occurred.
    Error,
}

// =============================================================================
// Login Context
// =============================================================================

/// Context of the sign-in request a login belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignInMessage {
    /// Client that started the sign-in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    /// Where to continue after login.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,

    /// Requested identity provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idp: Option<String>,

    /// Tenant the login targets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,

    /// Username hint supplied by the client.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_hint: Option<String>,

    /// Requested authentication context classes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub acr_values: Vec<String>,
}

/// Outcome of authenticating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticateResult {
    user: Option<IdentityContext>,
    error_message: Option<String>,
}

impl AuthenticateResult {
    /// A successful authentication of `user`.
    #[must_use]
    pub fn success(user: IdentityContext) -> Self {
        Self {
            user: Some(user),
            error_message: None,
        }
    }

    /// A failed authentication.
    #[must_use]
    pub fn failure(error_message: impl Into<String>) -> Self {
        Self {
            user: None,
            error_message: Some(error_message.into()),
        }
    }

    /// The authenticated identity, if any.
    #[must_use]
    pub fn user(&self) -> Option<&IdentityContext> {
        self.user.as_ref()
    }

    /// Subject id of the authenticated identity.
    #[must_use]
    pub fn subject_id(&self) -> Option<&str> {
        self.user.as_ref().and_then(IdentityContext::subject_id)
    }

    /// Why authentication failed.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Returns `true` if authentication failed.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error_message.is_some()
    }
}

// =============================================================================
// Event
// =============================================================================

/// Details of a local (username/password) authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalAuthenticationDetails {
    /// Resolved subject id, absent on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,

    /// Sign-in request the login belongs to.
    pub sign_in_message: SignInMessage,

    /// Username the user typed.
    pub login_user_name: String,
}

/// Typed event payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventDetails {
    /// Local login outcome.
    LocalAuthentication(LocalAuthenticationDetails),
}

/// A structured audit event.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    /// Stable event identifier, see [`event_ids`].
    pub id: u32,

    /// Category, see [`event_categories`].
    pub category: &'static str,

    /// Short event name.
    pub name: &'static str,

    /// Outcome class.
    pub event_type: EventType,

    /// Human-readable message.
    pub message: String,

    /// Correlates events raised for the same activity.
    pub activity_id: Uuid,

    /// When the event was created.
    #[serde(with = "time::serde::rfc3339")]
    pub time_stamp: OffsetDateTime,

    /// Id of the raising process.
    pub process_id: u32,

    /// Event payload.
    pub details: EventDetails,
}

impl Event {
    fn new(
        id: u32,
        category: &'static str,
        name: &'static str,
        event_type: EventType,
        message: impl Into<String>,
        details: EventDetails,
    ) -> Self {
        Self {
            id,
            category,
            name,
            event_type,
            message: message.into(),
            activity_id: Uuid::new_v4(),
            time_stamp: OffsetDateTime::now_utc(),
            process_id: std::process::id(),
            details,
        }
    }
}

// =============================================================================
// Event Sink
// =============================================================================

/// Receives audit events. Raising never fails and never blocks the caller
/// on persistence.
pub trait EventSink: Send + Sync {
    /// Hands an event to the sink.
    fn raise(&self, event: Event);
}

/// Raises the success event for a local login.
pub fn notify_local_login_success(
    sink: &dyn EventSink,
    username: &str,
    sign_in_message: &SignInMessage,
    auth_result: &AuthenticateResult,
) {
    let details = LocalAuthenticationDetails {
        subject_id: auth_result.subject_id().map(ToString::to_string),
        sign_in_message: sign_in_message.clone(),
        login_user_name: username.to_string(),
    };

    sink.raise(Event::new(
        event_ids::SUCCESSFUL_LOCAL_LOGIN,
        event_categories::AUTHENTICATION,
        "Local Login Success",
        EventType::Success,
        "Successful local login",
        EventDetails::LocalAuthentication(details),
    ));
}

/// Raises the failure event for a rejected local login.
pub fn notify_local_login_failure(
    sink: &dyn EventSink,
    username: &str,
    sign_in_message: &SignInMessage,
    error: &str,
) {
    let details = LocalAuthenticationDetails {
        subject_id: None,
        sign_in_message: sign_in_message.clone(),
        login_user_name: username.to_string(),
    };

    sink.raise(Event::new(
        event_ids::FAILED_LOCAL_LOGIN,
        event_categories::AUTHENTICATION,
        "Local Login Failure",
        EventType::Failure,
        error,
        EventDetails::LocalAuthentication(details),
    ));
}

// =============================================================================
// Tracing Sink
// =============================================================================

/// Writes events to `tracing` under the `audit` target.
#[derive(Debug, Clone, Default)]
pub struct TracingEventSink {
    config: AuditConfig,
}

impl TracingEventSink {
    /// Creates a sink filtered by `config`.
    #[must_use]
    pub fn new(config: AuditConfig) -> Self {
        Self { config }
    }

    /// Returns `true` if events of this type are emitted.
    #[must_use]
    pub fn can_raise(&self, event_type: EventType) -> bool {
        match event_type {
            EventType::Success => self.config.raise_success_events,
            EventType::Failure => self.config.raise_failure_events,
            EventType::Information => self.config.raise_information_events,
            EventType::Error => self.config.raise_error_events,
        }
    }
}

impl EventSink for TracingEventSink {
    fn raise(&self, event: Event) {
        if !self.can_raise(event.event_type) {
            return;
        }

        let details = serde_json::to_string(&event.details).unwrap_or_default();

        match event.event_type {
            EventType::Success | EventType::Information => tracing::info!(
                target: "audit",
                event_id = event.id,
                category = event.category,
                name = event.name,
                activity_id = %event.activity_id,
                details = %details,
                "{}",
                event.message
            ),
            EventType::Failure => tracing::warn!(
                target: "audit",
                event_id = event.id,
                category = event.category,
                name = event.name,
                activity_id = %event.activity_id,
                details = %details,
                "{}",
                event.message
            ),
            EventType::Error => tracing::error!(
                target: "audit",
                event_id = event.id,
                category = event.category,
                name = event.name,
                activity_id = %event.activity_id,
                details = %details,
                "{}",
                event.message
            ),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
