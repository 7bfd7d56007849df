//! Shared primitives for all Rust crates in the identity gateway.

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across gateway crates.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> GatewayResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(GatewayError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Diagnostic payload carried alongside a classified provider failure.
///
/// Mirrors whatever the provider returned: the HTTP status when one was
/// received, and the raw error body when one could be read. Neither field
/// is ever assumed to be present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderFault {
    /// HTTP status returned by the provider, when the request got that far.
    pub status: Option<u16>,
    /// Raw error body as returned by the provider.
    pub body: Option<serde_json::Value>,
}

impl ProviderFault {
    /// Creates a fault from a provider status and optional body.
    #[must_use]
    pub fn new(status: Option<u16>, body: Option<serde_json::Value>) -> Self {
        Self { status, body }
    }
}

/// Classified gateway error categories.
///
/// Every provider call failure is re-classified into exactly one of these
/// kinds at the workflow level. The provider's own diagnostic payload is
/// preserved in [`ProviderFault`] where one exists.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Invalid input rejected before any provider call.
    #[error("validation error: {0}")]
    Validation(String),

    /// The administrative token could not be obtained.
    #[error("upstream auth failure: {message}")]
    UpstreamAuthFailure {
        /// Human-readable description.
        message: String,
        /// Provider diagnostic payload, when available.
        fault: Option<ProviderFault>,
    },

    /// End-user credential exchange rejected by the provider.
    #[error("authentication failed: {message}")]
    AuthenticationFailed {
        /// Human-readable description.
        message: String,
        /// Provider diagnostic payload, when available.
        fault: Option<ProviderFault>,
    },

    /// No client matches the given human-readable identifier.
    #[error("client not found: {0}")]
    ClientNotFound(String),

    /// No user matches the given username.
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// A step of the registration workflow failed.
    #[error("registration failed: {message}")]
    RegistrationFailed {
        /// Human-readable description, preferring the provider's own message.
        message: String,
        /// Provider diagnostic payload, when available.
        fault: Option<ProviderFault>,
    },

    /// A step of the role-creation workflow failed.
    #[error("role creation failed: {message}")]
    RoleCreationFailed {
        /// Human-readable description, preferring the provider's own message.
        message: String,
        /// Provider diagnostic payload, when available.
        fault: Option<ProviderFault>,
    },

    /// A step of the role-assignment workflow failed.
    #[error("role assignment failed: {message}")]
    RoleAssignmentFailed {
        /// Human-readable description, preferring the provider's own message.
        message: String,
        /// Provider diagnostic payload, when available.
        fault: Option<ProviderFault>,
    },

    /// The provider could not be reached at all.
    #[error("identity provider unavailable: {0}")]
    UpstreamUnavailable(String),
}

impl GatewayError {
    /// Returns the provider fault attached to this error, if any.
    #[must_use]
    pub fn fault(&self) -> Option<&ProviderFault> {
        match self {
            Self::UpstreamAuthFailure { fault, .. }
            | Self::AuthenticationFailed { fault, .. }
            | Self::RegistrationFailed { fault, .. }
            | Self::RoleCreationFailed { fault, .. }
            | Self::RoleAssignmentFailed { fault, .. } => fault.as_ref(),
            Self::Validation(_)
            | Self::ClientNotFound(_)
            | Self::UserNotFound(_)
            | Self::UpstreamUnavailable(_) => None,
        }
    }
}
