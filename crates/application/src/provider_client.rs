use async_trait::async_trait;
use thiserror::Error;

use idgate_core::ProviderFault;
use idgate_domain::{
    ClientRecord, LoginRequest, RegisterRequest, RoleRecord, TokenResponse, UserRecord,
};

/// Failure of a single provider call, before workflow-level classification.
///
/// Infrastructure reports what happened on the wire; the gateway decides
/// what it means for the enclosing workflow.
#[derive(Debug, Error)]
pub enum ProviderCallError {
    /// The provider could not be reached at all.
    #[error("identity provider unreachable: {0}")]
    Unreachable(String),

    /// The provider answered with a non-success status.
    #[error("identity provider rejected the request with status {status}")]
    Rejected {
        /// HTTP status of the rejection.
        status: u16,
        /// The provider's embedded `errorMessage` field, when present.
        error_message: Option<String>,
        /// Raw error body, when one could be read.
        body: Option<serde_json::Value>,
    },

    /// The provider answered successfully but the payload did not parse.
    #[error("failed to decode provider response: {0}")]
    Decode(String),
}

impl ProviderCallError {
    /// Returns the diagnostic payload to attach to a classified error.
    #[must_use]
    pub fn fault(&self) -> Option<ProviderFault> {
        match self {
            Self::Rejected { status, body, .. } => {
                Some(ProviderFault::new(Some(*status), body.clone()))
            }
            Self::Unreachable(_) | Self::Decode(_) => None,
        }
    }

    /// Returns the provider's embedded error message, or the fallback.
    #[must_use]
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            Self::Rejected {
                error_message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_owned(),
        }
    }
}

/// Outcome of the provider's user-creation call.
///
/// The provider returns no body on success, only a `Location` response
/// header referencing the new resource.
#[derive(Debug, Clone)]
pub struct UserCreation {
    /// HTTP status the provider answered with.
    pub status: u16,
    /// Raw `Location` header value, when the provider sent one.
    pub location: Option<String>,
}

/// Port to the identity provider, one method per remote endpoint.
///
/// Each method is a single best-effort network call with no retry and no
/// shared state; the admin-token methods take the freshly acquired token
/// explicitly so nothing is cached across operations.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Acquires a fresh administrative bearer token via password grant
    /// against the administrative realm.
    async fn acquire_admin_token(&self) -> Result<String, ProviderCallError>;

    /// Exchanges end-user credentials at the target realm's token endpoint.
    async fn user_token(&self, request: &LoginRequest) -> Result<TokenResponse, ProviderCallError>;

    /// Creates a user in the target realm.
    async fn create_user(
        &self,
        admin_token: &str,
        request: &RegisterRequest,
    ) -> Result<UserCreation, ProviderCallError>;

    /// Fetches a user's full record by its opaque identifier.
    async fn get_user(
        &self,
        admin_token: &str,
        user_id: &str,
    ) -> Result<UserRecord, ProviderCallError>;

    /// Finds users by exact username match.
    async fn find_users_by_username(
        &self,
        admin_token: &str,
        username: &str,
    ) -> Result<Vec<UserRecord>, ProviderCallError>;

    /// Finds client registrations by human-readable client identifier.
    async fn find_clients_by_client_id(
        &self,
        admin_token: &str,
        client_id: &str,
    ) -> Result<Vec<ClientRecord>, ProviderCallError>;

    /// Creates a role scoped to a client's internal identifier.
    async fn create_client_role(
        &self,
        admin_token: &str,
        internal_client_id: &str,
        name: &str,
        description: &str,
    ) -> Result<(), ProviderCallError>;

    /// Fetches a client role's canonical record by name.
    async fn get_client_role(
        &self,
        admin_token: &str,
        internal_client_id: &str,
        role_name: &str,
    ) -> Result<RoleRecord, ProviderCallError>;

    /// Attaches role signatures to a user's client-role mapping.
    async fn assign_client_role(
        &self,
        admin_token: &str,
        user_id: &str,
        internal_client_id: &str,
        roles: &[RoleRecord],
    ) -> Result<(), ProviderCallError>;
}
