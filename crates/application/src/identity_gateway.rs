//! The four identity workflows and their shared provider lookups.
//!
//! Each workflow is an ordered sequence of provider calls; every later call
//! depends on data returned by an earlier one, so the sequence is strictly
//! sequential. There is no rollback: the provider is the source of truth
//! and partial application surfaces as a classified failure.

use std::sync::Arc;

use idgate_core::{GatewayError, GatewayResult};
use idgate_domain::{
    AssignRoleRequest, AssignRoleResult, AssignedRole, ClientRecord, CreateRoleRequest,
    CreateRoleResult, LoginRequest, RegisterRequest, RegisterResult, RoleRecord, TokenResponse,
    UserRecord,
};

use crate::{ProviderCallError, ProviderClient};

/// Orchestrates multi-step workflows against the identity provider.
///
/// Holds no mutable state: every operation acquires its own admin token and
/// performs its own lookups, so concurrent invocations are independent.
#[derive(Clone)]
pub struct IdentityGateway {
    provider: Arc<dyn ProviderClient>,
}

impl IdentityGateway {
    /// Creates a gateway over a provider port.
    #[must_use]
    pub fn new(provider: Arc<dyn ProviderClient>) -> Self {
        Self { provider }
    }

    /// Exchanges end-user credentials for a session token pair.
    ///
    /// The token response is passed through unmodified; the gateway does
    /// not interpret token contents. The administrative token is not
    /// involved. On failure the provider's raw error payload and status
    /// are carried on the error; the status defaults to the internal-error
    /// class when the provider gave none.
    pub async fn authenticate(&self, request: &LoginRequest) -> GatewayResult<TokenResponse> {
        self.provider.user_token(request).await.map_err(|error| {
            GatewayError::AuthenticationFailed {
                message: error.message_or("Login failed"),
                fault: error.fault(),
            }
        })
    }

    /// Creates a new user account and returns its full resolved record.
    ///
    /// The provider confirms creation only through a `Location` response
    /// header. When that header is missing or carries no identifier the
    /// creation is treated as partially confirmed: the result carries the
    /// raw location and no resolved record rather than failing, since the
    /// resource may still have been created. A failed follow-up fetch is
    /// not downgraded the same way: a caller expecting a user record must
    /// not receive a silently incomplete one.
    pub async fn register(&self, request: &RegisterRequest) -> GatewayResult<RegisterResult> {
        let admin_token = self.admin_token().await?;

        let creation = self
            .provider
            .create_user(&admin_token, request)
            .await
            .map_err(registration_error)?;

        let user_id = creation.location.as_deref().and_then(trailing_segment);

        let Some(user_id) = user_id else {
            return Ok(RegisterResult {
                message: "User created successfully".to_owned(),
                status: creation.status,
                user_id: None,
                location: creation.location,
                user: None,
            });
        };

        let user = self
            .provider
            .get_user(&admin_token, &user_id)
            .await
            .map_err(registration_error)?;

        Ok(RegisterResult {
            message: "User created successfully".to_owned(),
            status: creation.status,
            user_id: Some(user_id),
            location: None,
            user: Some(user),
        })
    }

    /// Creates a role scoped to a named client and returns its canonical
    /// record.
    ///
    /// The provider returns no usable body on role creation, so the role is
    /// re-fetched by name afterwards to obtain the identity fields the
    /// provider assigned.
    pub async fn create_role(&self, request: &CreateRoleRequest) -> GatewayResult<CreateRoleResult> {
        let admin_token = self.admin_token().await?;

        let client = self
            .resolve_client(&admin_token, &request.client_id, role_creation_error)
            .await?;

        let description = request.description.clone().unwrap_or_default();
        self.provider
            .create_client_role(&admin_token, &client.id, &request.name, &description)
            .await
            .map_err(role_creation_error)?;

        let role = self
            .provider
            .get_client_role(&admin_token, &client.id, &request.name)
            .await
            .map_err(role_creation_error)?;

        Ok(CreateRoleResult {
            message: "Role created successfully".to_owned(),
            role,
        })
    }

    /// Attaches an existing client role to an existing user.
    ///
    /// The assignment call requires the role's full signature, not just its
    /// name, so the canonical record is fetched fresh and echoed back as a
    /// single-element sequence. Repeating the operation sends the identical
    /// signature; duplicate-assignment semantics stay with the provider.
    pub async fn assign_role(&self, request: &AssignRoleRequest) -> GatewayResult<AssignRoleResult> {
        let admin_token = self.admin_token().await?;

        let user = self.resolve_user(&admin_token, &request.username).await?;
        let client = self
            .resolve_client(&admin_token, &request.client_id, role_assignment_error)
            .await?;

        let role = self
            .provider
            .get_client_role(&admin_token, &client.id, &request.role_name)
            .await
            .map_err(role_assignment_error)?;

        let roles: [RoleRecord; 1] = [role.clone()];
        self.provider
            .assign_client_role(&admin_token, &user.id, &client.id, &roles)
            .await
            .map_err(role_assignment_error)?;

        Ok(AssignRoleResult {
            message: "Role assigned successfully".to_owned(),
            user_id: user.id,
            username: request.username.clone(),
            role: AssignedRole {
                name: role.name,
                client: request.client_id.clone(),
            },
        })
    }

    /// Acquires a fresh administrative token for the enclosing operation.
    ///
    /// Obtained once per operation and never reused across requests,
    /// trading latency for simplicity and avoiding stale-token edge cases.
    async fn admin_token(&self) -> GatewayResult<String> {
        self.provider
            .acquire_admin_token()
            .await
            .map_err(|error| match error {
                ProviderCallError::Unreachable(message) => {
                    GatewayError::UpstreamUnavailable(message)
                }
                other => GatewayError::UpstreamAuthFailure {
                    message: other.message_or("failed to obtain administrative token"),
                    fault: other.fault(),
                },
            })
    }

    /// Resolves a username to its user record by exact-match lookup.
    async fn resolve_user(
        &self,
        admin_token: &str,
        username: &str,
    ) -> GatewayResult<UserRecord> {
        let mut matches = self
            .provider
            .find_users_by_username(admin_token, username)
            .await
            .map_err(role_assignment_error)?;

        if matches.is_empty() {
            return Err(GatewayError::UserNotFound(username.to_owned()));
        }

        Ok(matches.swap_remove(0))
    }

    /// Resolves a human-readable client identifier to its registration.
    ///
    /// Client identifiers are unique per realm; should the provider ever
    /// report duplicates, the first entry is taken deterministically.
    async fn resolve_client(
        &self,
        admin_token: &str,
        client_id: &str,
        classify: fn(ProviderCallError) -> GatewayError,
    ) -> GatewayResult<ClientRecord> {
        let mut matches = self
            .provider
            .find_clients_by_client_id(admin_token, client_id)
            .await
            .map_err(classify)?;

        if matches.is_empty() {
            return Err(GatewayError::ClientNotFound(client_id.to_owned()));
        }

        Ok(matches.swap_remove(0))
    }
}

fn registration_error(error: ProviderCallError) -> GatewayError {
    match error {
        ProviderCallError::Unreachable(message) => GatewayError::UpstreamUnavailable(message),
        other => GatewayError::RegistrationFailed {
            message: other.message_or("Registration failed"),
            fault: other.fault(),
        },
    }
}

fn role_creation_error(error: ProviderCallError) -> GatewayError {
    match error {
        ProviderCallError::Unreachable(message) => GatewayError::UpstreamUnavailable(message),
        other => GatewayError::RoleCreationFailed {
            message: other.message_or("Role creation failed"),
            fault: other.fault(),
        },
    }
}

fn role_assignment_error(error: ProviderCallError) -> GatewayError {
    match error {
        ProviderCallError::Unreachable(message) => GatewayError::UpstreamUnavailable(message),
        other => GatewayError::RoleAssignmentFailed {
            message: other.message_or("Role assignment failed"),
            fault: other.fault(),
        },
    }
}

/// Extracts the trailing path segment of a `Location` header value.
///
/// Returns `None` for an empty trailing segment (e.g. a URL ending in `/`)
/// so a malformed header degrades to the partially-confirmed path.
fn trailing_segment(location: &str) -> Option<String> {
    location
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_owned)
}
