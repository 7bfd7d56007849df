use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use idgate_application::{ProviderCallError, ProviderClient, UserCreation};
use idgate_core::GatewayResult;
use idgate_domain::{
    ClientRecord, LoginRequest, RegisterRequest, RoleRecord, TokenResponse, UserRecord,
};

use crate::ProviderConfig;

/// HTTP implementation of the provider port.
///
/// Stateless beyond the shared transport: no token, lookup result, or
/// response is cached across calls. Every method is a single-attempt
/// request against the provider's REST API.
pub struct HttpProviderClient {
    http: reqwest::Client,
    config: ProviderConfig,
}

impl HttpProviderClient {
    /// Creates a provider client, validating the configured base URL.
    pub fn new(http: reqwest::Client, config: ProviderConfig) -> GatewayResult<Self> {
        let config = config.validated()?;
        Ok(Self { http, config })
    }

    fn token_endpoint(&self, realm: &str) -> String {
        format!(
            "{}/realms/{realm}/protocol/openid-connect/token",
            self.config.base_url
        )
    }

    fn admin_endpoint(&self, suffix: &str) -> String {
        format!(
            "{}/admin/realms/{}/{suffix}",
            self.config.base_url, self.config.realm
        )
    }

    async fn expect_success(
        response: Result<reqwest::Response, reqwest::Error>,
    ) -> Result<reqwest::Response, ProviderCallError> {
        let response = response.map_err(transport_error)?;
        if response.status().is_success() {
            return Ok(response);
        }

        Err(rejection(response).await)
    }
}

#[async_trait]
impl ProviderClient for HttpProviderClient {
    async fn acquire_admin_token(&self) -> Result<String, ProviderCallError> {
        let url = self.token_endpoint(&self.config.admin_realm);
        debug!(realm = %self.config.admin_realm, "acquiring administrative token");

        let response = self
            .http
            .post(&url)
            .form(&[
                ("grant_type", "password"),
                ("client_id", self.config.admin_client_id.as_str()),
                ("username", self.config.admin_username.as_str()),
                ("password", self.config.admin_password.as_str()),
            ])
            .send()
            .await;

        let tokens: TokenResponse = Self::expect_success(response)
            .await?
            .json()
            .await
            .map_err(decode_error)?;

        Ok(tokens.access_token)
    }

    async fn user_token(&self, request: &LoginRequest) -> Result<TokenResponse, ProviderCallError> {
        let url = self.token_endpoint(&self.config.realm);
        debug!(username = %request.username, "exchanging end-user credentials");

        let response = self
            .http
            .post(&url)
            .form(&[
                ("grant_type", request.grant_type.as_str()),
                ("client_id", request.client_id.as_str()),
                ("username", request.username.as_str()),
                ("password", request.password.as_str()),
            ])
            .send()
            .await;

        Self::expect_success(response)
            .await?
            .json()
            .await
            .map_err(decode_error)
    }

    async fn create_user(
        &self,
        admin_token: &str,
        request: &RegisterRequest,
    ) -> Result<UserCreation, ProviderCallError> {
        let url = self.admin_endpoint("users");
        debug!(username = %request.username, "creating user");

        let response = self
            .http
            .post(&url)
            .bearer_auth(admin_token)
            .json(request)
            .send()
            .await;

        let response = Self::expect_success(response).await?;
        let status = response.status().as_u16();
        let location = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        Ok(UserCreation { status, location })
    }

    async fn get_user(
        &self,
        admin_token: &str,
        user_id: &str,
    ) -> Result<UserRecord, ProviderCallError> {
        let url = self.admin_endpoint(&format!("users/{user_id}"));

        let response = self.http.get(&url).bearer_auth(admin_token).send().await;

        Self::expect_success(response)
            .await?
            .json()
            .await
            .map_err(decode_error)
    }

    async fn find_users_by_username(
        &self,
        admin_token: &str,
        username: &str,
    ) -> Result<Vec<UserRecord>, ProviderCallError> {
        let url = self.admin_endpoint("users");

        let response = self
            .http
            .get(&url)
            .bearer_auth(admin_token)
            .query(&[("username", username), ("exact", "true")])
            .send()
            .await;

        Self::expect_success(response)
            .await?
            .json()
            .await
            .map_err(decode_error)
    }

    async fn find_clients_by_client_id(
        &self,
        admin_token: &str,
        client_id: &str,
    ) -> Result<Vec<ClientRecord>, ProviderCallError> {
        let url = self.admin_endpoint("clients");

        let response = self
            .http
            .get(&url)
            .bearer_auth(admin_token)
            .query(&[("clientId", client_id)])
            .send()
            .await;

        Self::expect_success(response)
            .await?
            .json()
            .await
            .map_err(decode_error)
    }

    async fn create_client_role(
        &self,
        admin_token: &str,
        internal_client_id: &str,
        name: &str,
        description: &str,
    ) -> Result<(), ProviderCallError> {
        let url = self.admin_endpoint(&format!("clients/{internal_client_id}/roles"));
        debug!(role = %name, "creating client role");

        let response = self
            .http
            .post(&url)
            .bearer_auth(admin_token)
            .json(&serde_json::json!({
                "name": name,
                "description": description,
            }))
            .send()
            .await;

        Self::expect_success(response).await?;
        Ok(())
    }

    async fn get_client_role(
        &self,
        admin_token: &str,
        internal_client_id: &str,
        role_name: &str,
    ) -> Result<RoleRecord, ProviderCallError> {
        let url = self.admin_endpoint(&format!("clients/{internal_client_id}/roles/{role_name}"));

        let response = self.http.get(&url).bearer_auth(admin_token).send().await;

        Self::expect_success(response)
            .await?
            .json()
            .await
            .map_err(decode_error)
    }

    async fn assign_client_role(
        &self,
        admin_token: &str,
        user_id: &str,
        internal_client_id: &str,
        roles: &[RoleRecord],
    ) -> Result<(), ProviderCallError> {
        let url = self.admin_endpoint(&format!(
            "users/{user_id}/role-mappings/clients/{internal_client_id}"
        ));
        debug!(user = %user_id, "assigning client roles");

        let response = self
            .http
            .post(&url)
            .bearer_auth(admin_token)
            .json(&roles)
            .send()
            .await;

        Self::expect_success(response).await?;
        Ok(())
    }
}

fn transport_error(error: reqwest::Error) -> ProviderCallError {
    ProviderCallError::Unreachable(error.to_string())
}

fn decode_error(error: reqwest::Error) -> ProviderCallError {
    ProviderCallError::Decode(error.to_string())
}

/// Builds a rejection from a non-success response, reading the provider's
/// error envelope defensively: no field of it is assumed to be present.
async fn rejection(response: reqwest::Response) -> ProviderCallError {
    let status = response.status().as_u16();
    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "<response body unavailable>".to_owned());

    let body: Option<Value> = serde_json::from_str(&text).ok();
    let error_message = body.as_ref().and_then(embedded_error_message);

    warn!(status, "identity provider rejected a request");

    let body = body.or_else(|| (!text.is_empty()).then(|| Value::String(text)));

    ProviderCallError::Rejected {
        status,
        error_message,
        body,
    }
}

/// The provider embeds human-readable messages under different keys
/// depending on the endpoint family: admin endpoints use `errorMessage`,
/// token endpoints use `error_description` and `error`.
fn embedded_error_message(body: &Value) -> Option<String> {
    ["errorMessage", "error_description", "error"]
        .iter()
        .find_map(|key| body.get(key).and_then(Value::as_str))
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;

    use idgate_application::{ProviderCallError, ProviderClient};
    use idgate_domain::{LoginRequest, RegisterRequest, RoleRecord, UserCredential};

    use super::{HttpProviderClient, ProviderConfig};

    fn client_for(server: &MockServer) -> HttpProviderClient {
        let config = ProviderConfig {
            base_url: server.base_url(),
            ..ProviderConfig::default()
        };
        let Ok(client) = HttpProviderClient::new(reqwest::Client::new(), config) else {
            unreachable!("mock server base URL must validate")
        };
        client
    }

    fn register_request() -> RegisterRequest {
        RegisterRequest {
            username: "alice".to_owned(),
            email: "alice@example.com".to_owned(),
            enabled: true,
            first_name: "Alice".to_owned(),
            last_name: "A".to_owned(),
            credentials: vec![UserCredential {
                credential_type: "password".to_owned(),
                value: "secret123".to_owned(),
                temporary: false,
            }],
        }
    }

    #[tokio::test]
    async fn admin_token_posts_password_grant_to_admin_realm() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/realms/master/protocol/openid-connect/token")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body_includes("grant_type=password")
                    .body_includes("client_id=admin-cli")
                    .body_includes("username=admin");
                then.status(200)
                    .json_body(serde_json::json!({"access_token": "admin-tok"}));
            })
            .await;

        let result = client_for(&server).acquire_admin_token().await;

        mock.assert_async().await;
        let Ok(token) = result else {
            unreachable!("token acquisition must succeed")
        };
        assert_eq!(token, "admin-tok");
    }

    #[tokio::test]
    async fn user_token_targets_the_configured_realm() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/realms/demo/protocol/openid-connect/token")
                    .body_includes("username=alice");
                then.status(200).json_body(serde_json::json!({
                    "access_token": "tok",
                    "token_type": "Bearer"
                }));
            })
            .await;

        let request = LoginRequest {
            grant_type: "password".to_owned(),
            client_id: "admin-spa".to_owned(),
            username: "alice".to_owned(),
            password: "secret123".to_owned(),
        };
        let result = client_for(&server).user_token(&request).await;

        mock.assert_async().await;
        let Ok(tokens) = result else {
            unreachable!("login must succeed")
        };
        assert_eq!(tokens.access_token, "tok");
    }

    #[tokio::test]
    async fn create_user_sends_bearer_and_returns_location() {
        let server = MockServer::start_async().await;
        let location = format!("{}/admin/realms/demo/users/abc-123", server.base_url());
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/admin/realms/demo/users")
                    .header("authorization", "Bearer admin-tok")
                    .body_includes(r#""firstName":"Alice""#);
                then.status(201).header("Location", location.as_str());
            })
            .await;

        let result = client_for(&server)
            .create_user("admin-tok", &register_request())
            .await;

        mock.assert_async().await;
        let Ok(creation) = result else {
            unreachable!("user creation must succeed")
        };
        assert_eq!(creation.status, 201);
        assert_eq!(creation.location.as_deref(), Some(location.as_str()));
    }

    #[tokio::test]
    async fn rejection_surfaces_embedded_error_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/admin/realms/demo/users");
                then.status(409).json_body(serde_json::json!({
                    "errorMessage": "User exists with same username"
                }));
            })
            .await;

        let result = client_for(&server)
            .create_user("admin-tok", &register_request())
            .await;

        let Err(ProviderCallError::Rejected {
            status,
            error_message,
            body,
        }) = result
        else {
            unreachable!("conflict must surface as Rejected")
        };
        assert_eq!(status, 409);
        assert_eq!(
            error_message.as_deref(),
            Some("User exists with same username")
        );
        assert!(body.is_some());
    }

    #[tokio::test]
    async fn user_lookup_requests_exact_match() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/admin/realms/demo/users")
                    .query_param("username", "alice")
                    .query_param("exact", "true");
                then.status(200).json_body(serde_json::json!([
                    {"id": "uid-1", "username": "alice", "enabled": true}
                ]));
            })
            .await;

        let result = client_for(&server)
            .find_users_by_username("admin-tok", "alice")
            .await;

        mock.assert_async().await;
        let Ok(users) = result else {
            unreachable!("user lookup must succeed")
        };
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, "uid-1");
    }

    #[tokio::test]
    async fn role_assignment_posts_array_of_signatures() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/admin/realms/demo/users/uid-1/role-mappings/clients/cid-1")
                    .json_body(serde_json::json!([{
                        "id": "rid-1",
                        "name": "editor",
                        "composite": false,
                        "clientRole": true,
                        "containerId": "cid-1"
                    }]));
                then.status(204);
            })
            .await;

        let roles = [RoleRecord {
            id: "rid-1".to_owned(),
            name: "editor".to_owned(),
            description: None,
            composite: false,
            client_role: true,
            container_id: Some("cid-1".to_owned()),
        }];
        let result = client_for(&server)
            .assign_client_role("admin-tok", "uid-1", "cid-1", &roles)
            .await;

        mock.assert_async().await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn role_fetch_uses_name_scoped_path() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/admin/realms/demo/clients/cid-1/roles/editor");
                then.status(200).json_body(serde_json::json!({
                    "id": "rid-1",
                    "name": "editor",
                    "composite": false,
                    "clientRole": true,
                    "containerId": "cid-1"
                }));
            })
            .await;

        let result = client_for(&server)
            .get_client_role("admin-tok", "cid-1", "editor")
            .await;

        mock.assert_async().await;
        let Ok(role) = result else {
            unreachable!("role fetch must succeed")
        };
        assert_eq!(role.id, "rid-1");
        assert!(role.client_role);
    }

    #[tokio::test]
    async fn unreachable_provider_reports_transport_failure() {
        let config = ProviderConfig {
            // Port 9 (discard) is closed in the test environment.
            base_url: "http://127.0.0.1:9".to_owned(),
            ..ProviderConfig::default()
        };
        let Ok(client) = HttpProviderClient::new(reqwest::Client::new(), config) else {
            unreachable!("base URL must validate")
        };

        let result = client.acquire_admin_token().await;

        assert!(matches!(result, Err(ProviderCallError::Unreachable(_))));
    }
}
