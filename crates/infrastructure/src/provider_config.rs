use idgate_core::{GatewayError, GatewayResult};
use url::Url;

/// Connection settings for the identity provider.
///
/// The defaults suit a local development provider; production deployments
/// must override every credential-bearing value.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Provider base URL, without a trailing slash.
    pub base_url: String,
    /// Realm holding end users, clients, and roles.
    pub realm: String,
    /// Realm the administrative account authenticates against.
    pub admin_realm: String,
    /// Client identifier used for the administrative password grant.
    pub admin_client_id: String,
    /// Administrative username.
    pub admin_username: String,
    /// Administrative password.
    pub admin_password: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_owned(),
            realm: "demo".to_owned(),
            admin_realm: "master".to_owned(),
            admin_client_id: "admin-cli".to_owned(),
            admin_username: "admin".to_owned(),
            admin_password: "admin".to_owned(),
        }
    }
}

impl ProviderConfig {
    /// Validates the base URL and normalizes away a trailing slash.
    pub fn validated(mut self) -> GatewayResult<Self> {
        Url::parse(&self.base_url).map_err(|error| {
            GatewayError::Validation(format!(
                "invalid provider base URL '{}': {error}",
                self.base_url
            ))
        })?;

        while self.base_url.ends_with('/') {
            self.base_url.pop();
        }

        Ok(self)
    }
}
