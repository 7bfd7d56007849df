use serde::{Deserialize, Serialize};

/// End-user credential exchange request, forwarded to the provider's realm
/// token endpoint as form parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// OAuth grant type, typically `password`.
    pub grant_type: String,
    /// Human-readable client identifier the user logs in through.
    pub client_id: String,
    /// Username presented to the provider.
    pub username: String,
    /// Password presented to the provider.
    pub password: String,
}

/// Token response passed through verbatim from the provider.
///
/// The gateway never interprets token contents; fields beyond
/// `access_token` are tolerated as absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Bearer access token.
    pub access_token: String,
    /// Refresh token, when the provider issues one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Access token lifetime in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
    /// Refresh token lifetime in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_expires_in: Option<i64>,
    /// Token type, typically `Bearer`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    /// Provider session state identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_state: Option<String>,
    /// Granted scopes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::TokenResponse;

    #[test]
    fn token_response_tolerates_minimal_payload() {
        let parsed: Result<TokenResponse, _> = serde_json::from_str(r#"{"access_token":"abc"}"#);
        let Ok(parsed) = parsed else {
            unreachable!("minimal token payload must parse")
        };
        assert_eq!(parsed.access_token, "abc");
        assert!(parsed.refresh_token.is_none());
    }

    #[test]
    fn token_response_accepts_full_payload() {
        let parsed: Result<TokenResponse, _> = serde_json::from_value(serde_json::json!({
            "access_token": "abc",
            "refresh_token": "def",
            "expires_in": 300,
            "refresh_expires_in": 1800,
            "token_type": "Bearer",
            "session_state": "s-1",
            "scope": "openid profile"
        }));
        let Ok(parsed) = parsed else {
            unreachable!("full token payload must parse")
        };
        assert_eq!(parsed.expires_in, Some(300));
        assert_eq!(parsed.token_type.as_deref(), Some("Bearer"));
    }
}
