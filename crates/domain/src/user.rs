use serde::{Deserialize, Serialize};

/// A credential attached to a new user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCredential {
    /// Credential type, typically `password`.
    #[serde(rename = "type")]
    pub credential_type: String,
    /// Credential value.
    pub value: String,
    /// Whether the provider must force a reset on first use.
    pub temporary: bool,
}

/// User registration payload, submitted to the provider's user-creation
/// endpoint as-is (the provider expects camelCase field names).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Unique username within the realm.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Whether the account is enabled at creation.
    pub enabled: bool,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Ordered credential list; order is preserved on the wire.
    pub credentials: Vec<UserCredential>,
}

/// User record mirrored from the provider.
///
/// The provider owns this shape; fields it omits stay `None` and fields it
/// adds are dropped on parse without failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Opaque user identifier assigned by the provider.
    pub id: String,
    /// Username within the realm.
    pub username: String,
    /// Email address, when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Whether the account is enabled.
    #[serde(default)]
    pub enabled: bool,
    /// Given name, when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name, when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Whether the provider considers the email verified.
    #[serde(default)]
    pub email_verified: bool,
}

/// Outcome of a registration workflow.
///
/// `user_id` is always derived from the provider's creation response. When
/// the provider confirms creation without a `Location` header the result
/// carries the raw location (none) and no resolved record instead of
/// failing the operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResult {
    /// Human-readable outcome message.
    pub message: String,
    /// HTTP status the provider answered the creation call with.
    pub status: u16,
    /// New user identifier, extracted from the `Location` response header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Raw `Location` header, kept when no identifier could be extracted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Fully resolved user record, present when the identifier was known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRecord>,
}

#[cfg(test)]
mod tests {
    use super::{RegisterRequest, UserRecord};

    #[test]
    fn register_request_serializes_provider_field_names() {
        let request = RegisterRequest {
            username: "alice".to_owned(),
            email: "alice@example.com".to_owned(),
            enabled: true,
            first_name: "Alice".to_owned(),
            last_name: "A".to_owned(),
            credentials: vec![super::UserCredential {
                credential_type: "password".to_owned(),
                value: "secret123".to_owned(),
                temporary: false,
            }],
        };

        let value = serde_json::to_value(&request).unwrap_or_default();
        assert_eq!(value["firstName"], "Alice");
        assert_eq!(value["credentials"][0]["type"], "password");
        assert_eq!(value["credentials"][0]["temporary"], false);
    }

    #[test]
    fn user_record_tolerates_extra_provider_fields() {
        let parsed: Result<UserRecord, _> = serde_json::from_value(serde_json::json!({
            "id": "abc-123",
            "username": "alice",
            "enabled": true,
            "createdTimestamp": 1_700_000_000_000_i64,
            "access": {"manage": true}
        }));
        let Ok(parsed) = parsed else {
            unreachable!("provider user payload must parse")
        };
        assert_eq!(parsed.id, "abc-123");
        assert!(parsed.email.is_none());
    }
}
