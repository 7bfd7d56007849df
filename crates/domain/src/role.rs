use serde::{Deserialize, Serialize};

/// Role record mirrored exactly from the provider.
///
/// The identity fields (`id`, `container_id`, flags) are never constructed
/// by the gateway; the provider's own representation is fetched fresh and
/// echoed back on assignment so the role signature always matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRecord {
    /// Opaque role identifier.
    pub id: String,
    /// Role name.
    pub name: String,
    /// Role description, when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the role is a composite of other roles.
    #[serde(default)]
    pub composite: bool,
    /// Whether the role is scoped to a client rather than the realm.
    #[serde(default)]
    pub client_role: bool,
    /// Identifier of the container owning the role (the client's internal id).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,
}

/// Request to create a role scoped to a named client application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoleRequest {
    /// Role name.
    pub name: String,
    /// Role description; defaults to empty when absent.
    #[serde(default)]
    pub description: Option<String>,
    /// Human-readable client identifier the role is scoped to.
    pub client_id: String,
}

/// Outcome of a role-creation workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoleResult {
    /// Human-readable outcome message.
    pub message: String,
    /// Canonical role record re-fetched from the provider after creation.
    pub role: RoleRecord,
}

/// Request to attach an existing client role to an existing user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRoleRequest {
    /// Username of the target user.
    pub username: String,
    /// Name of the role to assign.
    pub role_name: String,
    /// Human-readable client identifier the role belongs to.
    pub client_id: String,
}

/// Role reference echoed back in an assignment result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignedRole {
    /// Role name.
    pub name: String,
    /// Human-readable client identifier the role belongs to.
    pub client: String,
}

/// Outcome of a role-assignment workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRoleResult {
    /// Human-readable outcome message.
    pub message: String,
    /// Resolved identifier of the target user.
    pub user_id: String,
    /// Username of the target user.
    pub username: String,
    /// Role that was assigned.
    pub role: AssignedRole,
}

#[cfg(test)]
mod tests {
    use super::RoleRecord;

    #[test]
    fn role_record_mirrors_provider_representation() {
        let parsed: Result<RoleRecord, _> = serde_json::from_value(serde_json::json!({
            "id": "rid-1",
            "name": "editor",
            "composite": false,
            "clientRole": true,
            "containerId": "cid-1"
        }));
        let Ok(parsed) = parsed else {
            unreachable!("provider role payload must parse")
        };
        assert!(parsed.client_role);
        assert_eq!(parsed.container_id.as_deref(), Some("cid-1"));

        let value = serde_json::to_value(&parsed).unwrap_or_default();
        assert_eq!(value["clientRole"], true);
        assert_eq!(value["containerId"], "cid-1");
    }
}
