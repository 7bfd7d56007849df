//! Wire-level request payloads and their validation into domain types.
//!
//! Field names follow the contract the original frontend speaks: token
//! fields snake_case, user and role fields camelCase.

use serde::Deserialize;

use idgate_core::{GatewayError, GatewayResult, NonEmptyString};
use idgate_domain::{
    AssignRoleRequest, CreateRoleRequest, LoginRequest, RegisterRequest, UserCredential,
};

/// Incoming payload for end-user login.
#[derive(Debug, Deserialize)]
pub struct LoginDto {
    pub grant_type: String,
    pub client_id: String,
    pub username: String,
    pub password: String,
}

impl LoginDto {
    /// Validates required fields and builds the domain request.
    pub fn into_domain(self) -> GatewayResult<LoginRequest> {
        Ok(LoginRequest {
            grant_type: required("grant_type", self.grant_type)?,
            client_id: required("client_id", self.client_id)?,
            username: required("username", self.username)?,
            password: required("password", self.password)?,
        })
    }
}

/// A credential entry in a registration payload.
#[derive(Debug, Deserialize)]
pub struct CredentialDto {
    #[serde(rename = "type")]
    pub credential_type: String,
    pub value: String,
    pub temporary: bool,
}

/// Incoming payload for user registration.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDto {
    pub username: String,
    pub email: String,
    pub enabled: bool,
    pub first_name: String,
    pub last_name: String,
    pub credentials: Vec<CredentialDto>,
}

impl RegisterDto {
    /// Validates required fields and builds the domain request.
    pub fn into_domain(self) -> GatewayResult<RegisterRequest> {
        let email = required("email", self.email)?;
        if !email.contains('@') {
            return Err(GatewayError::Validation(
                "email must be a valid email address".to_owned(),
            ));
        }

        let credentials = self
            .credentials
            .into_iter()
            .map(|credential| {
                Ok(UserCredential {
                    credential_type: required("credentials.type", credential.credential_type)?,
                    value: required("credentials.value", credential.value)?,
                    temporary: credential.temporary,
                })
            })
            .collect::<GatewayResult<Vec<_>>>()?;

        Ok(RegisterRequest {
            username: required("username", self.username)?,
            email,
            enabled: self.enabled,
            first_name: required("firstName", self.first_name)?,
            last_name: required("lastName", self.last_name)?,
            credentials,
        })
    }
}

/// Incoming payload for client-scoped role creation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoleDto {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub client_id: String,
}

impl CreateRoleDto {
    /// Validates required fields and builds the domain request.
    pub fn into_domain(self) -> GatewayResult<CreateRoleRequest> {
        Ok(CreateRoleRequest {
            name: required("name", self.name)?,
            description: self.description,
            client_id: required("clientId", self.client_id)?,
        })
    }
}

/// Incoming payload for role assignment.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRoleDto {
    pub username: String,
    pub role_name: String,
    pub client_id: String,
}

impl AssignRoleDto {
    /// Validates required fields and builds the domain request.
    pub fn into_domain(self) -> GatewayResult<AssignRoleRequest> {
        Ok(AssignRoleRequest {
            username: required("username", self.username)?,
            role_name: required("roleName", self.role_name)?,
            client_id: required("clientId", self.client_id)?,
        })
    }
}

fn required(field: &str, value: String) -> GatewayResult<String> {
    NonEmptyString::new(value)
        .map(String::from)
        .map_err(|_| GatewayError::Validation(format!("{field} is required")))
}

#[cfg(test)]
mod tests {
    use super::{AssignRoleDto, LoginDto, RegisterDto};

    #[test]
    fn login_dto_rejects_blank_username() {
        let dto = LoginDto {
            grant_type: "password".to_owned(),
            client_id: "admin-spa".to_owned(),
            username: "  ".to_owned(),
            password: "secret123".to_owned(),
        };
        assert!(dto.into_domain().is_err());
    }

    #[test]
    fn register_dto_rejects_malformed_email() {
        let dto = RegisterDto {
            username: "alice".to_owned(),
            email: "not-an-email".to_owned(),
            enabled: true,
            first_name: "Alice".to_owned(),
            last_name: "A".to_owned(),
            credentials: vec![],
        };
        assert!(dto.into_domain().is_err());
    }

    #[test]
    fn assign_role_dto_parses_camel_case_wire_names() {
        let parsed: Result<AssignRoleDto, _> = serde_json::from_value(serde_json::json!({
            "username": "alice",
            "roleName": "editor",
            "clientId": "admin-spa"
        }));
        let Ok(dto) = parsed else {
            unreachable!("camelCase payload must parse")
        };
        let Ok(request) = dto.into_domain() else {
            unreachable!("complete payload must validate")
        };
        assert_eq!(request.role_name, "editor");
    }
}
