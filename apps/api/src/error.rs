use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use idgate_core::GatewayError;
use serde::Serialize;

/// API error payload: a human-readable message plus the provider's own
/// error body when one was captured.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

/// HTTP API error wrapper around classified gateway errors.
#[derive(Debug)]
pub struct ApiError(pub GatewayError);

impl From<GatewayError> for ApiError {
    fn from(value: GatewayError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Workflow failures echo the provider's status when one was
        // received; otherwise they fall back to a gateway-side class.
        let provider_status = self
            .0
            .fault()
            .and_then(|fault| fault.status)
            .and_then(|status| StatusCode::from_u16(status).ok())
            .filter(|status| status.is_client_error() || status.is_server_error());

        let status = match &self.0 {
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::ClientNotFound(_) | GatewayError::UserNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            GatewayError::AuthenticationFailed { .. } => {
                provider_status.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            GatewayError::UpstreamAuthFailure { .. } => StatusCode::BAD_GATEWAY,
            GatewayError::RegistrationFailed { .. }
            | GatewayError::RoleCreationFailed { .. }
            | GatewayError::RoleAssignmentFailed { .. } => {
                provider_status.unwrap_or(StatusCode::BAD_GATEWAY)
            }
            GatewayError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        let details = self.0.fault().and_then(|fault| fault.body.clone());
        let payload = Json(ErrorResponse {
            message: self.0.to_string(),
            details,
        });

        (status, payload).into_response()
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;
