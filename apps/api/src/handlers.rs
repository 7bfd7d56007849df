use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use idgate_domain::{AssignRoleResult, CreateRoleResult, RegisterResult, TokenResponse};

use crate::dto::{AssignRoleDto, CreateRoleDto, LoginDto, RegisterDto};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginDto>,
) -> ApiResult<Json<TokenResponse>> {
    let request = payload.into_domain()?;
    let tokens = state.gateway.authenticate(&request).await?;

    Ok(Json(tokens))
}

pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterDto>,
) -> ApiResult<(StatusCode, Json<RegisterResult>)> {
    let request = payload.into_domain()?;
    let result = state.gateway.register(&request).await?;

    Ok((StatusCode::CREATED, Json(result)))
}

pub async fn create_role_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateRoleDto>,
) -> ApiResult<(StatusCode, Json<CreateRoleResult>)> {
    let request = payload.into_domain()?;
    let result = state.gateway.create_role(&request).await?;

    Ok((StatusCode::CREATED, Json(result)))
}

pub async fn assign_role_handler(
    State(state): State<AppState>,
    Json(payload): Json<AssignRoleDto>,
) -> ApiResult<Json<AssignRoleResult>> {
    let request = payload.into_domain()?;
    let result = state.gateway.assign_role(&request).await?;

    Ok(Json(result))
}

pub async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}
