//! Authentication Handlers
//!
//! Handles registration and login

use axum::{Json, extract::State, http::StatusCode};
use shared::client::{LoginRequest, LoginResponse};
use shared::models::RegisterRequest;
use shared::response::UserMutationResponse;

use crate::api::{AppJson, AppResult};
use crate::core::ServerState;

/// POST /register - 注册新用户 (角色固定为 user)
pub async fn register(
    State(state): State<ServerState>,
    AppJson(req): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserMutationResponse>)> {
    let user = state.accounts.register(req)?;
    Ok((
        StatusCode::CREATED,
        Json(UserMutationResponse::new("User registered successfully", user)),
    ))
}

/// POST /login - 校验凭证并签发 JWT
pub async fn login(
    State(state): State<ServerState>,
    AppJson(req): AppJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let response = state.accounts.login(req).await?;
    Ok(Json(response))
}
