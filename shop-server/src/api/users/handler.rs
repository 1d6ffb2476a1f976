//! User API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::UserUpdate;
use shared::response::{OrderListResponse, UserMutationResponse, UserResponse};

use crate::api::{AppJson, AppResult};
use crate::auth::CurrentUser;
use crate::core::ServerState;

/// GET /users/:username - 获取用户资料
pub async fn get_by_username(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(username): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let user = state.accounts.profile(&current_user, &username)?;
    Ok(Json(UserResponse::new(user)))
}

/// PATCH /users/:username - 更新用户资料
pub async fn update(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(username): Path<String>,
    AppJson(payload): AppJson<UserUpdate>,
) -> AppResult<Json<UserMutationResponse>> {
    let user = state.accounts.update(&current_user, &username, payload)?;
    Ok(Json(UserMutationResponse::new("User updated successfully", user)))
}

/// GET /users/:username/orders - 某用户的全部订单
pub async fn list_orders(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(username): Path<String>,
) -> AppResult<Json<OrderListResponse>> {
    let orders = state.accounts.orders_of(&current_user, &username)?;
    Ok(Json(OrderListResponse::new(orders)))
}
