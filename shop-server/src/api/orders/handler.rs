//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::CheckoutRequest;
use shared::response::{CheckoutResponse, OrderListResponse, OrderResponse};

use crate::api::{AppError, AppJson, AppResult};
use crate::auth::{AdminUser, CurrentUser};
use crate::core::ServerState;

/// GET /orders - 所有订单 (管理员)
pub async fn list(
    State(state): State<ServerState>,
    AdminUser(admin): AdminUser,
) -> AppResult<Json<OrderListResponse>> {
    let orders = state.orders.list_all(&admin)?;
    Ok(Json(OrderListResponse::new(orders)))
}

/// GET /orders/:id - 单个订单 (所有者或管理员)
pub async fn get_by_id(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<OrderResponse>> {
    let order = state.orders.get(&current_user, &id)?;
    Ok(Json(OrderResponse::new(order)))
}

/// POST /checkout - 结账下单
pub async fn checkout(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    AppJson(req): AppJson<CheckoutRequest>,
) -> AppResult<(StatusCode, Json<CheckoutResponse>)> {
    let order = state.orders.checkout(&current_user, req).await?;
    let total = order
        .total()
        .ok_or_else(|| AppError::internal("Order total out of range"))?;
    Ok((StatusCode::CREATED, Json(CheckoutResponse::new(order, total))))
}
