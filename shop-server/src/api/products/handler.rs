//! Product API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::{ProductCreate, ProductSearchQuery, ProductUpdate};
use shared::response::{ProductListResponse, ProductMutationResponse, ProductSearchResponse};

use crate::api::{AppJson, AppQuery, AppResult};
use crate::auth::AdminUser;
use crate::core::ServerState;

/// GET /products - 获取所有商品
pub async fn list(State(state): State<ServerState>) -> Json<ProductListResponse> {
    Json(ProductListResponse::new(state.catalog.list()))
}

/// GET /products/search?q= - 按名称或分类搜索
pub async fn search(
    State(state): State<ServerState>,
    AppQuery(query): AppQuery<ProductSearchQuery>,
) -> AppResult<Json<ProductSearchResponse>> {
    let products = state.catalog.search(&query)?;
    Ok(Json(ProductSearchResponse::new(query.q, products)))
}

/// POST /products - 创建商品 (管理员)
pub async fn create(
    State(state): State<ServerState>,
    AdminUser(admin): AdminUser,
    AppJson(payload): AppJson<ProductCreate>,
) -> AppResult<(StatusCode, Json<ProductMutationResponse>)> {
    let product = state.catalog.create(payload)?;
    tracing::debug!(admin = %admin.username, product_id = %product.id, "Product created by admin");
    Ok((
        StatusCode::CREATED,
        Json(ProductMutationResponse::new(
            "Product created successfully",
            product,
        )),
    ))
}

/// PATCH /products/:id - 部分更新商品 (管理员)
pub async fn update(
    State(state): State<ServerState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<String>,
    AppJson(payload): AppJson<ProductUpdate>,
) -> AppResult<Json<ProductMutationResponse>> {
    let product = state.catalog.update(&id, payload)?;
    Ok(Json(ProductMutationResponse::new(
        "Product updated successfully",
        product,
    )))
}

/// DELETE /products/:id - 删除商品并返回被删除的记录 (管理员)
pub async fn delete(
    State(state): State<ServerState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<String>,
) -> AppResult<Json<ProductMutationResponse>> {
    let product = state.catalog.delete(&id)?;
    Ok(Json(ProductMutationResponse::new(
        "Product deleted successfully",
        product,
    )))
}
