//! Product API 模块
//!
//! 读取公开，写入需要管理员

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/products", get(handler::list).post(handler::create))
        .route("/products/search", get(handler::search))
        .route(
            "/products/{id}",
            patch(handler::update).delete(handler::delete),
        )
}
