//! 健康检查路由
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /health | GET | 存活探针 | 无 |
//!
//! # 响应示例
//!
//! ```json
//! {
//!   "status": "OK",
//!   "timestamp": "2025-01-08T10:30:00Z",
//!   "version": "1.0.0"
//! }
//! ```

use axum::{Json, Router, routing::get};
use shared::response::HealthResponse;

use crate::core::ServerState;

/// 健康检查路由 - 公共路由 (无需认证)
pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok(env!("CARGO_PKG_VERSION")))
}
