//! User API 模块
//!
//! 所有路由需要认证，且只能访问自己的数据 (管理员除外)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/users/{username}",
            get(handler::get_by_username).patch(handler::update),
        )
        .route("/users/{username}/orders", get(handler::list_orders))
}
