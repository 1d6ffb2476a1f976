//! Order API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/orders", get(handler::list))
        .route("/orders/{id}", get(handler::get_by_id))
        .route("/checkout", post(handler::checkout))
}
