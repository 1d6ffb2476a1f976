//! Authentication Routes

mod handler;

use axum::{Router, middleware, routing::post};

use crate::core::ServerState;
use crate::middleware::auth_rate_limit;

/// Build authentication router
///
/// Both routes are public and sit behind the stricter auth rate limit.
pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .route("/login", post(handler::login))
        .route("/register", post(handler::register))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_rate_limit))
}
