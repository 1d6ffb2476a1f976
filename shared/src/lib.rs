//! Shared types for the shop service
//!
//! Domain models, request payloads, response envelopes and the unified
//! error system used by `shop-server` and by any client talking to it.

pub mod client;
pub mod error;
pub mod models;
pub mod response;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
