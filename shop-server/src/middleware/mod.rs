//! HTTP 中间件
//!
//! - [`logging_middleware`] - 请求日志
//! - [`api_rate_limit`] / [`auth_rate_limit`] - 按客户端限流

pub mod logging;
pub mod rate_limit;

pub use logging::logging_middleware;
pub use rate_limit::{RateLimiter, Scope, api_rate_limit, auth_rate_limit};
