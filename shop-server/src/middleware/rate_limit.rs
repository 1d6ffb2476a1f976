//! Per-client fixed-window rate limiting
//!
//! Two scopes share one [`RateLimiter`]: `api` covers every route, `auth`
//! additionally covers `/login` and `/register` with a much lower limit.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderValue, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use shared::AppError;
use tokio::time::Instant;

use crate::core::ServerState;
use crate::security_log;

#[derive(Debug)]
struct Window {
    count: u32,
    started: Instant,
}

/// Rate limit scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Api,
    Auth,
}

impl Scope {
    fn as_str(&self) -> &'static str {
        match self {
            Scope::Api => "api",
            Scope::Auth => "auth",
        }
    }
}

#[derive(Debug)]
pub struct RateLimiter {
    window: Duration,
    api_limit: u32,
    auth_limit: u32,
    /// (scope, client) -> window
    entries: DashMap<(Scope, String), Window>,
}

impl RateLimiter {
    pub fn new(window: Duration, api_limit: u32, auth_limit: u32) -> Self {
        Self {
            window,
            api_limit,
            auth_limit,
            entries: DashMap::new(),
        }
    }

    fn limit(&self, scope: Scope) -> u32 {
        match scope {
            Scope::Api => self.api_limit,
            Scope::Auth => self.auth_limit,
        }
    }

    /// Count one request; `Err(retry_after)` once the window is used up
    pub fn check(&self, scope: Scope, client: &str) -> Result<(), Duration> {
        let now = Instant::now();
        let mut entry = self
            .entries
            .entry((scope, client.to_owned()))
            .or_insert_with(|| Window {
                count: 0,
                started: now,
            });

        // Reset window if expired
        if now.duration_since(entry.started) >= self.window {
            entry.count = 0;
            entry.started = now;
        }

        if entry.count >= self.limit(scope) {
            return Err(self.window.saturating_sub(now.duration_since(entry.started)));
        }
        entry.count += 1;
        Ok(())
    }

    /// Drop windows that have expired
    pub fn cleanup(&self) {
        let now = Instant::now();
        self.entries
            .retain(|_, w| now.duration_since(w.started) < self.window);
    }

    pub fn tracked_clients(&self) -> usize {
        self.entries.len()
    }
}

/// Client identity: first `X-Forwarded-For` entry, then the peer address
fn extract_ip(request: &Request) -> String {
    if let Some(forwarded) = request.headers().get("x-forwarded-for")
        && let Ok(val) = forwarded.to_str()
        && let Some(first) = val.split(',').next()
    {
        let ip = first.trim();
        if !ip.is_empty() {
            return ip.to_owned();
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_owned())
}

fn too_many_requests(message: &str, retry_after: Duration) -> Response {
    let mut response = AppError::too_many_requests(message).into_response();
    let secs = retry_after.as_secs().max(1);
    if let Ok(value) = HeaderValue::from_str(&secs.to_string()) {
        response.headers_mut().insert(header::RETRY_AFTER, value);
    }
    response
}

async fn limit(
    scope: Scope,
    message: &str,
    state: &ServerState,
    request: Request,
    next: Next,
) -> Response {
    let ip = extract_ip(&request);
    if let Err(retry_after) = state.rate_limiter.check(scope, &ip) {
        security_log!(
            "WARN",
            "rate_limited",
            scope = scope.as_str(),
            client = ip.clone(),
            path = request.uri().path().to_string()
        );
        return too_many_requests(message, retry_after);
    }
    next.run(request).await
}

/// General limit, applied to every route
pub async fn api_rate_limit(
    State(state): State<ServerState>,
    request: Request,
    next: Next,
) -> Response {
    limit(Scope::Api, "Please try again later", &state, request, next).await
}

/// Stricter limit for `/login` and `/register`
pub async fn auth_rate_limit(
    State(state): State<ServerState>,
    request: Request,
    next: Next,
) -> Response {
    limit(
        Scope::Auth,
        "Too many authentication attempts, please try again later",
        &state,
        request,
        next,
    )
    .await
}
