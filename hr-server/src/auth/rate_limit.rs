//! Per-IP fixed-window rate limiting for the public auth routes

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::error::{AppError, ErrorCode};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::state::AppState;

/// Entries idle longer than this are dropped by [`RateLimiter::cleanup`].
pub const CLEANUP_AFTER: Duration = Duration::from_secs(300);

struct Window {
    count: u32,
    started: Instant,
}

/// Route-scoped request counters keyed by client IP.
#[derive(Clone, Default)]
pub struct RateLimiter {
    inner: Arc<Mutex<HashMap<&'static str, HashMap<String, Window>>>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` if the request fits in the current window.
    pub async fn check(&self, route: &'static str, ip: &str, max: u32, window: Duration) -> bool {
        let mut routes = self.inner.lock().await;
        let now = Instant::now();
        let entry = routes
            .entry(route)
            .or_default()
            .entry(ip.to_owned())
            .or_insert_with(|| Window {
                count: 0,
                started: now,
            });

        if now.duration_since(entry.started) >= window {
            entry.count = 0;
            entry.started = now;
        }

        entry.count += 1;
        entry.count <= max
    }

    pub async fn cleanup(&self) {
        let mut routes = self.inner.lock().await;
        let now = Instant::now();
        for ips in routes.values_mut() {
            ips.retain(|_, w| now.duration_since(w.started) < CLEANUP_AFTER);
        }
        routes.retain(|_, ips| !ips.is_empty());
    }

    #[cfg(test)]
    async fn tracked(&self) -> usize {
        self.inner.lock().await.values().map(HashMap::len).sum()
    }
}

/// First X-Forwarded-For hop, else the peer address.
fn client_ip(request: &Request) -> String {
    if let Some(first) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
    {
        return first.to_owned();
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_owned())
}

async fn limit(
    state: &AppState,
    route: &'static str,
    max: u32,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    let ip = client_ip(&request);
    if !state
        .rate_limiter
        .check(route, &ip, max, Duration::from_secs(60))
        .await
    {
        tracing::warn!(route, ip = %ip, "Rate limit exceeded");
        return Err(AppError::new(ErrorCode::TooManyRequests).into_response());
    }
    Ok(next.run(request).await)
}

/// Login: 5 requests/minute per IP
pub async fn login_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    limit(&state, "login", 5, request, next).await
}

/// Register: 3 requests/minute per IP
pub async fn register_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    limit(&state, "register", 3, request, next).await
}
