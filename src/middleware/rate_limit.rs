use axum::{
    Json,
    extract::{ConnectInfo, Request, State},
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::{net::SocketAddr, sync::Arc};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::api::dtos::ErrorResponse;

pub const RATE_LIMIT_MESSAGE: &str = "Rate limit exceeded";

/// Fixed-window request counter keyed by client IP.
#[derive(Clone)]
pub struct RateLimit {
    store: Arc<DashMap<String, RateLimitData>>,
    max_requests: u32,
    window_seconds: i64,
}

#[derive(Debug, Clone)]
struct RateLimitData {
    count: u32,
    window_start: DateTime<Utc>,
}

impl RateLimit {
    pub fn new(max_requests: u32, window_seconds: i64) -> Self {
        Self {
            store: Arc::new(DashMap::new()),
            max_requests,
            window_seconds,
        }
    }

    /// Count one request from `client` at `now`. Returns the seconds until the
    /// window resets when the request is over the limit.
    pub fn check(&self, client: &str, now: DateTime<Utc>) -> Result<(), i64> {
        let mut entry = self
            .store
            .entry(client.to_string())
            .or_insert_with(|| RateLimitData {
                count: 0,
                window_start: now,
            });
        let data = entry.value_mut();

        let window = Duration::seconds(self.window_seconds);
        if now.signed_duration_since(data.window_start) >= window {
            data.count = 0;
            data.window_start = now;
        }

        data.count += 1;
        if data.count > self.max_requests {
            let reset_in = (data.window_start + window - now).num_seconds().max(1);
            return Err(reset_in);
        }
        Ok(())
    }

    /// Drop clients whose window has ended by `now`. Returns how many were removed.
    pub fn prune(&self, now: DateTime<Utc>) -> usize {
        let window = Duration::seconds(self.window_seconds);
        let before = self.store.len();
        self.store
            .retain(|_, data| now.signed_duration_since(data.window_start) < window);
        before.saturating_sub(self.store.len())
    }

    /// Prune once per window for as long as the runtime lives.
    pub fn spawn_sweeper(&self) -> JoinHandle<()> {
        let limit = self.clone();
        let period = std::time::Duration::from_secs(self.window_seconds.max(1).unsigned_abs());
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let removed = limit.prune(Utc::now());
                if removed > 0 {
                    debug!(removed, remaining = limit.store.len(), "pruned rate limit windows");
                }
            }
        })
    }
}

/// IP-based rate limiting middleware.
pub async fn rate_limit_middleware(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(rate_limit): State<RateLimit>,
    req: Request,
    next: Next,
) -> Response {
    let ip = addr.ip().to_string();

    if let Err(retry_after) = rate_limit.check(&ip, Utc::now()) {
        warn!(%ip, retry_after, "rate limit exceeded");
        let mut response = (
            StatusCode::TOO_MANY_REQUESTS,
            Json(ErrorResponse {
                error: RATE_LIMIT_MESSAGE.to_string(),
            }),
        )
            .into_response();
        response
            .headers_mut()
            .insert("retry-after", HeaderValue::from(retry_after));
        return response;
    }

    next.run(req).await
}
