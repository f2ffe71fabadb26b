use crate::routes::ApiMessage;
use axum::{
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::{
    collections::HashMap,
    net::{IpAddr, SocketAddr},
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

/// Map entries past this count trigger a sweep of expired windows on the
/// next acquisition.
const PRUNE_THRESHOLD: usize = 10_000;

/// Middleware enforcing the fixed-window limit ahead of every route.
pub async fn enforce<B>(
    State(limiter): State<Arc<FixedWindowLimiter>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request<B>,
    next: Next<B>,
) -> Response {
    if limiter.try_acquire(addr.ip()) {
        next.run(request).await
    } else {
        tracing::warn!(client_ip = %addr.ip(), "Rate limit exceeded");
        (
            StatusCode::TOO_MANY_REQUESTS,
            Json(ApiMessage::new(
                "Too many requests from this IP, please try again later.",
            )),
        )
            .into_response()
    }
}

/// IP-keyed fixed-window request limiter. The window map is the only piece
/// of state shared across requests in the whole application.
#[derive(Debug)]
pub struct FixedWindowLimiter {
    window: Duration,
    max_requests: u32,
    windows: Mutex<HashMap<IpAddr, Window>>,
}

#[derive(Debug)]
struct Window {
    started_at: Instant,
    count: u32,
}

impl FixedWindowLimiter {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Count one request from `ip` against its current window. Returns
    /// whether the request is allowed through.
    pub fn try_acquire(&self, ip: IpAddr) -> bool {
        self.try_acquire_at(ip, Instant::now())
    }

    fn try_acquire_at(&self, ip: IpAddr, now: Instant) -> bool {
        let mut windows = self.windows.lock().expect("rate limiter lock poisoned");

        if windows.len() > PRUNE_THRESHOLD {
            let window = self.window;
            windows.retain(|_, w| now.duration_since(w.started_at) < window);
        }

        let window = windows.entry(ip).or_insert(Window {
            started_at: now,
            count: 0,
        });

        if now.duration_since(window.started_at) >= self.window {
            window.started_at = now;
            window.count = 0;
        }

        if window.count >= self.max_requests {
            false
        } else {
            window.count += 1;
            true
        }
    }
}
