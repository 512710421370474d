//! 限流中间件
//!
//! 先只读检查封禁，再计数。拒绝时返回 403，`/health` 系列路由不受限。

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::error::AppError;
use std::net::SocketAddr;
use std::sync::Arc;

use super::blocker::IpBlocker;
use super::error::RateLimitError;

/// Client key: first `X-Forwarded-For` entry, then `X-Real-IP`, then peer address.
pub fn client_ip(request: &Request) -> String {
    let headers = request.headers();

    if let Some(forwarded) = headers.get("x-forwarded-for")
        && let Ok(val) = forwarded.to_str()
    {
        // X-Forwarded-For can be comma-separated; first entry is the original client
        if let Some(first) = val.split(',').next() {
            let ip = first.trim();
            if !ip.is_empty() {
                return ip.to_owned();
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip")
        && let Ok(val) = real_ip.to_str()
    {
        let ip = val.trim();
        if !ip.is_empty() {
            return ip.to_owned();
        }
    }

    // Fallback: peer address from extensions (ConnectInfo)
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_owned())
}

fn is_exempt(path: &str) -> bool {
    path == "/health" || path.starts_with("/health/")
}

pub async fn rate_limit(
    State(blocker): State<Arc<IpBlocker>>,
    request: Request,
    next: Next,
) -> Response {
    if is_exempt(request.uri().path()) {
        return next.run(request).await;
    }

    let ip = client_ip(&request);

    if let Some(notice) = blocker.block_notice(&ip) {
        tracing::debug!(client_ip = %ip, "Rejected request from blocked client");
        return AppError::from(notice).into_response();
    }

    if let Err(err) = blocker.increment_and_check(&ip) {
        match &err {
            RateLimitError::Banned { duration } => {
                tracing::warn!(
                    client_ip = %ip,
                    block_secs = duration.as_secs(),
                    "Client banned for excessive requests"
                );
            }
            RateLimitError::Blocked { .. } => {
                tracing::debug!(client_ip = %ip, "Rejected request from blocked client");
            }
        }
        return AppError::from(err).into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request(headers: &[(&str, &str)]) -> Request {
        let mut builder = http::Request::builder().uri("/v1/stores/a/menu");
        for (k, v) in headers {
            builder = builder.header(*k, *v);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_client_ip_precedence() {
        let req = request(&[
            ("x-forwarded-for", "203.0.113.7, 10.0.0.1"),
            ("x-real-ip", "198.51.100.2"),
        ]);
        assert_eq!(client_ip(&req), "203.0.113.7");

        let req = request(&[("x-real-ip", "198.51.100.2")]);
        assert_eq!(client_ip(&req), "198.51.100.2");

        let req = request(&[("x-forwarded-for", " ")]);
        assert_eq!(client_ip(&req), "unknown");
    }

    #[test]
    fn test_client_ip_from_connect_info() {
        let mut req = request(&[]);
        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 168, 1, 20], 51000))));
        assert_eq!(client_ip(&req), "192.168.1.20");
    }

    #[test]
    fn test_health_is_exempt() {
        assert!(is_exempt("/health"));
        assert!(is_exempt("/health/detailed"));
        assert!(!is_exempt("/healthz"));
        assert!(!is_exempt("/v1/stores/a/orders"));
    }
}
