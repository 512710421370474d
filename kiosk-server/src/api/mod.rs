//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`menu`] - 门店菜单
//! - [`orders`] - 门店订单
//!
//! # 中间件 (由外到内)
//!
//! 请求日志 → 限流 → CORS → 超时 (408 统一为 `TimeoutError` 错误体)

pub mod health;
pub mod menu;
pub mod orders;

use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Router, middleware};
use shared::error::{AppError, ErrorCode};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;

use crate::core::ServerState;
use crate::middleware::logging_middleware;
use crate::ratelimit::middleware::rate_limit;

/// CORS 预检缓存时间
const CORS_MAX_AGE: Duration = Duration::from_secs(86_400);

/// Build the Axum router with state and the full middleware stack
pub fn build_app(state: ServerState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(CORS_MAX_AGE);

    let timeout = state.config.request_timeout();
    let blocker = state.blocker.clone();

    let app = Router::<ServerState>::new()
        .merge(health::router())
        .merge(menu::router())
        .merge(orders::router())
        .with_state(state);

    with_timeout(app, timeout)
        .layer(cors)
        .layer(middleware::from_fn_with_state(blocker, rate_limit))
        .layer(middleware::from_fn(logging_middleware))
}

/// 超时层: 超时返回统一的 `TimeoutError` 错误体
fn with_timeout(app: Router, timeout: Duration) -> Router {
    app.layer(TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        timeout,
    ))
    .layer(middleware::map_response(timeout_body))
}

async fn timeout_body(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        return AppError::new(ErrorCode::TimeoutError).into_response();
    }
    response
}
