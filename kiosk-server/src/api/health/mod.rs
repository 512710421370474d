//! 健康检查路由
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 | 限流 |
//! |------|------|------|------|
//! | /health | GET | 简单健康检查 | 无 |
//! | /health/detailed | GET | 详细健康检查 | 无 |
//!
//! # 响应示例
//!
//! ```json
//! {
//!   "status": "healthy",
//!   "service": "kiosk-server",
//!   "version": "0.1.0"
//! }
//! ```

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use std::time::SystemTime;

use crate::core::ServerState;

/// 健康检查路由
pub fn router() -> Router<ServerState> {
    // 以路由构建时间作为启动时间
    START_TIME.get_or_init(SystemTime::now);

    Router::new()
        .route("/health", get(health))
        .route("/health/detailed", get(detailed_health))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DetailedHealthResponse {
    status: &'static str,
    version: &'static str,
    /// 运行时间 (秒)
    uptime_seconds: u64,
    stores: Vec<StoreHealth>,
    /// 当前处于封禁中的客户端数量
    blocked_clients: usize,
}

#[derive(Debug, Serialize)]
pub struct StoreHealth {
    id: String,
    capacity: usize,
    orders: usize,
    last_order_number: u64,
}

static START_TIME: std::sync::OnceLock<SystemTime> = std::sync::OnceLock::new();

fn get_uptime_seconds() -> u64 {
    let start = START_TIME.get_or_init(SystemTime::now);
    SystemTime::now()
        .duration_since(*start)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /health/detailed
pub async fn detailed_health(State(state): State<ServerState>) -> Json<DetailedHealthResponse> {
    let registry = state.registry();
    let stores = registry
        .stores()
        .into_iter()
        .filter_map(|store| registry.ledger(&store.id).ok())
        .map(|ledger| StoreHealth {
            id: ledger.store().id.clone(),
            capacity: ledger.capacity(),
            orders: ledger.count(),
            last_order_number: ledger.last_order_number(),
        })
        .collect();

    Json(DetailedHealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: get_uptime_seconds(),
        stores,
        blocked_clients: state.blocker.blocked_keys().len(),
    })
}
