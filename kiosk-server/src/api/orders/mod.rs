//! Order API Module
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /v1/stores/{store_id}/orders | POST | 下单 (201) |
//! | /v1/stores/{store_id}/orders | GET | 订单列表 (按订单号升序) |
//! | /v1/stores/{store_id}/orders/{order_id} | GET | 订单详情 |
//! | /v1/stores/{store_id}/orders/{order_id}/waiting-pickup | POST | 制作完成，等待取餐 |
//! | /v1/stores/{store_id}/orders/{order_id}/complete | POST | 已取餐 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub use handler::{CreateOrderRequest, OrderListResponse};

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/v1/stores/{store_id}/orders",
            get(handler::list).post(handler::create),
        )
        .route(
            "/v1/stores/{store_id}/orders/{order_id}",
            get(handler::get_by_id),
        )
        .route(
            "/v1/stores/{store_id}/orders/{order_id}/waiting-pickup",
            post(handler::mark_waiting_pickup),
        )
        .route(
            "/v1/stores/{store_id}/orders/{order_id}/complete",
            post(handler::complete),
        )
}
