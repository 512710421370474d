//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use shared::models::Order;

use crate::core::ServerState;
use crate::utils::validation::{MAX_ID_LEN, validate_required_text};

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub menu_item_id: String,
}

#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub orders: Vec<Order>,
}

/// POST /v1/stores/{store_id}/orders
pub async fn create(
    State(state): State<ServerState>,
    Path(store_id): Path<String>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Order>)> {
    state.registry().store(&store_id)?;

    let Json(req) = payload.map_err(|e| {
        AppError::invalid_request("Invalid request body").with_detail("reason", e.body_text())
    })?;
    validate_required_text(&req.menu_item_id, "menu_item_id", MAX_ID_LEN)?;

    let order = state.orders.create_order(&store_id, &req.menu_item_id)?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /v1/stores/{store_id}/orders
pub async fn list(
    State(state): State<ServerState>,
    Path(store_id): Path<String>,
) -> AppResult<Json<OrderListResponse>> {
    let orders = state.orders.list_orders(&store_id)?;
    tracing::debug!(store_id = %store_id, count = orders.len(), "Listed orders");
    Ok(Json(OrderListResponse { orders }))
}

/// GET /v1/stores/{store_id}/orders/{order_id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path((store_id, order_id)): Path<(String, String)>,
) -> AppResult<Json<Order>> {
    let order = state.orders.get_order(&store_id, &order_id)?;
    Ok(Json(order))
}

/// POST /v1/stores/{store_id}/orders/{order_id}/waiting-pickup
pub async fn mark_waiting_pickup(
    State(state): State<ServerState>,
    Path((store_id, order_id)): Path<(String, String)>,
) -> AppResult<Json<Order>> {
    let order = state.orders.mark_waiting_pickup(&store_id, &order_id)?;
    Ok(Json(order))
}

/// POST /v1/stores/{store_id}/orders/{order_id}/complete
pub async fn complete(
    State(state): State<ServerState>,
    Path((store_id, order_id)): Path<(String, String)>,
) -> AppResult<Json<Order>> {
    let order = state.orders.complete_order(&store_id, &order_id)?;
    Ok(Json(order))
}
