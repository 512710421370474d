//! Menu API
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /v1/stores/{store_id}/menu | GET | 菜单列表 |

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::Serialize;
use shared::error::AppResult;
use shared::models::MenuItem;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/v1/stores/{store_id}/menu", get(list))
}

#[derive(Debug, Serialize)]
pub struct MenuResponse {
    pub menu: Vec<MenuItem>,
}

/// GET /v1/stores/{store_id}/menu
pub async fn list(
    State(state): State<ServerState>,
    Path(store_id): Path<String>,
) -> AppResult<Json<MenuResponse>> {
    state.registry().store(&store_id)?;
    Ok(Json(MenuResponse {
        menu: state.menu().list().to_vec(),
    }))
}
