//! Shared types for the kiosk service
//!
//! Domain models (stores, orders, menu items) and the unified error
//! system used by the server and by API clients.

pub mod error;
pub mod models;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{MenuItem, Order, OrderStatus, Store};
