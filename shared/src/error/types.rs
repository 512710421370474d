//! Error types and API response structures

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the error type every HTTP handler returns, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details for debugging
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }
}

/// Unified API error body
///
/// Every failed request answers with the same shape:
/// - `code`: Error code
/// - `message`: Human-readable message
/// - `details`: Additional error details (optional)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl ApiResponse {
    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            code: err.code,
            message: err.message.clone(),
            details: err.details.clone(),
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ApiResponse::error(&self);

        // Log system errors
        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::StoreNotFound);
        assert_eq!(err.code, ErrorCode::StoreNotFound);
        assert_eq!(err.message, "Store not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::new(ErrorCode::OrderNotFound)
            .with_detail("order_id", "store-a-3")
            .with_detail("store_id", "store-a");

        let details = err.details.unwrap();
        assert_eq!(details.get("order_id").unwrap(), "store-a-3");
        assert_eq!(details.get("store_id").unwrap(), "store-a");
    }

    #[test]
    fn test_app_error_http_status() {
        assert_eq!(
            AppError::new(ErrorCode::OrderNotFound).http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::new(ErrorCode::IpBlocked).http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::validation("menu_item_id must not be empty").http_status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_app_error_convenience_constructors() {
        let err = AppError::invalid_request("malformed body");
        assert_eq!(err.code, ErrorCode::InvalidRequest);
        assert_eq!(err.message, "malformed body");

        let err = AppError::internal("boom");
        assert_eq!(err.code, ErrorCode::InternalError);
        assert_eq!(err.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::new(ErrorCode::OrderNotPending);
        assert_eq!(format!("{}", err), "order status is not pending");
    }

    #[test]
    fn test_api_response_error() {
        let err = AppError::new(ErrorCode::RateLimited).with_detail("client", "10.0.0.1");
        let response = ApiResponse::error(&err);

        assert_eq!(response.code, ErrorCode::RateLimited);
        assert_eq!(response.message, "Rate limit exceeded");
        assert!(response.details.is_some());
    }

    #[test]
    fn test_api_response_serialize() {
        let response = ApiResponse::error(&AppError::new(ErrorCode::TimeoutError));
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"code\":9003"));
        assert!(json.contains("\"message\":\"Request timed out\""));
        assert!(!json.contains("details"));

        let parsed: ApiResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.code, ErrorCode::TimeoutError);
    }
}
