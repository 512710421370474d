//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::StoreNotFound | Self::OrderNotFound | Self::MenuItemNotFound => {
                StatusCode::NOT_FOUND
            }

            // 409 Conflict
            Self::StoreAlreadyExists | Self::OrderAlreadyExists => StatusCode::CONFLICT,

            // 403 Forbidden
            Self::IpBlocked | Self::RateLimited => StatusCode::FORBIDDEN,

            // 408 Request Timeout
            Self::TimeoutError => StatusCode::REQUEST_TIMEOUT,

            // 500 Internal Server Error
            Self::InternalError | Self::OrderEvictionFailed => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request
            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::OrderNotPending
            | Self::OrderNotWaitingPickup
            | Self::InvalidOrderId => StatusCode::BAD_REQUEST,
        }
    }
}
