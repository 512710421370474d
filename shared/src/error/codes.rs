//! Unified error codes for the kiosk service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 2xxx: Access errors (rate limiting, bans)
//! - 3xxx: Store errors
//! - 4xxx: Order errors
//! - 6xxx: Menu errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 2xxx: Access ====================
    /// Client key is currently banned
    IpBlocked = 2001,
    /// Client key just crossed the request threshold
    RateLimited = 2002,

    // ==================== 3xxx: Store ====================
    /// Store not found
    StoreNotFound = 3001,
    /// Store registered twice
    StoreAlreadyExists = 3002,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order id already present in the ledger
    OrderAlreadyExists = 4002,
    /// Order is not pending
    OrderNotPending = 4003,
    /// Order is not waiting for pickup
    OrderNotWaitingPickup = 4004,
    /// Order id does not belong to the store
    InvalidOrderId = 4005,
    /// Oldest order could not be evicted
    OrderEvictionFailed = 4006,

    // ==================== 6xxx: Menu ====================
    /// Menu item not found
    MenuItemNotFound = 6001,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Request timed out
    TimeoutError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::InvalidRequest => "Invalid request",

            // Access
            ErrorCode::IpBlocked => "Your IP address is blocked",
            ErrorCode::RateLimited => "Rate limit exceeded",

            // Store
            ErrorCode::StoreNotFound => "Store not found",
            ErrorCode::StoreAlreadyExists => "Store already exists",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderAlreadyExists => "Order already exists",
            ErrorCode::OrderNotPending => "order status is not pending",
            ErrorCode::OrderNotWaitingPickup => "order status is not waiting pickup",
            ErrorCode::InvalidOrderId => "Invalid order ID format",
            ErrorCode::OrderEvictionFailed => "Failed to evict oldest order",

            // Menu
            ErrorCode::MenuItemNotFound => "Menu item not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::TimeoutError => "Request timed out",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            5 => Ok(ErrorCode::InvalidRequest),

            // Access
            2001 => Ok(ErrorCode::IpBlocked),
            2002 => Ok(ErrorCode::RateLimited),

            // Store
            3001 => Ok(ErrorCode::StoreNotFound),
            3002 => Ok(ErrorCode::StoreAlreadyExists),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderAlreadyExists),
            4003 => Ok(ErrorCode::OrderNotPending),
            4004 => Ok(ErrorCode::OrderNotWaitingPickup),
            4005 => Ok(ErrorCode::InvalidOrderId),
            4006 => Ok(ErrorCode::OrderEvictionFailed),

            // Menu
            6001 => Ok(ErrorCode::MenuItemNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9003 => Ok(ErrorCode::TimeoutError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::IpBlocked.code(), 2001);
        assert_eq!(ErrorCode::StoreNotFound.code(), 3001);
        assert_eq!(ErrorCode::OrderNotFound.code(), 4001);
        assert_eq!(ErrorCode::MenuItemNotFound.code(), 6001);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
        assert_eq!(ErrorCode::TimeoutError.code(), 9003);
    }

    #[test]
    fn test_transition_messages() {
        assert_eq!(
            ErrorCode::OrderNotPending.message(),
            "order status is not pending"
        );
        assert_eq!(
            ErrorCode::OrderNotWaitingPickup.message(),
            "order status is not waiting pickup"
        );
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(0), Err(InvalidErrorCode(0)));
        assert_eq!(ErrorCode::try_from(9002), Err(InvalidErrorCode(9002)));
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(1001), Err(InvalidErrorCode(1001)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::OrderNotPending).unwrap();
        assert_eq!(json, "4003");

        let code: ErrorCode = serde_json::from_str("2002").unwrap();
        assert_eq!(code, ErrorCode::RateLimited);
    }

    #[test]
    fn test_invalid_error_code_display() {
        let err = InvalidErrorCode(999);
        assert_eq!(format!("{}", err), "invalid error code: 999");
    }
}
