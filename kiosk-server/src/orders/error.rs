use shared::error::{AppError, ErrorCode};
use shared::models::OrderStatus;
use thiserror::Error;

/// Order ledger / lifecycle errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("Store not found: {0}")]
    StoreUnknown(String),

    #[error("Store already registered: {0}")]
    StoreAlreadyRegistered(String),

    #[error("Store capacity must be positive: {0}")]
    InvalidCapacity(String),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Order already exists: {0}")]
    OrderAlreadyExists(String),

    #[error("{}", transition_message(.to))]
    InvalidTransition {
        order_id: String,
        from: OrderStatus,
        to: OrderStatus,
    },

    #[error("Menu item not found: {0}")]
    MenuItemNotFound(String),

    #[error("Invalid order ID format: {0}")]
    InvalidOrderId(String),

    #[error("Failed to evict oldest order: {0}")]
    EvictionFailed(String),
}

/// 转换失败的提示语，以目标状态区分
fn transition_message(to: &OrderStatus) -> &'static str {
    match to {
        OrderStatus::WaitingPickup => "order status is not pending",
        OrderStatus::Completed => "order status is not waiting pickup",
        OrderStatus::Pending => "order status cannot return to pending",
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        let message = err.to_string();
        match err {
            OrderError::StoreUnknown(id) => {
                AppError::with_message(ErrorCode::StoreNotFound, "Store not found")
                    .with_detail("store_id", id)
            }
            OrderError::StoreAlreadyRegistered(id) => {
                AppError::with_message(ErrorCode::StoreAlreadyExists, message)
                    .with_detail("store_id", id)
            }
            OrderError::InvalidCapacity(id) => {
                AppError::internal(message).with_detail("store_id", id)
            }
            OrderError::OrderNotFound(id) => {
                AppError::with_message(ErrorCode::OrderNotFound, "Order not found")
                    .with_detail("order_id", id)
            }
            OrderError::OrderAlreadyExists(id) => {
                AppError::with_message(ErrorCode::OrderAlreadyExists, message)
                    .with_detail("order_id", id)
            }
            OrderError::InvalidTransition { order_id, from, to } => {
                let code = match to {
                    OrderStatus::Completed => ErrorCode::OrderNotWaitingPickup,
                    _ => ErrorCode::OrderNotPending,
                };
                AppError::with_message(code, message)
                    .with_detail("order_id", order_id)
                    .with_detail("status", from.as_str())
            }
            OrderError::MenuItemNotFound(id) => {
                AppError::with_message(ErrorCode::MenuItemNotFound, message)
                    .with_detail("menu_item_id", id)
            }
            OrderError::InvalidOrderId(id) => {
                AppError::with_message(ErrorCode::InvalidOrderId, "Invalid order ID format")
                    .with_detail("order_id", id)
            }
            OrderError::EvictionFailed(_) => {
                tracing::error!(error = %message, "Order eviction failed");
                AppError::with_message(ErrorCode::OrderEvictionFailed, message)
            }
        }
    }
}

pub type OrderResult<T> = Result<T, OrderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_messages() {
        let err = OrderError::InvalidTransition {
            order_id: "s-1".to_string(),
            from: OrderStatus::Completed,
            to: OrderStatus::WaitingPickup,
        };
        assert_eq!(err.to_string(), "order status is not pending");

        let err = OrderError::InvalidTransition {
            order_id: "s-1".to_string(),
            from: OrderStatus::Pending,
            to: OrderStatus::Completed,
        };
        assert_eq!(err.to_string(), "order status is not waiting pickup");
    }

    #[test]
    fn test_into_app_error() {
        let err: AppError = OrderError::StoreUnknown("nope".to_string()).into();
        assert_eq!(err.code, ErrorCode::StoreNotFound);
        assert_eq!(err.http_status(), http::StatusCode::NOT_FOUND);

        let err: AppError = OrderError::InvalidTransition {
            order_id: "s-1".to_string(),
            from: OrderStatus::Pending,
            to: OrderStatus::Completed,
        }
        .into();
        assert_eq!(err.code, ErrorCode::OrderNotWaitingPickup);
        assert_eq!(err.message, "order status is not waiting pickup");
        assert_eq!(err.http_status(), http::StatusCode::BAD_REQUEST);

        let err: AppError = OrderError::OrderAlreadyExists("s-1".to_string()).into();
        assert_eq!(err.http_status(), http::StatusCode::CONFLICT);

        let err: AppError = OrderError::InvalidCapacity("s".to_string()).into();
        assert_eq!(err.code, ErrorCode::InternalError);
        assert_eq!(err.message, "Store capacity must be positive: s");
    }
}
