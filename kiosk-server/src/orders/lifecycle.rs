//! 订单状态机
//!
//! `Pending -> WaitingPickup -> Completed`
//!
//! 转换函数只作用于副本，返回新的订单；写回账本由调用方完成。

use shared::models::{Order, OrderStatus};

use super::error::{OrderError, OrderResult};

/// Pending -> WaitingPickup
pub fn mark_waiting_pickup(order: &Order) -> OrderResult<Order> {
    advance(order, OrderStatus::WaitingPickup)
}

/// WaitingPickup -> Completed
pub fn mark_completed(order: &Order) -> OrderResult<Order> {
    advance(order, OrderStatus::Completed)
}

fn advance(order: &Order, to: OrderStatus) -> OrderResult<Order> {
    if order.status.next() != Some(to) {
        return Err(OrderError::InvalidTransition {
            order_id: order.id.clone(),
            from: order.status,
            to,
        });
    }

    let mut next = order.clone();
    next.status = to;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::MenuItem;

    fn pending() -> Order {
        Order::new("s", 1, &MenuItem::new("ujikintoki", "Uji Kintoki", ""))
    }

    #[test]
    fn test_full_lifecycle() {
        let order = pending();
        let waiting = mark_waiting_pickup(&order).unwrap();
        assert_eq!(waiting.status, OrderStatus::WaitingPickup);

        let done = mark_completed(&waiting).unwrap();
        assert_eq!(done.status, OrderStatus::Completed);
        assert_eq!(done.id, order.id);
        assert_eq!(done.created_at, order.created_at);
    }

    #[test]
    fn test_complete_before_waiting_pickup_fails() {
        let order = pending();
        let err = mark_completed(&order).unwrap_err();
        assert_eq!(err.to_string(), "order status is not waiting pickup");
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn test_waiting_pickup_only_from_pending() {
        let waiting = mark_waiting_pickup(&pending()).unwrap();
        let err = mark_waiting_pickup(&waiting).unwrap_err();
        assert_eq!(err.to_string(), "order status is not pending");

        let done = mark_completed(&waiting).unwrap();
        assert!(mark_waiting_pickup(&done).is_err());
        assert!(mark_completed(&done).is_err());
    }

    #[test]
    fn test_transition_error_carries_states() {
        let err = mark_completed(&pending()).unwrap_err();
        assert_eq!(
            err,
            OrderError::InvalidTransition {
                order_id: "s-1".to_string(),
                from: OrderStatus::Pending,
                to: OrderStatus::Completed,
            }
        );
    }
}
