//! OrderService - 门店订单编排
//!
//! 串联 菜单 → 订单号 → 账本 → 状态机，是 HTTP 层唯一调用的订单入口。
//! 状态转换通过 [`StoreLedger::apply`](super::ledger::StoreLedger::apply)
//! 在同一把写锁内完成 读取副本 → 纯转换 → 写回。

use shared::models::Order;
use std::sync::Arc;

use super::error::{OrderError, OrderResult};
use super::lifecycle;
use super::registry::StoreRegistry;
use crate::menu::MenuCatalog;

#[derive(Debug, Clone)]
pub struct OrderService {
    registry: Arc<StoreRegistry>,
    menu: Arc<MenuCatalog>,
}

impl OrderService {
    pub fn new(registry: Arc<StoreRegistry>, menu: Arc<MenuCatalog>) -> Self {
        Self { registry, menu }
    }

    pub fn registry(&self) -> &Arc<StoreRegistry> {
        &self.registry
    }

    pub fn menu(&self) -> &Arc<MenuCatalog> {
        &self.menu
    }

    /// Create a pending order for `menu_item_id`, evicting the store's oldest
    /// order when it is full.
    pub fn create_order(&self, store_id: &str, menu_item_id: &str) -> OrderResult<Order> {
        let ledger = self.registry.ledger(store_id)?;
        let item = self.menu.get(menu_item_id)?;

        let order = Order::new(store_id, ledger.next_order_number(), item);
        if let Some(evicted) = ledger.create(order.clone())? {
            tracing::info!(
                store_id = %store_id,
                evicted_id = %evicted.id,
                evicted_status = %evicted.status,
                "Evicted oldest order (store at capacity)"
            );
        }

        tracing::info!(
            store_id = %store_id,
            order_id = %order.id,
            order_number = order.order_number,
            menu_item_id = %order.menu_item_id,
            "Order created"
        );
        Ok(order)
    }

    /// Orders of the store sorted by order number
    pub fn list_orders(&self, store_id: &str) -> OrderResult<Vec<Order>> {
        let mut orders = self.registry.list(store_id)?;
        orders.sort_by_key(|o| o.order_number);
        Ok(orders)
    }

    pub fn get_order(&self, store_id: &str, order_id: &str) -> OrderResult<Order> {
        let ledger = self.registry.ledger(store_id)?;
        check_order_id(store_id, order_id)?;
        ledger.get(order_id)
    }

    /// Pending -> WaitingPickup
    pub fn mark_waiting_pickup(&self, store_id: &str, order_id: &str) -> OrderResult<Order> {
        self.transition(store_id, order_id, lifecycle::mark_waiting_pickup)
    }

    /// WaitingPickup -> Completed
    pub fn complete_order(&self, store_id: &str, order_id: &str) -> OrderResult<Order> {
        self.transition(store_id, order_id, lifecycle::mark_completed)
    }

    fn transition(
        &self,
        store_id: &str,
        order_id: &str,
        transform: fn(&Order) -> OrderResult<Order>,
    ) -> OrderResult<Order> {
        let ledger = self.registry.ledger(store_id)?;
        check_order_id(store_id, order_id)?;

        match ledger.apply(order_id, transform) {
            Ok(order) => {
                tracing::info!(
                    store_id = %store_id,
                    order_id = %order.id,
                    status = %order.status,
                    "Order status changed"
                );
                Ok(order)
            }
            Err(e) => {
                tracing::warn!(store_id = %store_id, order_id = %order_id, error = %e, "Order transition rejected");
                Err(e)
            }
        }
    }
}

/// `{store_id}-<number>` 形式校验
fn check_order_id(store_id: &str, order_id: &str) -> OrderResult<()> {
    if Order::is_id_of_store(order_id, store_id) {
        Ok(())
    } else {
        Err(OrderError::InvalidOrderId(order_id.to_string()))
    }
}
