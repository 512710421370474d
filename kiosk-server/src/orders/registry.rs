//! StoreRegistry - 门店 → 账本
//!
//! 启动时一次性构建，之后门店集合不可变。每个门店拥有独立的
//! [`StoreLedger`]，不同门店之间不存在共享锁。

use shared::models::{Order, Store};
use std::collections::HashMap;
use std::sync::Arc;

use super::error::{OrderError, OrderResult};
use super::ledger::StoreLedger;

#[derive(Debug, Default)]
pub struct StoreRegistry {
    ledgers: HashMap<String, Arc<StoreLedger>>,
    /// 配置顺序
    order: Vec<String>,
}

impl StoreRegistry {
    /// Build one ledger per store. Duplicate store ids and zero capacity are rejected.
    pub fn new(stores: impl IntoIterator<Item = Store>) -> OrderResult<Self> {
        let mut registry = Self::default();
        for store in stores {
            if registry.ledgers.contains_key(&store.id) {
                return Err(OrderError::StoreAlreadyRegistered(store.id));
            }
            if store.capacity == 0 {
                return Err(OrderError::InvalidCapacity(store.id));
            }
            registry.order.push(store.id.clone());
            registry
                .ledgers
                .insert(store.id.clone(), Arc::new(StoreLedger::new(store)));
        }
        Ok(registry)
    }

    pub fn ledger(&self, store_id: &str) -> OrderResult<&Arc<StoreLedger>> {
        self.ledgers
            .get(store_id)
            .ok_or_else(|| OrderError::StoreUnknown(store_id.to_string()))
    }

    pub fn store(&self, store_id: &str) -> OrderResult<&Store> {
        self.ledger(store_id).map(|l| l.store())
    }

    /// Stores in configuration order
    pub fn stores(&self) -> Vec<&Store> {
        self.order
            .iter()
            .filter_map(|id| self.ledgers.get(id))
            .map(|l| l.store())
            .collect()
    }

    // ========== Store-scoped ledger calls ==========

    pub fn next_order_number(&self, store_id: &str) -> OrderResult<u64> {
        Ok(self.ledger(store_id)?.next_order_number())
    }

    pub fn create(&self, store_id: &str, order: Order) -> OrderResult<Option<Order>> {
        self.ledger(store_id)?.create(order)
    }

    pub fn get(&self, store_id: &str, order_id: &str) -> OrderResult<Order> {
        self.ledger(store_id)?.get(order_id)
    }

    pub fn list(&self, store_id: &str) -> OrderResult<Vec<Order>> {
        Ok(self.ledger(store_id)?.list())
    }

    pub fn update(&self, store_id: &str, order: Order) -> OrderResult<()> {
        self.ledger(store_id)?.update(order)
    }

    pub fn apply<F>(&self, store_id: &str, order_id: &str, transform: F) -> OrderResult<Order>
    where
        F: FnOnce(&Order) -> OrderResult<Order>,
    {
        self.ledger(store_id)?.apply(order_id, transform)
    }

    pub fn delete(&self, store_id: &str, order_id: &str) -> OrderResult<Order> {
        self.ledger(store_id)?.delete(order_id)
    }

    pub fn count(&self, store_id: &str) -> OrderResult<usize> {
        Ok(self.ledger(store_id)?.count())
    }

    pub fn oldest(&self, store_id: &str) -> OrderResult<Option<Order>> {
        Ok(self.ledger(store_id)?.oldest())
    }
}
