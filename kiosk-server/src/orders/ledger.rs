//! StoreLedger - 单门店订单账本
//!
//! 容量有界，满载时先淘汰最旧订单 (最早写入账本) 再插入新订单。
//!
//! # 并发
//!
//! 每个门店一把 `RwLock`：
//! - 读操作 (`get` / `list` / `count` / `oldest`) 可并行
//! - 写操作 (`create` / `update` / `apply` / `delete`) 完全串行
//!
//! 淘汰与插入在同一个写锁内完成，并发 `create` 不会让账本超过容量。
//!
//! # 新旧顺序
//!
//! 先后由账本内部的写入序号决定，序号在写锁内递增，`update` / `apply` 保留原序号。
//! 墙钟 `created_at` 只用于展示，系统时间回拨不影响淘汰顺序。
//!
//! 账本只返回订单副本，调用方修改副本后需通过 `update` 写回。

use parking_lot::RwLock;
use shared::models::{Order, Store};
use std::collections::{BTreeMap, HashMap};

use super::error::{OrderError, OrderResult};
use super::sequencer::Sequencer;

#[derive(Debug)]
struct Entry {
    /// 写入序号
    seq: u64,
    order: Order,
}

#[derive(Debug, Default)]
struct LedgerInner {
    orders: HashMap<String, Entry>,
    /// 写入序号 → order id, oldest first
    by_age: BTreeMap<u64, String>,
    next_seq: u64,
}

impl LedgerInner {
    fn insert(&mut self, order: Order) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.by_age.insert(seq, order.id.clone());
        self.orders.insert(order.id.clone(), Entry { seq, order });
    }

    /// Swap in a new copy, keeping the original position. Hands the order back if absent.
    fn replace(&mut self, order: Order) -> Result<(), Order> {
        match self.orders.get_mut(&order.id) {
            Some(entry) => {
                entry.order = order;
                Ok(())
            }
            None => Err(order),
        }
    }

    fn get(&self, order_id: &str) -> Option<&Order> {
        self.orders.get(order_id).map(|e| &e.order)
    }

    fn remove(&mut self, order_id: &str) -> Option<Order> {
        let entry = self.orders.remove(order_id)?;
        self.by_age.remove(&entry.seq);
        Some(entry.order)
    }

    fn oldest_id(&self) -> Option<&String> {
        self.by_age.values().next()
    }
}

/// Capacity-bounded order ledger for one store
#[derive(Debug)]
pub struct StoreLedger {
    store: Store,
    sequencer: Sequencer,
    inner: RwLock<LedgerInner>,
}

impl StoreLedger {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            sequencer: Sequencer::new(),
            inner: RwLock::new(LedgerInner::default()),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn capacity(&self) -> usize {
        self.store.capacity
    }

    /// 发放下一个订单号 (Sequencer::next)
    pub fn next_order_number(&self) -> u64 {
        self.sequencer.next()
    }

    pub fn last_order_number(&self) -> u64 {
        self.sequencer.last()
    }

    /// Insert a new order, evicting the oldest one first when the store is full.
    ///
    /// Returns the evicted order, if any. An id already present is rejected
    /// with [`OrderError::OrderAlreadyExists`] and nothing is evicted.
    pub fn create(&self, order: Order) -> OrderResult<Option<Order>> {
        let mut inner = self.inner.write();

        if inner.orders.contains_key(&order.id) {
            return Err(OrderError::OrderAlreadyExists(order.id));
        }

        let evicted = if inner.orders.len() >= self.store.capacity {
            let oldest = inner
                .oldest_id()
                .cloned()
                .ok_or_else(|| OrderError::EvictionFailed(self.store.id.clone()))?;
            let removed = inner
                .remove(&oldest)
                .ok_or(OrderError::EvictionFailed(oldest))?;
            Some(removed)
        } else {
            None
        };

        inner.insert(order);
        Ok(evicted)
    }

    pub fn get(&self, order_id: &str) -> OrderResult<Order> {
        self.inner
            .read()
            .get(order_id)
            .cloned()
            .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))
    }

    /// 当前订单快照 (无序)
    pub fn list(&self) -> Vec<Order> {
        self.inner
            .read()
            .orders
            .values()
            .map(|e| e.order.clone())
            .collect()
    }

    /// Replace the stored order with the same id
    pub fn update(&self, order: Order) -> OrderResult<()> {
        self.inner
            .write()
            .replace(order)
            .map_err(|o| OrderError::OrderNotFound(o.id))
    }

    /// Read-transform-replace under a single write lock.
    ///
    /// `transform` receives a copy and must keep its id; when it fails the
    /// stored order is left untouched.
    pub fn apply<F>(&self, order_id: &str, transform: F) -> OrderResult<Order>
    where
        F: FnOnce(&Order) -> OrderResult<Order>,
    {
        let mut inner = self.inner.write();
        let entry = inner
            .orders
            .get_mut(order_id)
            .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))?;

        let next = transform(&entry.order)?;
        entry.order = next.clone();
        Ok(next)
    }

    pub fn delete(&self, order_id: &str) -> OrderResult<Order> {
        self.inner
            .write()
            .remove(order_id)
            .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))
    }

    pub fn count(&self) -> usize {
        self.inner.read().orders.len()
    }

    /// 最早写入的订单，账本为空时返回 None
    pub fn oldest(&self) -> Option<Order> {
        let inner = self.inner.read();
        inner.oldest_id().and_then(|id| inner.get(id)).cloned()
    }
}
