//! 订单模块
//!
//! - [`Sequencer`]: 门店内单调递增的订单号
//! - [`StoreLedger`]: 有容量上限的订单账本，满载淘汰最旧订单
//! - [`lifecycle`]: `Pending -> WaitingPickup -> Completed` 纯状态转换
//! - [`StoreRegistry`]: 门店 → 账本，各门店独立加锁
//! - [`OrderService`]: 供 HTTP 层调用的编排层
//!
//! 除 `OrderService` 外本模块不写日志，错误一律以 [`OrderError`] 返回。

pub mod error;
pub mod ledger;
pub mod lifecycle;
pub mod registry;
pub mod sequencer;
pub mod service;

pub use error::{OrderError, OrderResult};
pub use ledger::StoreLedger;
pub use registry::StoreRegistry;
pub use sequencer::Sequencer;
pub use service::OrderService;
