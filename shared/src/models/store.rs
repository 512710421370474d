//! Store Model

use serde::{Deserialize, Serialize};

/// 门店 (kiosk) - 一个独立的点单队列
///
/// 启动时由配置创建，之后不可变。`capacity` 是同时保留的订单上限，
/// 超出时由订单账本淘汰最旧的订单。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub id: String,
    /// 最大保留订单数 (必须大于 0)
    pub capacity: usize,
}

impl Store {
    pub fn new(id: impl Into<String>, capacity: usize) -> Self {
        Self {
            id: id.into(),
            capacity,
        }
    }
}
