//! Order Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::menu::MenuItem;

/// Order status
///
/// `Pending -> WaitingPickup -> Completed`, no other transitions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum OrderStatus {
    /// 已下单，制作中
    #[default]
    Pending,
    /// 制作完成，等待取餐
    WaitingPickup,
    /// 已取餐 (终态)
    Completed,
}

impl OrderStatus {
    /// The status this one may advance to, `None` for the terminal state
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            Self::Pending => Some(Self::WaitingPickup),
            Self::WaitingPickup => Some(Self::Completed),
            Self::Completed => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }

    /// Wire name, identical to the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::WaitingPickup => "waitingPickup",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kiosk order
///
/// Owned by exactly one store ledger. Menu name is captured at creation
/// and never re-resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// `{store_id}-{order_number}`
    pub id: String,
    pub menu_item_id: String,
    pub menu_name: String,
    pub status: OrderStatus,
    /// Unique within the store, strictly increasing, never reused
    pub order_number: u64,
    /// Wall-clock creation time (display only, the ledger orders by insertion)
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Build a new pending order for `store_id` stamped with the current time
    pub fn new(store_id: &str, order_number: u64, item: &MenuItem) -> Self {
        Self {
            id: Self::format_id(store_id, order_number),
            menu_item_id: item.id.clone(),
            menu_name: item.name.clone(),
            status: OrderStatus::Pending,
            order_number,
            created_at: Utc::now(),
        }
    }

    /// Canonical order id
    pub fn format_id(store_id: &str, order_number: u64) -> String {
        format!("{}-{}", store_id, order_number)
    }

    /// Whether `order_id` has the `{store_id}-<suffix>` shape with a non-empty suffix
    pub fn is_id_of_store(order_id: &str, store_id: &str) -> bool {
        if store_id.is_empty() {
            return false;
        }
        order_id
            .strip_prefix(store_id)
            .and_then(|rest| rest.strip_prefix('-'))
            .is_some_and(|suffix| !suffix.is_empty())
    }
}
