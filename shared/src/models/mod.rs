//! Data models
//!
//! Shared between kiosk-server and its clients (via API).
//! Order and store IDs are strings; order ids take the form `{store_id}-{order_number}`.

pub mod menu;
pub mod order;
pub mod store;

// Re-exports
pub use menu::*;
pub use order::*;
pub use store::*;
