//! 按客户端 IP 的限流与临时封禁
//!
//! - [`RequestCounter`]: 固定窗口计数
//! - [`BlockRegistry`]: key → 封禁时刻
//! - [`IpBlocker`]: 组合两者，提供 `is_blocked` / `increment_and_check`
//! - [`middleware::rate_limit`]: axum 中间件

pub mod block_registry;
pub mod blocker;
pub mod counter;
pub mod error;
pub mod middleware;

pub use block_registry::BlockRegistry;
pub use blocker::{IpBlocker, SweepStats};
pub use counter::{RequestCounter, WindowGuard};
pub use error::{BlockNotice, RateLimitError};
