//! Kiosk Server - 自助点单亭订单服务
//!
//! # 架构概述
//!
//! - **订单** (`orders`): 每个门店一个有容量上限的内存账本，满载淘汰最旧订单，
//!   订单号单调递增且不复用
//! - **限流** (`ratelimit`): 按客户端 IP 的固定窗口计数与临时封禁
//! - **菜单** (`menu`): 所有门店共用的静态菜单
//! - **HTTP API** (`api`): axum 路由和处理器
//!
//! 所有状态只存在于进程内存，重启即丢失。
//!
//! # 模块结构
//!
//! ```text
//! kiosk-server/src/
//! ├── core/          # 配置、状态、错误、后台任务、服务器
//! ├── orders/        # 订单号、账本、状态机、门店注册表、编排
//! ├── ratelimit/     # 计数器、封禁表、IpBlocker、限流中间件
//! ├── menu/          # 菜单目录
//! ├── middleware/    # 请求日志
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志初始化、输入校验
//! ```

pub mod api;
pub mod core;
pub mod menu;
pub mod middleware;
pub mod orders;
pub mod ratelimit;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerError, ServerState};
pub use menu::MenuCatalog;
pub use orders::{OrderError, OrderService, StoreLedger, StoreRegistry};
pub use ratelimit::{IpBlocker, RateLimitError};

// Re-export unified error types from shared
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

/// 初始化日志 (配置加载之后调用)
pub fn setup_environment(config: &Config) {
    utils::init_logger_with_file(
        Some(&config.log_level),
        config.log_json,
        config.log_dir.as_deref(),
    );
}

pub fn print_banner() {
    println!(
        r#"
    __ __ _            __
   / //_/(_)___  _____/ /__
  / ,<  / / __ \/ ___/ //_/
 / /| |/ / /_/ (__  ) ,<
/_/ |_/_/\____/____/_/|_|
    "#
    );
}
