use std::sync::Arc;

use crate::core::tasks::BackgroundTasks;
use crate::core::{Config, Result, ServerError};
use crate::menu::MenuCatalog;
use crate::orders::{OrderService, StoreRegistry};
use crate::ratelimit::IpBlocker;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，作为 axum 的 `State` 传入各处理器。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | orders | OrderService | 门店订单 (内含 StoreRegistry / MenuCatalog) |
/// | blocker | Arc<IpBlocker> | IP 限流与封禁 |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub orders: OrderService,
    pub blocker: Arc<IpBlocker>,
}

impl ServerState {
    /// 根据配置构建全部服务
    pub fn initialize(config: &Config) -> Result<Self> {
        config.validate()?;

        let registry = StoreRegistry::new(config.stores())
            .map_err(|e| ServerError::Init(e.to_string()))?;
        let orders = OrderService::new(Arc::new(registry), Arc::new(MenuCatalog::default()));
        let blocker = Arc::new(IpBlocker::new(&config.rate_limit));

        tracing::info!(
            stores = ?config.store_ids,
            max_orders = config.max_orders,
            max_requests = config.rate_limit.max_requests,
            "Server state initialized"
        );

        Ok(Self {
            config: config.clone(),
            orders,
            blocker,
        })
    }

    pub fn menu(&self) -> &MenuCatalog {
        self.orders.menu()
    }

    pub fn registry(&self) -> &StoreRegistry {
        self.orders.registry()
    }

    /// 启动后台任务 (限流表清理)
    pub fn start_background_tasks(&self) -> BackgroundTasks {
        let mut tasks = BackgroundTasks::new();

        let token = tasks.shutdown_token();
        tasks.spawn("ip_block_sweeper", self.blocker.clone().run_sweeper(token));

        tasks.log_summary();
        tasks
    }
}
