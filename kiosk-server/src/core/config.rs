use shared::models::Store;
use std::time::Duration;

use super::error::ServerError;

/// 门店默认订单上限
pub const DEFAULT_MAX_ORDERS: usize = 100;

/// 限流配置
///
/// 同一个 key 在 `window` 内的请求数超过 `max_requests` 时封禁 `block_duration`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// 窗口内允许的最大请求数
    pub max_requests: u32,
    /// 计数窗口
    pub window: Duration,
    /// 封禁时长
    pub block_duration: Duration,
    /// 过期封禁/计数的清理周期
    pub sweep_interval: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(1),
            block_duration: Duration::from_secs(3 * 60 * 60),
            sweep_interval: Duration::from_secs(60),
        }
    }
}

/// 服务器配置 - 点单亭服务的所有配置项
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | PORT / HTTP_PORT | 8080 | HTTP 服务端口 (PORT 优先) |
/// | ENVIRONMENT | development | 运行环境 |
/// | KIOSK_STORE_IDS | (必填) | 门店 ID，逗号分隔 |
/// | KIOSK_MAX_ORDERS | 100 | 每个门店保留的订单上限 |
/// | KIOSK_MAX_REQUESTS | 10 | 窗口内允许的请求数 |
/// | KIOSK_RATE_WINDOW_MS | 1000 | 计数窗口(毫秒) |
/// | KIOSK_BLOCK_DURATION_SECS | 10800 | 封禁时长(秒) |
/// | KIOSK_SWEEP_INTERVAL_SECS | 60 | 清理周期(秒) |
/// | REQUEST_TIMEOUT_MS | 10000 | 请求超时(毫秒) |
/// | SHUTDOWN_TIMEOUT_MS | 30000 | 关闭超时(毫秒) |
/// | LOG_LEVEL | info | 日志级别 (RUST_LOG 优先) |
/// | LOG_JSON | false | JSON 格式日志 |
/// | LOG_DIR | (无) | 滚动日志目录 |
///
/// # 示例
///
/// ```ignore
/// KIOSK_STORE_IDS=tokyo,osaka KIOSK_MAX_ORDERS=50 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | production
    pub environment: String,
    /// 门店 ID (配置顺序，已去重)
    pub store_ids: Vec<String>,
    /// 每个门店的订单上限
    pub max_orders: usize,
    /// 限流
    pub rate_limit: RateLimitConfig,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 关闭超时时间 (毫秒)
    pub shutdown_timeout_ms: u64,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 先加载 `.env` (如存在)，未设置的项使用默认值，最后执行 [`Config::validate`]。
    pub fn from_env() -> Result<Self, ServerError> {
        dotenv::dotenv().ok();

        let defaults = RateLimitConfig::default();
        let config = Self {
            http_port: env_parse("PORT")
                .or_else(|| env_parse("HTTP_PORT"))
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            store_ids: parse_store_ids(&std::env::var("KIOSK_STORE_IDS").unwrap_or_default()),
            max_orders: env_parse::<usize>("KIOSK_MAX_ORDERS")
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_MAX_ORDERS),
            rate_limit: RateLimitConfig {
                max_requests: env_parse("KIOSK_MAX_REQUESTS").unwrap_or(defaults.max_requests),
                window: env_parse("KIOSK_RATE_WINDOW_MS")
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.window),
                block_duration: env_parse("KIOSK_BLOCK_DURATION_SECS")
                    .map(Duration::from_secs)
                    .unwrap_or(defaults.block_duration),
                sweep_interval: env_parse("KIOSK_SWEEP_INTERVAL_SECS")
                    .map(Duration::from_secs)
                    .unwrap_or(defaults.sweep_interval),
            },
            request_timeout_ms: env_parse("REQUEST_TIMEOUT_MS").unwrap_or(10_000),
            shutdown_timeout_ms: env_parse("SHUTDOWN_TIMEOUT_MS").unwrap_or(30_000),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: env_parse("LOG_JSON").unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
        };

        config.validate()?;
        Ok(config)
    }

    /// 指定门店的配置，其余项取默认值
    ///
    /// 常用于测试场景
    pub fn for_stores<I, S>(store_ids: I, max_orders: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let joined: Vec<String> = store_ids.into_iter().map(Into::into).collect();
        Self {
            http_port: 8080,
            environment: "development".into(),
            store_ids: parse_store_ids(&joined.join(",")),
            max_orders,
            rate_limit: RateLimitConfig::default(),
            request_timeout_ms: 10_000,
            shutdown_timeout_ms: 30_000,
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
        }
    }

    pub fn validate(&self) -> Result<(), ServerError> {
        if self.store_ids.is_empty() {
            return Err(ServerError::Config(
                "KIOSK_STORE_IDS must name at least one store".into(),
            ));
        }
        if self.max_orders == 0 {
            return Err(ServerError::Config("store capacity must be positive".into()));
        }
        if self.rate_limit.max_requests == 0 {
            return Err(ServerError::Config("max requests must be positive".into()));
        }
        if self.rate_limit.window.is_zero()
            || self.rate_limit.block_duration.is_zero()
            || self.rate_limit.sweep_interval.is_zero()
        {
            return Err(ServerError::Config("rate limit durations must be positive".into()));
        }
        if self.request_timeout_ms == 0 {
            return Err(ServerError::Config("request timeout must be positive".into()));
        }
        Ok(())
    }

    /// 按配置顺序生成门店
    pub fn stores(&self) -> Vec<Store> {
        self.store_ids
            .iter()
            .map(|id| Store::new(id.clone(), self.max_orders))
            .collect()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// 解析逗号分隔的门店 ID：去空白、丢弃空项、重复项保留第一次出现
pub fn parse_store_ids(raw: &str) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for id in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !ids.iter().any(|existing| existing == id) {
            ids.push(id.to_string());
        }
    }
    ids
}
