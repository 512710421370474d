//! HTTP 中间件 (限流中间件见 [`crate::ratelimit::middleware`])

pub mod logging;

pub use logging::logging_middleware;
