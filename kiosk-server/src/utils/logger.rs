//! Logging Infrastructure
//!
//! `RUST_LOG` 优先于传入的日志级别。可选 JSON 输出与按天滚动的日志文件。

use std::path::Path;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the logger with optional JSON format and file output
pub fn init_logger_with_file(log_level: Option<&str>, json: bool, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.unwrap_or("info")));

    let stdout_layer = if json {
        fmt::layer().json().with_target(false).boxed()
    } else {
        fmt::layer().with_target(false).boxed()
    };

    // File output (JSON lines) if log_dir is usable
    let file_layer = log_dir
        .filter(|dir| std::fs::create_dir_all(Path::new(dir)).is_ok())
        .map(|dir| {
            let file_appender = tracing_appender::rolling::daily(dir, "kiosk-server");
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(file_appender)
                .boxed()
        });

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();
}
