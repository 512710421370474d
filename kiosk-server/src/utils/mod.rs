//! 工具模块
//!
//! - [`logger`] - 日志初始化
//! - [`validation`] - 输入校验

pub mod logger;
pub mod validation;

pub use logger::init_logger_with_file;
pub use validation::validate_required_text;
