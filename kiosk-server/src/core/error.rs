use thiserror::Error;

/// 启动/运行期错误 (请求级错误见 [`shared::error::AppError`])
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("初始化失败: {0}")]
    Init(String),
}

pub type Result<T> = std::result::Result<T, ServerError>;
