use shared::error::{AppError, ErrorCode};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// 限流拒绝原因
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateLimitError {
    /// 已处于封禁中
    #[error("IP address is blocked for {} more minutes", whole_minutes(.remaining))]
    Blocked { remaining: Duration },

    /// 本次请求超出阈值，刚刚被封禁
    #[error(
        "IP address has been blocked for {} hours due to excessive requests",
        whole_hours(.duration)
    )]
    Banned { duration: Duration },
}

fn whole_minutes(d: &Duration) -> u64 {
    d.as_secs() / 60
}

fn whole_hours(d: &Duration) -> u64 {
    d.as_secs() / 3600
}

impl From<RateLimitError> for AppError {
    fn from(err: RateLimitError) -> Self {
        let message = err.to_string();
        match err {
            RateLimitError::Blocked { remaining } => {
                AppError::with_message(ErrorCode::IpBlocked, message)
                    .with_detail("remaining_secs", remaining.as_secs())
            }
            RateLimitError::Banned { duration } => {
                AppError::with_message(ErrorCode::RateLimited, message)
                    .with_detail("block_secs", duration.as_secs())
            }
        }
    }
}

/// `is_blocked` 的只读结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockNotice {
    pub remaining: Duration,
}

impl fmt::Display for BlockNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Your IP address is blocked. Block will be lifted in {} minutes",
            whole_minutes(&self.remaining)
        )
    }
}

impl From<BlockNotice> for AppError {
    fn from(notice: BlockNotice) -> Self {
        AppError::with_message(ErrorCode::IpBlocked, notice.to_string())
            .with_detail("remaining_secs", notice.remaining.as_secs())
    }
}
