//! 后台任务管理
//!
//! 统一管理所有后台任务的注册、启动和关闭。

use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// 已注册的后台任务
struct RegisteredTask {
    name: &'static str,
    handle: JoinHandle<()>,
}

/// 后台任务管理器
///
/// 所有任务共享一个取消令牌，任务内部通过 [`shutdown_token`](Self::shutdown_token)
/// 监听关闭信号。
///
/// # 使用示例
///
/// ```ignore
/// let mut tasks = BackgroundTasks::new();
/// let token = tasks.shutdown_token();
///
/// tasks.spawn("ip_block_sweeper", blocker.run_sweeper(token));
///
/// // Graceful shutdown
/// tasks.shutdown(Duration::from_secs(5)).await;
/// ```
pub struct BackgroundTasks {
    tasks: Vec<RegisteredTask>,
    /// 全局取消令牌
    shutdown: CancellationToken,
}

impl BackgroundTasks {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            shutdown: CancellationToken::new(),
        }
    }

    /// 获取取消令牌（用于任务内部监听 shutdown 信号）
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// 注册并启动一个后台任务
    ///
    /// 任务会被包装以捕获 panic，异常退出会记录错误日志。
    pub fn spawn<F>(&mut self, name: &'static str, future: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let token = self.shutdown.clone();
        let wrapped_future = async move {
            let result: Result<(), Box<dyn std::any::Any + Send>> =
                AssertUnwindSafe(future).catch_unwind().await;
            match result {
                Ok(()) if token.is_cancelled() => {
                    tracing::debug!(task = %name, "Background task stopped");
                }
                Ok(()) => {
                    tracing::warn!(task = %name, "Background task completed unexpectedly");
                }
                Err(panic_info) => {
                    let panic_msg: String = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        (*s).to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    tracing::error!(
                        task = %name,
                        panic = %panic_msg,
                        "Background task panicked! This is a bug that should be reported."
                    );
                }
            }
        };

        let handle = tokio::spawn(wrapped_future);
        tracing::debug!(task = %name, "Registered background task");
        self.tasks.push(RegisteredTask { name, handle });
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// 打印任务摘要
    pub fn log_summary(&self) {
        let names: Vec<&str> = self.tasks.iter().map(|t| t.name).collect();
        tracing::info!(
            "Background tasks registered: {} total {:?}",
            self.tasks.len(),
            names
        );
    }

    /// 返回已异常结束的任务数量
    pub fn check_health(&self) -> usize {
        let failed = self
            .tasks
            .iter()
            .filter(|t| t.handle.is_finished())
            .inspect(|t| {
                tracing::error!(
                    task = %t.name,
                    "Background task unexpectedly finished! This may indicate a panic or error."
                );
            })
            .count();
        if failed > 0 {
            tracing::error!(failed, total = self.tasks.len(), "Background task health check failed");
        }
        failed
    }

    /// Graceful shutdown - 取消所有任务并等待完成
    ///
    /// 超过 `timeout` 仍未结束的任务会被 abort。
    pub async fn shutdown(self, timeout: Duration) {
        tracing::info!("Shutting down {} background tasks...", self.tasks.len());

        self.shutdown.cancel();

        for mut task in self.tasks {
            match tokio::time::timeout(timeout, &mut task.handle).await {
                Ok(Ok(())) => {
                    tracing::debug!(task = %task.name, "Task completed");
                }
                Ok(Err(e)) if e.is_cancelled() => {
                    tracing::debug!(task = %task.name, "Task cancelled");
                }
                Ok(Err(e)) => {
                    tracing::error!(task = %task.name, error = ?e, "Task panicked");
                }
                Err(_) => {
                    tracing::warn!(task = %task.name, "Task did not stop in time, aborting");
                    task.handle.abort();
                }
            }
        }

        tracing::info!("All background tasks stopped");
    }
}

impl Default for BackgroundTasks {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_shutdown_cancels_tasks() {
        let mut tasks = BackgroundTasks::new();
        let ticks = Arc::new(AtomicUsize::new(0));

        let token = tasks.shutdown_token();
        let counter = ticks.clone();
        tasks.spawn("ticker", async move {
            let mut interval = tokio::time::interval(Duration::from_millis(5));
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = interval.tick() => { counter.fetch_add(1, Ordering::Relaxed); }
                }
            }
        });
        assert_eq!(tasks.len(), 1);

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(tasks.check_health(), 0);

        tasks.shutdown(Duration::from_secs(1)).await;
        assert!(ticks.load(Ordering::Relaxed) > 0);
    }

    #[tokio::test]
    async fn test_panicking_task_is_contained() {
        let mut tasks = BackgroundTasks::new();
        tasks.spawn("boom", async {
            panic!("boom");
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(tasks.check_health(), 1);
        tasks.shutdown(Duration::from_secs(1)).await;
    }

    #[tokio::test]
    async fn test_stuck_task_is_aborted() {
        let mut tasks = BackgroundTasks::new();
        tasks.spawn("stuck", std::future::pending());
        assert!(!tasks.is_empty());

        tasks.shutdown(Duration::from_millis(20)).await;
    }
}
