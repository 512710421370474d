//! IpBlocker - 计数器 + 封禁表
//!
//! 请求先查封禁表 (未过期则直接拒绝)，否则计数；计数超过 `max_requests`
//! 时记录封禁。
//!
//! 同一 key 的整个判定在该 key 的计数窗口锁内完成，封禁表锁只在其内部短暂获取。
//! 加锁顺序固定为 计数窗口 → 封禁表，sweep 与 `is_blocked` 从不反向持锁。

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::block_registry::BlockRegistry;
use super::counter::RequestCounter;
use super::error::{BlockNotice, RateLimitError};
use crate::core::config::RateLimitConfig;

/// 一次 sweep 的清理结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStats {
    pub bans: usize,
    pub counters: usize,
}

#[derive(Debug)]
pub struct IpBlocker {
    max_requests: u32,
    sweep_interval: Duration,
    counter: RequestCounter,
    blocks: BlockRegistry,
}

impl IpBlocker {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            max_requests: config.max_requests,
            sweep_interval: config.sweep_interval,
            counter: RequestCounter::new(config.window),
            blocks: BlockRegistry::new(config.block_duration),
        }
    }

    pub fn block_duration(&self) -> Duration {
        self.blocks.block_duration()
    }

    /// Active ban for `key`, if any. Never mutates state.
    pub fn block_notice(&self, key: &str) -> Option<BlockNotice> {
        let banned_at = self.blocks.get(key)?;
        self.blocks
            .remaining(banned_at, Instant::now())
            .map(|remaining| BlockNotice { remaining })
    }

    pub fn is_blocked(&self, key: &str) -> bool {
        self.block_notice(key).is_some()
    }

    /// Admit or reject one request from `key`.
    ///
    /// An expired ban is lifted first and the key starts a fresh window.
    pub fn increment_and_check(&self, key: &str) -> Result<(), RateLimitError> {
        let now = Instant::now();
        let mut window = self.counter.lock(key, now);

        if let Some(banned_at) = self.blocks.get(key) {
            if let Some(remaining) = self.blocks.remaining(banned_at, now) {
                return Err(RateLimitError::Blocked { remaining });
            }
            if self.blocks.remove_if_expired(key, now) {
                window.reset(now);
            }
        }

        if window.increment(now) > self.max_requests {
            self.blocks.add(key, now);
            return Err(RateLimitError::Banned {
                duration: self.blocks.block_duration(),
            });
        }

        Ok(())
    }

    /// Currently banned keys with their remaining ban time
    pub fn blocked_keys(&self) -> HashMap<String, Duration> {
        let now = Instant::now();
        self.blocks
            .all_blocked()
            .into_iter()
            .filter_map(|(key, at)| self.blocks.remaining(at, now).map(|left| (key, left)))
            .collect()
    }

    /// Drop expired bans and closed counter windows
    pub fn sweep(&self, now: Instant) -> SweepStats {
        SweepStats {
            bans: self.blocks.remove_expired(now),
            counters: self.counter.sweep(now),
        }
    }

    /// Periodic sweep until `shutdown` is cancelled
    pub async fn run_sweeper(self: Arc<Self>, shutdown: CancellationToken) {
        let mut interval = tokio::time::interval(self.sweep_interval);
        // 第一次 tick 立即返回
        interval.tick().await;

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::debug!("IP blocker sweeper stopped");
                    break;
                }
                _ = interval.tick() => {
                    let stats = self.sweep(Instant::now());
                    if stats != SweepStats::default() {
                        tracing::debug!(
                            bans = stats.bans,
                            counters = stats.counters,
                            "Swept expired rate-limit entries"
                        );
                    }
                }
            }
        }
    }
}
