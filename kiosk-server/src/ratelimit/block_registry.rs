//! 封禁表: key → 封禁时刻
//!
//! 过期的权威判断在 [`IpBlocker`](super::IpBlocker) 中按时间戳比较完成，
//! `remove_expired` 只是周期性的垃圾回收。

use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug)]
pub struct BlockRegistry {
    block_duration: Duration,
    bans: RwLock<HashMap<String, Instant>>,
}

impl BlockRegistry {
    pub fn new(block_duration: Duration) -> Self {
        Self {
            block_duration,
            bans: RwLock::new(HashMap::new()),
        }
    }

    pub fn block_duration(&self) -> Duration {
        self.block_duration
    }

    pub fn add(&self, key: &str, at: Instant) {
        self.bans.write().insert(key.to_owned(), at);
    }

    pub fn remove(&self, key: &str) -> Option<Instant> {
        self.bans.write().remove(key)
    }

    pub fn get(&self, key: &str) -> Option<Instant> {
        self.bans.read().get(key).copied()
    }

    pub fn all_blocked(&self) -> HashMap<String, Instant> {
        self.bans.read().clone()
    }

    /// Time left on the ban imposed at `banned_at`, `None` once it has expired
    pub fn remaining(&self, banned_at: Instant, now: Instant) -> Option<Duration> {
        let elapsed = now.saturating_duration_since(banned_at);
        self.block_duration
            .checked_sub(elapsed)
            .filter(|left| !left.is_zero())
    }

    /// Remove `key`'s ban only if it has expired at `now`, in one write lock.
    ///
    /// Returns `true` for the caller that actually lifted it.
    pub fn remove_if_expired(&self, key: &str, now: Instant) -> bool {
        let mut bans = self.bans.write();
        match bans.get(key) {
            Some(at) if self.remaining(*at, now).is_none() => bans.remove(key).is_some(),
            _ => false,
        }
    }

    /// Drop bans with `now - banned_at >= block_duration`, returns how many were removed
    pub fn remove_expired(&self, now: Instant) -> usize {
        let mut bans = self.bans.write();
        let before = bans.len();
        bans.retain(|_, at| now.saturating_duration_since(*at) < self.block_duration);
        before - bans.len()
    }

    pub fn len(&self) -> usize {
        self.bans.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bans.read().is_empty()
    }
}
