//! 请求计数器 (固定窗口)
//!
//! 每个 key 记录 `count` 与 `window_start`，窗口过期后在下一次访问时归零重开。
//! 过期条目由周期性 sweep 统一清理，不为单个请求派生任务。

use dashmap::DashMap;
use dashmap::mapref::one::RefMut;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    window_start: Instant,
}

impl Window {
    fn is_expired(&self, now: Instant, window: Duration) -> bool {
        now.saturating_duration_since(self.window_start) >= window
    }
}

/// 单个 key 的窗口写锁
pub struct WindowGuard<'a> {
    entry: RefMut<'a, String, Window>,
    window: Duration,
}

impl WindowGuard<'_> {
    pub fn increment(&mut self, now: Instant) -> u32 {
        // Reset window if expired
        if self.entry.is_expired(now, self.window) {
            self.reset(now);
        }

        self.entry.count = self.entry.count.saturating_add(1);
        self.entry.count
    }

    /// 归零并从 `now` 开始新窗口
    pub fn reset(&mut self, now: Instant) {
        self.entry.count = 0;
        self.entry.window_start = now;
    }
}

/// Per-key fixed-window request counter
#[derive(Debug)]
pub struct RequestCounter {
    window: Duration,
    entries: DashMap<String, Window>,
}

impl RequestCounter {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            entries: DashMap::new(),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Count one request for `key` and return the count within the current window
    pub fn increment(&self, key: &str, now: Instant) -> u32 {
        self.lock(key, now).increment(now)
    }

    /// Exclusive access to `key`'s window until the guard is dropped.
    ///
    /// 持有期间同一 key 的其他调用会等待 (DashMap 分片写锁)。
    pub fn lock(&self, key: &str, now: Instant) -> WindowGuard<'_> {
        let entry = self.entries.entry(key.to_owned()).or_insert(Window {
            count: 0,
            window_start: now,
        });
        WindowGuard {
            entry,
            window: self.window,
        }
    }

    /// Requests counted for `key` in the window still open at `now`
    pub fn count(&self, key: &str, now: Instant) -> u32 {
        self.entries
            .get(key)
            .filter(|w| !w.is_expired(now, self.window))
            .map(|w| w.count)
            .unwrap_or(0)
    }

    /// Drop entries whose window has closed, returns how many were removed
    pub fn sweep(&self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, w| !w.is_expired(now, self.window));
        before.saturating_sub(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
