//! 订单号生成器
//!
//! 每个门店一个，从 1 开始单调递增。被淘汰或删除的订单号不会被复用。

use std::sync::atomic::{AtomicU64, Ordering};

/// Per-store monotonic order number generator
#[derive(Debug, Default)]
pub struct Sequencer {
    last: AtomicU64,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 返回上一次结果 + 1 (首次为 1)
    pub fn next(&self) -> u64 {
        self.last.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// 最近一次发出的号码，尚未发号时为 0
    pub fn last(&self) -> u64 {
        self.last.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_starts_at_one() {
        let seq = Sequencer::new();
        assert_eq!(seq.last(), 0);
        assert_eq!(seq.next(), 1);
        assert_eq!(seq.next(), 2);
        assert_eq!(seq.last(), 2);
    }

    #[test]
    fn test_concurrent_next_never_repeats() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 1000;

        let seq = Sequencer::new();
        let issued: Vec<Vec<u64>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| s.spawn(|| (0..PER_THREAD).map(|_| seq.next()).collect::<Vec<_>>()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        // Each thread observes its own numbers strictly increasing
        for numbers in &issued {
            assert!(numbers.windows(2).all(|w| w[0] < w[1]));
        }

        let all: HashSet<u64> = issued.into_iter().flatten().collect();
        assert_eq!(all.len(), THREADS * PER_THREAD);
        assert_eq!(seq.last(), (THREADS * PER_THREAD) as u64);
    }
}
