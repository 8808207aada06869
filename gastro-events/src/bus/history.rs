use crate::config::DEFAULT_HISTORY_CAPACITY;
use crate::event::BusEvent;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;

/// 一条发布记录
#[derive(Debug, Clone)]
pub struct HistoryEntry<E: BusEvent> {
    seq: u64,
    kind: E::Kind,
    event: E,
    timestamp: DateTime<Utc>,
}

impl<E: BusEvent> HistoryEntry<E> {
    /// 总线内严格递增的序号，可用于发现被淘汰的缺口
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn kind(&self) -> E::Kind {
        self.kind
    }

    pub fn event(&self) -> &E {
        &self.event
    }

    pub fn timestamp(&self) -> &DateTime<Utc> {
        &self.timestamp
    }
}

/// 有界 FIFO：写满后每次追加先淘汰最旧的一条
pub(crate) struct History<E: BusEvent> {
    entries: VecDeque<HistoryEntry<E>>,
    capacity: usize,
    next_seq: u64,
}

impl<E: BusEvent> History<E> {
    pub(crate) fn new(capacity: usize) -> Self {
        // 容量来自配置，只预分配默认大小，其余按需增长
        Self {
            entries: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY)),
            capacity,
            next_seq: 0,
        }
    }

    /// 追加并返回分配的序号
    pub(crate) fn push(&mut self, event: E) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;

        // 墙钟可能回拨，时间戳按上一条取大，保持单调
        let mut timestamp = Utc::now();
        if let Some(last) = self.entries.back() {
            timestamp = timestamp.max(last.timestamp);
        }

        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(HistoryEntry {
            seq,
            kind: event.kind(),
            event,
            timestamp,
        });
        seq
    }

    pub(crate) fn snapshot(&self) -> Vec<HistoryEntry<E>> {
        self.entries.iter().cloned().collect()
    }

    /// 最近 `n` 条，新的在前
    pub(crate) fn recent(&self, n: usize) -> Vec<HistoryEntry<E>> {
        self.entries.iter().rev().take(n).cloned().collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::{AppEvent, DataRefreshRequested};

    fn refresh(scope: &str) -> AppEvent {
        AppEvent::DataRefreshRequested(DataRefreshRequested {
            scope: scope.to_string(),
            reason: None,
        })
    }

    fn scope_of(entry: &HistoryEntry<AppEvent>) -> &str {
        match entry.event() {
            AppEvent::DataRefreshRequested(p) => &p.scope,
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn evicts_oldest_once_full() {
        let mut history = History::<AppEvent>::new(3);
        for i in 0..5 {
            history.push(refresh(&format!("s{i}")));
        }

        let entries = history.snapshot();
        assert_eq!(entries.len(), 3);
        let scopes: Vec<&str> = entries.iter().map(scope_of).collect();
        assert_eq!(scopes, vec!["s2", "s3", "s4"]);
        assert_eq!(entries[0].seq(), 2);
        assert_eq!(entries[2].seq(), 4);
    }

    #[test]
    fn recent_is_newest_first_and_bounded() {
        let mut history = History::<AppEvent>::new(10);
        for i in 0..4 {
            history.push(refresh(&format!("s{i}")));
        }

        let recent = history.recent(2);
        let scopes: Vec<&str> = recent.iter().map(scope_of).collect();
        assert_eq!(scopes, vec!["s3", "s2"]);
        assert_eq!(history.recent(50).len(), 4);
    }

    #[test]
    fn huge_capacity_allocates_lazily() {
        let mut history = History::<AppEvent>::new(usize::MAX);
        assert_eq!(history.capacity(), usize::MAX);
        for i in 0..3 {
            history.push(refresh(&format!("s{i}")));
        }
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn timestamps_never_go_backwards() {
        let mut history = History::<AppEvent>::new(50);
        for i in 0..50 {
            history.push(refresh(&format!("s{i}")));
        }
        let entries = history.snapshot();
        assert!(entries.windows(2).all(|w| w[0].timestamp() <= w[1].timestamp()));
        assert!(entries.windows(2).all(|w| w[0].seq() < w[1].seq()));
    }
}
