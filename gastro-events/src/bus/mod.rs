//! 事件总线（EventBus）
//!
//! 进程内、同步的发布/订阅：
//! - `subscribe` / `on`：把监听器追加到某种类的列表末尾，返回 `Subscription` 句柄；
//! - `emit` / `publish`：先写入有界历史，再按订阅顺序同步调用该种类的全部监听器；
//! - `history` / `recent` / `stats`：只读快照，供调试面板使用。
//!
//! 监听器返回 `Err` 或 panic 只记录日志，不影响其余监听器，也不会从 `emit` 向外传播。
//!
//! 分发时遍历的是注册表的拷贝，锁不会跨监听器调用持有：监听器内部可以安全地
//! 订阅、退订或再次发布。
//!
mod history;
mod registry;
mod subscription;

pub use history::HistoryEntry;
pub use subscription::{ListenerId, Subscription};

use crate::config::EventBusConfig;
use crate::error::{EventError, EventResult};
use crate::event::{BusEvent, EventPayload};
use history::History;
use registry::Registry;
use serde::Serialize;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// 监听器：接收所订阅种类的事件
pub type Listener<E> = Arc<dyn Fn(&E) -> anyhow::Result<()> + Send + Sync>;

/// 总线统计快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventBusStats<K: Ord> {
    pub total_listener_count: usize,
    pub history_length: usize,
    pub history_capacity: usize,
    pub listener_count_by_kind: BTreeMap<K, usize>,
    /// 累计失败（返回 Err 或 panic）的监听器调用次数
    pub failed_invocations: u64,
}

pub(crate) struct Shared<E: BusEvent> {
    config: EventBusConfig,
    registry: Mutex<Registry<E>>,
    history: Mutex<History<E>>,
    next_listener: AtomicU64,
    failed_invocations: AtomicU64,
}

impl<E: BusEvent> Shared<E> {
    pub(crate) fn remove(&self, kind: E::Kind, id: ListenerId) -> bool {
        let removed = lock(&self.registry).remove_by_id(kind, id);
        if removed.is_some() {
            tracing::trace!(%kind, listener = %id, "listener unsubscribed");
        }
        removed.is_some()
    }

    pub(crate) fn contains(&self, kind: E::Kind, id: ListenerId) -> bool {
        lock(&self.registry).contains(kind, id)
    }
}

/// 事件总线句柄，`Clone` 只复制引用，所有克隆共享同一注册表与历史
pub struct EventBus<E: BusEvent> {
    shared: Arc<Shared<E>>,
}

impl<E: BusEvent> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<E: BusEvent> Default for EventBus<E> {
    fn default() -> Self {
        Self::from_valid_config(EventBusConfig::default())
    }
}

impl<E: BusEvent> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EventBusConfig) -> EventResult<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: EventBusConfig) -> Self {
        let history = History::new(config.history_capacity);
        Self {
            shared: Arc::new(Shared {
                config,
                registry: Mutex::new(Registry::default()),
                history: Mutex::new(history),
                next_listener: AtomicU64::new(1),
                failed_invocations: AtomicU64::new(0),
            }),
        }
    }

    pub fn config(&self) -> &EventBusConfig {
        &self.shared.config
    }

    /// 订阅某种类的原始事件
    pub fn subscribe<F>(&self, kind: E::Kind, listener: F) -> Subscription<E>
    where
        F: Fn(&E) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.subscribe_listener(kind, Arc::new(listener))
    }

    /// 订阅一个可共享的监听器；保留同一个 `Listener` 可在之后用 `unsubscribe` 按身份移除
    pub fn subscribe_listener(&self, kind: E::Kind, listener: Listener<E>) -> Subscription<E> {
        let id = ListenerId(self.shared.next_listener.fetch_add(1, Ordering::Relaxed));
        lock(&self.shared.registry).insert(kind, id, listener);
        tracing::trace!(%kind, listener = %id, "listener subscribed");
        Subscription::new(Arc::downgrade(&self.shared), kind, id)
    }

    /// 按载荷类型订阅，监听器直接拿到该种类的载荷
    pub fn on<P, F>(&self, listener: F) -> Subscription<E>
    where
        P: EventPayload<E>,
        F: Fn(&P) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.subscribe(P::KIND, move |event: &E| match P::from_event(event) {
            Some(payload) => listener(payload),
            None => Ok(()),
        })
    }

    /// 按引用身份移除该种类下第一个匹配的监听器，未找到为空操作
    pub fn unsubscribe(&self, kind: E::Kind, listener: &Listener<E>) -> bool {
        let removed = lock(&self.shared.registry).remove_by_listener(kind, listener);
        if let Some((id, _)) = &removed {
            tracing::trace!(%kind, listener = %id, "listener unsubscribed");
        }
        removed.is_some()
    }

    /// 发布事件：写入历史后同步调用该种类的全部监听器，全部执行完才返回
    pub fn emit(&self, event: E) {
        let kind = event.kind();
        let seq = lock(&self.shared.history).push(event.clone());
        let listeners = lock(&self.shared.registry).snapshot(kind);

        if listeners.is_empty() {
            if self.shared.config.debug {
                tracing::debug!(%kind, seq, "event emitted without listeners");
            }
            return;
        }

        tracing::trace!(%kind, seq, listeners = listeners.len(), "dispatching event");
        for (id, listener) in listeners {
            self.invoke(kind, id, &listener, &event);
        }
    }

    /// 按载荷发布，种类由载荷类型决定
    pub fn publish<P: EventPayload<E>>(&self, payload: P) {
        self.emit(payload.into_event());
    }

    fn invoke(&self, kind: E::Kind, id: ListenerId, listener: &Listener<E>, event: &E) {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| listener(event)));
        let failure = match outcome {
            Ok(Ok(())) => return,
            Ok(Err(err)) => EventError::ListenerFailed {
                kind: kind.to_string(),
                listener: id.get(),
                reason: format!("{err:#}"),
            },
            Err(payload) => EventError::ListenerPanicked {
                kind: kind.to_string(),
                listener: id.get(),
                reason: panic_message(payload.as_ref()),
            },
        };

        self.shared
            .failed_invocations
            .fetch_add(1, Ordering::Relaxed);
        tracing::error!(error = %failure, "listener failed, continuing with remaining listeners");
    }

    /// 历史快照，旧的在前
    pub fn history(&self) -> Vec<HistoryEntry<E>> {
        lock(&self.shared.history).snapshot()
    }

    /// 最近 `n` 条历史，新的在前
    pub fn recent(&self, n: usize) -> Vec<HistoryEntry<E>> {
        lock(&self.shared.history).recent(n)
    }

    pub fn listener_count(&self, kind: E::Kind) -> usize {
        lock(&self.shared.registry).count(kind)
    }

    pub fn stats(&self) -> EventBusStats<E::Kind> {
        // 固定先注册表后历史的加锁顺序；emit 不会同时持有两把锁
        let registry = lock(&self.shared.registry);
        let history = lock(&self.shared.history);
        EventBusStats {
            total_listener_count: registry.total(),
            history_length: history.len(),
            history_capacity: history.capacity(),
            listener_count_by_kind: registry.counts_by_kind(),
            failed_invocations: self.shared.failed_invocations.load(Ordering::Relaxed),
        }
    }

    /// 清空全部种类的监听器（用于拆除与测试），不清空历史
    pub fn remove_all_listeners(&self) {
        let removed = lock(&self.shared.registry).clear();
        tracing::debug!(removed = removed.len(), "all listeners removed");
    }
}

impl<E: BusEvent> fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("config", &self.shared.config)
            .field("listeners", &lock(&self.shared.registry).total())
            .field("history", &lock(&self.shared.history).len())
            .finish()
    }
}

// 锁内只做簿记，监听器不在锁内执行，中毒时直接取回数据
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
