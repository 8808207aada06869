//! 事件总线调试面板（EventBusInspector）
//!
//! 可见且开启自动刷新时，按固定间隔轮询 `stats()` 与 `recent()` 并刷新快照；
//! 隐藏或关闭自动刷新时停止轮询任务，面板不再产生任何开销。
//!
use crate::config::InspectorConfig;
use crate::error::{UiError, UiResult};
use chrono::{DateTime, Utc};
use gastro_events::{AppEvent, AppEventBus, AppEventKind, EventBusStats, HistoryEntry};
use std::fmt::Write as _;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// 一次轮询得到的只读快照
#[derive(Debug, Clone)]
pub struct InspectorSnapshot {
    pub stats: EventBusStats<AppEventKind>,
    /// 最近的历史，新的在前
    pub recent: Vec<HistoryEntry<AppEvent>>,
    pub taken_at: DateTime<Utc>,
}

impl InspectorSnapshot {
    fn capture(bus: &AppEventBus, max_entries: usize) -> Self {
        Self {
            stats: bus.stats(),
            recent: bus.recent(max_entries),
            taken_at: Utc::now(),
        }
    }
}

#[derive(Default)]
struct PanelState {
    snapshot: Option<InspectorSnapshot>,
    refreshes: u64,
}

struct Poller {
    token: CancellationToken,
    task: JoinHandle<()>,
}

pub struct EventBusInspector {
    bus: AppEventBus,
    config: InspectorConfig,
    runtime: Handle,
    visible: bool,
    auto_refresh: bool,
    state: Arc<Mutex<PanelState>>,
    poller: Option<Poller>,
}

impl EventBusInspector {
    /// 挂载面板；初始可见且自动刷新时立即开始轮询
    pub fn mount(bus: &AppEventBus, config: InspectorConfig) -> UiResult<Self> {
        config.validate()?;
        let runtime = Handle::try_current().map_err(|_| UiError::NoRuntime {
            component: "EventBusInspector",
        })?;

        let mut inspector = Self {
            bus: bus.clone(),
            visible: config.visible,
            auto_refresh: config.auto_refresh,
            config,
            runtime,
            state: Arc::new(Mutex::new(PanelState::default())),
            poller: None,
        };
        inspector.reconcile();
        Ok(inspector)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn auto_refresh(&self) -> bool {
        self.auto_refresh
    }

    /// 轮询任务是否在运行
    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(|p| !p.task.is_finished())
    }

    /// 切换可见性，返回切换后的状态
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.reconcile();
        self.visible
    }

    pub fn show(&mut self) {
        self.visible = true;
        self.reconcile();
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.reconcile();
    }

    pub fn set_auto_refresh(&mut self, enabled: bool) {
        self.auto_refresh = enabled;
        self.reconcile();
    }

    /// 立即刷新一次快照（手动刷新按钮）
    pub fn refresh(&self) {
        refresh(&self.bus, &self.state, self.config.max_entries);
    }

    pub fn snapshot(&self) -> Option<InspectorSnapshot> {
        lock(&self.state).snapshot.clone()
    }

    /// 累计刷新次数（手动与轮询）
    pub fn refresh_count(&self) -> u64 {
        lock(&self.state).refreshes
    }

    /// 渲染面板文本；隐藏时不渲染任何内容
    pub fn render(&self) -> Option<String> {
        if !self.visible {
            return None;
        }
        if lock(&self.state).snapshot.is_none() {
            self.refresh();
        }
        let state = lock(&self.state);
        state.snapshot.as_ref().map(render_snapshot)
    }

    // 可见且自动刷新 <=> 轮询任务存在
    fn reconcile(&mut self) {
        let wanted = self.visible && self.auto_refresh;
        match (wanted, self.poller.is_some()) {
            (true, false) => self.start(),
            (false, true) => self.stop(),
            _ => {}
        }
    }

    fn start(&mut self) {
        let token = CancellationToken::new();
        let interval = self.config.poll_interval();
        let bus = self.bus.clone();
        let state = self.state.clone();
        let max_entries = self.config.max_entries;
        let cancel = token.clone();

        let task = self.runtime.spawn(async move {
            let mut ticker = time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => refresh(&bus, &state, max_entries),
                }
            }
        });

        tracing::debug!(?interval, "inspector polling started");
        self.poller = Some(Poller { token, task });
    }

    fn stop(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.token.cancel();
            tracing::debug!("inspector polling stopped");
        }
    }
}

impl Drop for EventBusInspector {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for EventBusInspector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBusInspector")
            .field("config", &self.config)
            .field("visible", &self.visible)
            .field("auto_refresh", &self.auto_refresh)
            .field("polling", &self.poller.is_some())
            .finish()
    }
}

fn refresh(bus: &AppEventBus, state: &Mutex<PanelState>, max_entries: usize) {
    // 先在锁外取快照，总线与面板的锁互不嵌套
    let snapshot = InspectorSnapshot::capture(bus, max_entries);
    let mut state = lock(state);
    state.snapshot = Some(snapshot);
    state.refreshes += 1;
}

fn render_snapshot(snapshot: &InspectorSnapshot) -> String {
    let stats = &snapshot.stats;
    let mut out = format!(
        "EventBus | listeners {} | history {}/{} | failed {}\n",
        stats.total_listener_count,
        stats.history_length,
        stats.history_capacity,
        stats.failed_invocations,
    );

    if !stats.listener_count_by_kind.is_empty() {
        out.push_str("listeners:\n");
        for (kind, count) in &stats.listener_count_by_kind {
            let _ = writeln!(out, "  {kind} x{count}");
        }
    }

    out.push_str("recent:\n");
    if snapshot.recent.is_empty() {
        out.push_str("  (no events)\n");
    }
    for entry in &snapshot.recent {
        let _ = writeln!(
            out,
            "  #{} {} {}",
            entry.seq(),
            entry.timestamp().format("%H:%M:%S%.3f"),
            entry.kind()
        );
    }
    out
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
