use super::{Notification, NotificationKind};
use crate::binding::EventScope;
use crate::config::NotificationConfig;
use crate::error::{UiError, UiResult};
use dashmap::DashMap;
use gastro_events::{AppEvent, AppEventBus, AppEventKind};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::runtime::Handle;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

struct Inner {
    config: NotificationConfig,
    runtime: Handle,
    /// 按到达顺序堆叠
    stack: Mutex<Vec<Notification>>,
    /// 每条通知独立的过期计时器
    timers: DashMap<Uuid, CancellationToken>,
    token: CancellationToken,
}

impl Inner {
    fn admit(self: &Arc<Self>, event: &AppEvent) {
        let Some(notification) = Notification::from_event(event) else {
            return;
        };
        let id = notification.id;
        let ttl = self.config.ttl(notification.kind);
        let deadline = Instant::now() + ttl;
        let token = self.token.child_token();

        tracing::debug!(%id, kind = %notification.kind, ?ttl, "notification shown");
        self.timers.insert(id, token.clone());
        lock(&self.stack).push(notification);

        let inner = Arc::downgrade(self);
        self.runtime.spawn(expire_at(inner, id, deadline, token));
    }

    fn remove(&self, id: Uuid, cause: &'static str) -> bool {
        if let Some((_, timer)) = self.timers.remove(&id) {
            timer.cancel();
        }

        let mut stack = lock(&self.stack);
        let Some(pos) = stack.iter().position(|n| n.id == id) else {
            return false;
        };
        stack.remove(pos);
        tracing::debug!(%id, cause, "notification removed");
        true
    }
}

async fn expire_at(inner: Weak<Inner>, id: Uuid, deadline: Instant, token: CancellationToken) {
    tokio::select! {
        _ = token.cancelled() => {}
        _ = time::sleep_until(deadline) => {
            if let Some(inner) = inner.upgrade() {
                inner.remove(id, "expired");
            }
        }
    }
}

/// 通知中心：全局提示消息的消费者
///
/// - `mount` 时捕获当前 tokio 运行时并订阅四种提示消息；
/// - 每条通知按种类设置过期时长（成功 5s、错误 7s、警告 6s、信息 4s），计时器相互独立；
/// - 过期与手动关闭走同一条移除路径，对同一 id 幂等；
/// - 释放时退订并取消全部未到期的计时器。
pub struct NotificationCenter {
    inner: Arc<Inner>,
    scope: EventScope,
}

impl NotificationCenter {
    pub fn mount(bus: &AppEventBus, config: NotificationConfig) -> UiResult<Self> {
        config.validate()?;
        let runtime = Handle::try_current().map_err(|_| UiError::NoRuntime {
            component: "NotificationCenter",
        })?;

        let inner = Arc::new(Inner {
            config,
            runtime,
            stack: Mutex::new(Vec::new()),
            timers: DashMap::new(),
            token: CancellationToken::new(),
        });

        let mut scope = EventScope::new(bus, "NotificationCenter");
        for kind in AppEventKind::MESSAGES {
            let inner = inner.clone();
            scope.listen_kind(kind, move |event| {
                inner.admit(event);
                Ok(())
            });
        }

        Ok(Self { inner, scope })
    }

    /// 用户关闭某条通知；已移除的 id 为空操作，返回 false
    pub fn dismiss(&self, id: Uuid) -> bool {
        self.inner.remove(id, "dismissed")
    }

    /// 关闭全部通知
    pub fn dismiss_all(&self) -> usize {
        let ids: Vec<Uuid> = lock(&self.inner.stack).iter().map(|n| n.id).collect();
        ids.into_iter()
            .filter(|id| self.inner.remove(*id, "dismissed"))
            .count()
    }

    /// 当前可见的通知快照，按到达顺序
    pub fn notifications(&self) -> Vec<Notification> {
        lock(&self.inner.stack).clone()
    }

    pub fn len(&self) -> usize {
        lock(&self.inner.stack).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn count_of(&self, kind: NotificationKind) -> usize {
        lock(&self.inner.stack)
            .iter()
            .filter(|n| n.kind == kind)
            .count()
    }

    pub fn config(&self) -> &NotificationConfig {
        &self.inner.config
    }

    /// 渲染为堆叠的文本行，每行一条通知
    pub fn render(&self) -> String {
        lock(&self.inner.stack)
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// 是否仍在订阅
    pub fn is_mounted(&self) -> bool {
        !self.scope.is_torn_down()
    }

    /// 卸载：退订并取消全部计时器，已显示的通知保留在快照中
    pub fn unmount(&mut self) {
        self.scope.teardown();
        self.inner.token.cancel();
        self.inner.timers.clear();
    }
}

impl Drop for NotificationCenter {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl std::fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("config", &self.inner.config)
            .field("visible", &self.len())
            .field("mounted", &self.is_mounted())
            .finish()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
