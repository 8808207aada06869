use super::EventEmitter;
use gastro_events::{AppEvent, AppEventBus, AppEventKind, EventPayload, ListenerId, Subscription};

/// 组件订阅作用域
///
/// 记录本作用域创建的每一个订阅，`teardown()` 时逐个退订且只执行一次；
/// `Drop` 同样会拆除，因此组件在任何事件到达前卸载也不会留下监听器。
pub struct EventScope {
    bus: AppEventBus,
    component: String,
    subscriptions: Vec<Subscription<AppEvent>>,
    torn_down: bool,
}

impl EventScope {
    pub fn new(bus: &AppEventBus, component: impl Into<String>) -> Self {
        Self {
            bus: bus.clone(),
            component: component.into(),
            subscriptions: Vec::new(),
            torn_down: false,
        }
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn bus(&self) -> &AppEventBus {
        &self.bus
    }

    /// 按载荷类型订阅；作用域已拆除时返回 `None`
    pub fn listen<P, F>(&mut self, listener: F) -> Option<ListenerId>
    where
        P: EventPayload<AppEvent>,
        F: Fn(&P) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        if self.rejects(P::KIND) {
            return None;
        }
        let sub = self.bus.on::<P, F>(listener);
        Some(self.track(sub))
    }

    /// 订阅某种类的原始事件
    pub fn listen_kind<F>(&mut self, kind: AppEventKind, listener: F) -> Option<ListenerId>
    where
        F: Fn(&AppEvent) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        if self.rejects(kind) {
            return None;
        }
        let sub = self.bus.subscribe(kind, listener);
        Some(self.track(sub))
    }

    /// 以本组件名作为消息来源的发布器
    pub fn emitter(&self) -> EventEmitter {
        EventEmitter::new(&self.bus, self.component.clone())
    }

    /// 仍在注册表中的订阅数
    pub fn active(&self) -> usize {
        self.subscriptions.iter().filter(|s| s.is_active()).count()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// 释放全部订阅，返回本次真正移除的数量；重复调用为空操作
    pub fn teardown(&mut self) -> usize {
        if self.torn_down {
            return 0;
        }
        self.torn_down = true;

        let released = self
            .subscriptions
            .drain(..)
            .filter(|sub| sub.unsubscribe())
            .count();
        tracing::debug!(component = %self.component, released, "event scope torn down");
        released
    }

    fn rejects(&self, kind: AppEventKind) -> bool {
        if self.torn_down {
            tracing::warn!(
                component = %self.component,
                %kind,
                "subscribe on a torn-down event scope ignored"
            );
        }
        self.torn_down
    }

    fn track(&mut self, sub: Subscription<AppEvent>) -> ListenerId {
        let id = sub.id();
        self.subscriptions.push(sub);
        id
    }
}

impl Drop for EventScope {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for EventScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventScope")
            .field("component", &self.component)
            .field("subscriptions", &self.subscriptions.len())
            .field("torn_down", &self.torn_down)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gastro_events::taxonomy::{DataRefreshRequested, InfoMessage};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn teardown_releases_every_subscription_once() {
        let bus = AppEventBus::new();
        let mut scope = EventScope::new(&bus, "Inventar");
        scope.listen::<InfoMessage, _>(|_| Ok(()));
        scope.listen::<DataRefreshRequested, _>(|_| Ok(()));
        scope.listen_kind(AppEventKind::PurchaseCreated, |_| Ok(()));
        assert_eq!(scope.active(), 3);
        assert_eq!(bus.stats().total_listener_count, 3);

        assert_eq!(scope.teardown(), 3);
        assert_eq!(scope.teardown(), 0);
        assert_eq!(bus.stats().total_listener_count, 0);
    }

    #[test]
    fn torn_down_scope_ignores_new_subscriptions() {
        let bus = AppEventBus::new();
        let mut scope = EventScope::new(&bus, "Personal");
        scope.teardown();

        assert!(scope.listen::<InfoMessage, _>(|_| Ok(())).is_none());
        assert_eq!(bus.listener_count(AppEventKind::InfoMessage), 0);
    }

    #[test]
    fn dropping_scope_tears_down() {
        let bus = AppEventBus::new();
        let hits = Arc::new(AtomicUsize::new(0));
        {
            let mut scope = EventScope::new(&bus, "Kalender");
            let counter = hits.clone();
            scope.listen::<DataRefreshRequested, _>(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            });
        }

        bus.publish(DataRefreshRequested {
            scope: "calendar".into(),
            reason: None,
        });
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn externally_removed_listeners_are_not_counted_twice() {
        let bus = AppEventBus::new();
        let mut scope = EventScope::new(&bus, "Konten");
        scope.listen::<InfoMessage, _>(|_| Ok(()));
        scope.listen::<InfoMessage, _>(|_| Ok(()));

        bus.remove_all_listeners();
        assert_eq!(scope.active(), 0);
        assert_eq!(scope.teardown(), 0);
    }
}
