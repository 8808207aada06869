use gastro_events::{AppEvent, AppEventBus, AppEventKind, EventPayload, Subscription};

struct Bound<D> {
    kind: AppEventKind,
    deps: D,
    subscription: Subscription<AppEvent>,
}

/// 单个调用点的订阅槽（`useEventListener` 语义）
///
/// 组件每次渲染都调用 `sync`：
/// - 首次调用订阅；
/// - 依赖或载荷种类变化时，先退订旧监听器再订阅新的；
/// - 依赖未变时保持原订阅，本次传入的监听器被丢弃。
///
/// 因此同一调用点任何时刻最多只有一个有效订阅，槽被释放时不会留下悬挂监听器。
pub struct ListenerSlot<D> {
    bus: AppEventBus,
    bound: Option<Bound<D>>,
}

impl<D: PartialEq> ListenerSlot<D> {
    pub fn new(bus: &AppEventBus) -> Self {
        Self {
            bus: bus.clone(),
            bound: None,
        }
    }

    /// 按需（重新）订阅，返回本次是否建立了新订阅
    pub fn sync<P, F>(&mut self, deps: D, listener: F) -> bool
    where
        P: EventPayload<AppEvent>,
        F: Fn(&P) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let unchanged = self
            .bound
            .as_ref()
            .is_some_and(|b| b.kind == P::KIND && b.deps == deps && b.subscription.is_active());
        if unchanged {
            return false;
        }

        self.release();
        let subscription = self.bus.on::<P, F>(listener);
        tracing::trace!(kind = %P::KIND, listener = %subscription.id(), "listener slot bound");
        self.bound = Some(Bound {
            kind: P::KIND,
            deps,
            subscription,
        });
        true
    }

    pub fn is_bound(&self) -> bool {
        self.bound
            .as_ref()
            .is_some_and(|b| b.subscription.is_active())
    }

    pub fn kind(&self) -> Option<AppEventKind> {
        self.bound.as_ref().map(|b| b.kind)
    }

    /// 退订当前监听器（组件卸载），空槽时为空操作
    pub fn release(&mut self) {
        if let Some(bound) = self.bound.take() {
            bound.subscription.unsubscribe();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gastro_events::taxonomy::{Employee, EmployeeCreated, EmployeeDeleted};
    use std::sync::{Arc, Mutex};

    fn created(id: &str) -> EmployeeCreated {
        EmployeeCreated {
            employee: Employee {
                id: id.into(),
                first_name: "Anna".into(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn rerender_with_same_deps_keeps_single_subscription() {
        let bus = AppEventBus::new();
        let mut slot = ListenerSlot::new(&bus);

        assert!(slot.sync::<EmployeeCreated, _>("r1", |_| Ok(())));
        assert!(!slot.sync::<EmployeeCreated, _>("r1", |_| Ok(())));
        assert!(!slot.sync::<EmployeeCreated, _>("r1", |_| Ok(())));

        assert_eq!(bus.listener_count(AppEventKind::EmployeeCreated), 1);
    }

    #[test]
    fn changed_deps_resubscribe_with_latest_listener() {
        let bus = AppEventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut slot = ListenerSlot::new(&bus);

        for restaurant in ["r1", "r2"] {
            let sink = seen.clone();
            slot.sync::<EmployeeCreated, _>(restaurant.to_string(), move |p| {
                sink.lock().unwrap().push(format!("{restaurant}:{}", p.employee.id));
                Ok(())
            });
        }

        bus.publish(created("7"));
        assert_eq!(*seen.lock().unwrap(), vec!["r2:7"]);
        assert_eq!(bus.listener_count(AppEventKind::EmployeeCreated), 1);
    }

    #[test]
    fn switching_kind_moves_the_subscription() {
        let bus = AppEventBus::new();
        let mut slot = ListenerSlot::new(&bus);
        slot.sync::<EmployeeCreated, _>((), |_| Ok(()));
        assert!(slot.sync::<EmployeeDeleted, _>((), |_| Ok(())));

        assert_eq!(slot.kind(), Some(AppEventKind::EmployeeDeleted));
        assert_eq!(bus.listener_count(AppEventKind::EmployeeCreated), 0);
        assert_eq!(bus.listener_count(AppEventKind::EmployeeDeleted), 1);
    }

    #[test]
    fn release_and_drop_leave_no_listener() {
        let bus = AppEventBus::new();
        let mut slot = ListenerSlot::new(&bus);
        slot.sync::<EmployeeCreated, _>(1, |_| Ok(()));
        slot.release();
        slot.release();
        assert!(!slot.is_bound());
        assert_eq!(bus.stats().total_listener_count, 0);

        slot.sync::<EmployeeCreated, _>(1, |_| Ok(()));
        drop(slot);
        assert_eq!(bus.stats().total_listener_count, 0);
    }

    #[test]
    fn externally_cleared_slot_rebinds_on_next_render() {
        let bus = AppEventBus::new();
        let mut slot = ListenerSlot::new(&bus);
        slot.sync::<EmployeeCreated, _>(1, |_| Ok(()));
        bus.remove_all_listeners();

        assert!(slot.sync::<EmployeeCreated, _>(1, |_| Ok(())));
        assert_eq!(bus.listener_count(AppEventKind::EmployeeCreated), 1);
    }
}
