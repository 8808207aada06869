use super::Shared;
use crate::event::BusEvent;
use std::fmt;
use std::sync::Weak;

/// 注册项标识，每次订阅分配一个新值
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub(crate) u64);

impl ListenerId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 订阅句柄：释放即退订
///
/// - `unsubscribe()` 幂等，重复调用或监听器已被移除时为空操作；
/// - `Drop` 时自动退订，保证所有退出路径都会从注册表移除；
/// - `detach()` 放弃句柄但保留监听器，直到总线被销毁或 `remove_all_listeners`。
///   监听器若捕获了总线句柄（或 `EventEmitter`）会与注册表形成 `Arc` 环，
///   总线不会被销毁，只能靠 `unsubscribe(kind, &listener)` 或 `remove_all_listeners` 移除。
///
/// 只持有总线的弱引用，句柄不会延长总线的生命周期。
#[must_use = "dropping a Subscription unsubscribes its listener immediately"]
pub struct Subscription<E: BusEvent> {
    shared: Weak<Shared<E>>,
    kind: E::Kind,
    id: ListenerId,
}

impl<E: BusEvent> Subscription<E> {
    pub(crate) fn new(shared: Weak<Shared<E>>, kind: E::Kind, id: ListenerId) -> Self {
        Self { shared, kind, id }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }

    pub fn kind(&self) -> E::Kind {
        self.kind
    }

    /// 监听器是否仍在注册表中
    pub fn is_active(&self) -> bool {
        self.shared
            .upgrade()
            .is_some_and(|shared| shared.contains(self.kind, self.id))
    }

    /// 移除本句柄对应的注册项，返回本次调用是否真正移除
    pub fn unsubscribe(&self) -> bool {
        match self.shared.upgrade() {
            Some(shared) => shared.remove(self.kind, self.id),
            None => false,
        }
    }

    pub fn detach(mut self) {
        self.shared = Weak::new();
    }
}

impl<E: BusEvent> Drop for Subscription<E> {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl<E: BusEvent> fmt::Debug for Subscription<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("kind", &self.kind)
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
