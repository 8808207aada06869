use gastro_events::AppEventBus;
use std::sync::OnceLock;

static EXPOSED: OnceLock<AppEventBus> = OnceLock::new();

/// 把总线句柄挂到进程级全局位置，供交互式排查使用
///
/// 只能挂载一次，重复调用返回 false 且保留第一次的句柄。
pub fn expose(bus: &AppEventBus) -> bool {
    let fresh = EXPOSED.set(bus.clone()).is_ok();
    if fresh {
        tracing::debug!("event bus exposed for inspection");
    }
    fresh
}

pub fn exposed() -> Option<&'static AppEventBus> {
    EXPOSED.get()
}
