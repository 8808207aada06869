//! gastro 界面层（gastro-ui）
//!
//! 事件总线在界面侧的全部接入点：
//! - 绑定层（`binding`）：组件订阅作用域、单调用点订阅槽、具名发布器；
//! - 通知中心（`notification`）：消费四种提示消息，按种类自动过期；
//! - 调试工具（`devtools`，仅开发构建）：总线调试面板与全局句柄。
//!
//! 通知中心与调试面板的计时器运行在挂载时所在的 tokio 运行时上。
//!
pub mod binding;
pub mod config;
#[cfg(feature = "devtools")]
pub mod devtools;
pub mod error;
pub mod notification;

pub use binding::{EventEmitter, EventScope, ListenerSlot};
#[cfg(feature = "devtools")]
pub use config::InspectorConfig;
pub use config::NotificationConfig;
#[cfg(feature = "devtools")]
pub use devtools::{EventBusInspector, InspectorSnapshot};
pub use error::{UiError, UiResult};
pub use notification::{Notification, NotificationCenter, NotificationKind};
