//! gastro 事件总线核心库（gastro-events）
//!
//! 餐厅后台各页面（客户、日历、库存、采购、财务、人事、设置）之间的进程内发布/订阅：
//! - 事件分类（`taxonomy`）：封闭的事件种类集合，每个种类绑定固定的载荷类型；
//! - 事件总线（`bus`）：监听器注册表、同步有序分发、有界历史与统计快照；
//! - 配置（`config`）与统一错误（`error`）。
//!
//! 典型用法：
//! 1. 在组合根创建 `AppEventBus`，把句柄（廉价 `Clone`）传给需要的组件；
//! 2. 组件通过 `on::<Payload>(..)` 订阅，持有返回的 `Subscription`，释放即退订；
//! 3. 生产方在 REST 调用成功后 `publish(payload)`，所有监听器按订阅顺序同步执行。
//!
pub mod bus;
pub mod config;
pub mod error;
pub mod event;
pub mod taxonomy;

pub use bus::{EventBus, EventBusStats, HistoryEntry, Listener, ListenerId, Subscription};
pub use config::EventBusConfig;
pub use event::{BusEvent, EventPayload};
pub use gastro_macros::app_event;
pub use taxonomy::{AppEvent, AppEventKind};

/// 应用内唯一使用的总线类型
pub type AppEventBus = EventBus<AppEvent>;

// 允许在本 crate 内部通过 ::gastro_events 进行自引用，
// 以便 #[app_event] 生成的路径在定义分类的本 crate 中也能解析。
extern crate self as gastro_events;
