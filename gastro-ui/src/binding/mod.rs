//! 组件绑定层
//!
//! 让界面组件以声明式、无泄漏的方式接入事件总线：
//! - `EventScope`：组件级订阅作用域，拆除时一次性释放它创建的全部订阅；
//! - `ListenerSlot`：单个调用点的订阅槽，依赖变化时先退订再重订，最多持有一个订阅；
//! - `EventEmitter`：每个事件种类一个具名发布方法，集中维护载荷形状。
//!
mod emitter;
mod scope;
mod slot;

pub use emitter::EventEmitter;
pub use scope::EventScope;
pub use slot::ListenerSlot;
