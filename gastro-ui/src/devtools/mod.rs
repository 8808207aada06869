//! 开发期调试工具
//!
//! 仅在 `devtools` 特性下编译；生产构建关闭该特性后，本模块不存在任何代码与运行时开销。
//!
mod global;
mod inspector;

pub use global::{expose, exposed};
pub use inspector::{EventBusInspector, InspectorSnapshot};
