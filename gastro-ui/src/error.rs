//! 界面层统一错误定义
//!
use gastro_events::error::EventError;

#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum UiError {
    #[error("event bus: {0}")]
    Event(#[from] EventError),

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },

    /// 计时器与轮询依赖 tokio 运行时，挂载时必须位于运行时上下文中
    #[error("no tokio runtime available: {component} must be mounted inside a runtime")]
    NoRuntime { component: &'static str },
}

/// 统一 Result 类型别名
pub type UiResult<T> = Result<T, UiError>;
