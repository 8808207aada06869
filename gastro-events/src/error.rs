//! 事件子系统统一错误定义
//!
use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum EventError {
    #[error("unknown event kind: {kind}")]
    UnknownKind { kind: String },

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },

    // --- 监听器执行失败（只记录日志，不会从 emit 向外传播） ---
    #[error("event listener failed: kind={kind}, listener={listener}, reason={reason}")]
    ListenerFailed {
        kind: String,
        listener: u64,
        reason: String,
    },
    #[error("event listener panicked: kind={kind}, listener={listener}, reason={reason}")]
    ListenerPanicked {
        kind: String,
        listener: u64,
        reason: String,
    },
}

/// 统一 Result 类型别名
pub type EventResult<T> = Result<T, EventError>;
