use crate::error::{EventError, EventResult};
use bon::Builder;
use serde::{Deserialize, Serialize};

/// 历史缓冲区的默认容量
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// 事件总线配置
#[derive(Builder, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventBusConfig {
    /// 历史缓冲区容量，写满后每次追加淘汰最旧的一条
    #[builder(default = DEFAULT_HISTORY_CAPACITY)]
    pub history_capacity: usize,
    /// 调试模式：无监听器的发布也会记录 debug 日志
    #[builder(default)]
    pub debug: bool,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            debug: false,
        }
    }
}

impl EventBusConfig {
    pub fn validate(&self) -> EventResult<()> {
        if self.history_capacity == 0 {
            return Err(EventError::InvalidConfig {
                reason: "history_capacity must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
