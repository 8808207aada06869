use crate::error::{UiError, UiResult};
use crate::notification::NotificationKind;
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 通知自动过期时长（毫秒），按消息种类区分
#[derive(Builder, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    #[builder(default = 5000)]
    pub success_ms: u64,
    #[builder(default = 7000)]
    pub error_ms: u64,
    #[builder(default = 6000)]
    pub warning_ms: u64,
    #[builder(default = 4000)]
    pub info_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            success_ms: 5000,
            error_ms: 7000,
            warning_ms: 6000,
            info_ms: 4000,
        }
    }
}

impl NotificationConfig {
    pub fn ttl(&self, kind: NotificationKind) -> Duration {
        let ms = match kind {
            NotificationKind::Success => self.success_ms,
            NotificationKind::Error => self.error_ms,
            NotificationKind::Warning => self.warning_ms,
            NotificationKind::Info => self.info_ms,
        };
        Duration::from_millis(ms)
    }

    pub fn validate(&self) -> UiResult<()> {
        for kind in NotificationKind::ALL {
            if self.ttl(kind).is_zero() {
                return Err(UiError::InvalidConfig {
                    reason: format!("{kind} notification ttl must be greater than 0ms"),
                });
            }
        }
        Ok(())
    }
}

/// 调试面板配置
#[cfg(feature = "devtools")]
#[derive(Builder, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectorConfig {
    /// 自动刷新的轮询间隔
    #[builder(default = 1000)]
    pub poll_interval_ms: u64,
    /// 面板展示的最近历史条数
    #[builder(default = 20)]
    pub max_entries: usize,
    /// 初始是否可见
    #[builder(default)]
    pub visible: bool,
    #[builder(default = true)]
    pub auto_refresh: bool,
}

#[cfg(feature = "devtools")]
impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            max_entries: 20,
            visible: false,
            auto_refresh: true,
        }
    }
}

#[cfg(feature = "devtools")]
impl InspectorConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn validate(&self) -> UiResult<()> {
        if self.poll_interval_ms == 0 {
            return Err(UiError::InvalidConfig {
                reason: "poll_interval_ms must be greater than 0".to_string(),
            });
        }
        if self.max_entries == 0 {
            return Err(UiError::InvalidConfig {
                reason: "max_entries must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_defaults_follow_message_severity() {
        let cfg = NotificationConfig::default();
        assert_eq!(cfg, NotificationConfig::builder().build());
        assert_eq!(cfg.ttl(NotificationKind::Success), Duration::from_secs(5));
        assert_eq!(cfg.ttl(NotificationKind::Error), Duration::from_secs(7));
        assert_eq!(cfg.ttl(NotificationKind::Warning), Duration::from_secs(6));
        assert_eq!(cfg.ttl(NotificationKind::Info), Duration::from_secs(4));
    }

    #[test]
    fn zero_ttl_is_rejected() {
        let cfg = NotificationConfig::builder().warning_ms(0).build();
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, UiError::InvalidConfig { ref reason } if reason.contains("warning")));
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let cfg: NotificationConfig = serde_json::from_str(r#"{"info_ms": 1500}"#).unwrap();
        assert_eq!(cfg.info_ms, 1500);
        assert_eq!(cfg.error_ms, 7000);
    }

    #[cfg(feature = "devtools")]
    #[test]
    fn inspector_defaults_and_validation() {
        let cfg = InspectorConfig::default();
        assert_eq!(cfg, InspectorConfig::builder().build());
        assert_eq!(cfg.poll_interval(), Duration::from_secs(1));
        assert!(cfg.auto_refresh);
        assert!(!cfg.visible);

        let bad = InspectorConfig::builder().poll_interval_ms(0).build();
        assert!(bad.validate().is_err());

        let empty = InspectorConfig::builder().max_entries(0).build();
        let err = empty.validate().unwrap_err();
        assert!(err.to_string().contains("max_entries"));
    }
}
