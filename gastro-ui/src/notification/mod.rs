//! 通知消费者（Notification Consumer）
//!
//! 订阅四种提示消息，每条消息生成一条独立的通知，按到达顺序堆叠展示。
//! 每条通知的生命周期：`创建 → 可见 → (过期 | 关闭) → 移除`，
//! 过期计时器各自独立，不合并重复消息。
//!
mod center;

pub use center::NotificationCenter;

use chrono::{DateTime, Utc};
use gastro_events::{AppEvent, AppEventKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl NotificationKind {
    pub const ALL: [NotificationKind; 4] = [
        NotificationKind::Success,
        NotificationKind::Error,
        NotificationKind::Warning,
        NotificationKind::Info,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Warning => "warning",
            NotificationKind::Info => "info",
        }
    }

    /// 对应的总线事件种类
    pub fn event_kind(self) -> AppEventKind {
        match self {
            NotificationKind::Success => AppEventKind::SuccessMessage,
            NotificationKind::Error => AppEventKind::ErrorOccurred,
            NotificationKind::Warning => AppEventKind::WarningMessage,
            NotificationKind::Info => AppEventKind::InfoMessage,
        }
    }

    fn icon(self) -> char {
        match self {
            NotificationKind::Success => '✔',
            NotificationKind::Error => '✖',
            NotificationKind::Warning => '⚠',
            NotificationKind::Info => 'ℹ',
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一条通知，仅由通知中心持有
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    pub source_component: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// 从提示消息事件生成通知，其他种类返回 `None`
    pub fn from_event(event: &AppEvent) -> Option<Self> {
        let (kind, message, component, details) = match event {
            AppEvent::SuccessMessage(p) => (NotificationKind::Success, &p.message, &p.component, None),
            AppEvent::ErrorOccurred(p) => (
                NotificationKind::Error,
                &p.message,
                &p.component,
                p.details.clone(),
            ),
            AppEvent::WarningMessage(p) => (NotificationKind::Warning, &p.message, &p.component, None),
            AppEvent::InfoMessage(p) => (NotificationKind::Info, &p.message, &p.component, None),
            _ => return None,
        };

        Some(Self {
            id: Uuid::new_v4(),
            kind,
            message: message.clone(),
            source_component: component.clone(),
            details,
            created_at: Utc::now(),
        })
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.kind.icon(), self.message, self.source_component)?;
        if let Some(details) = &self.details {
            write!(f, ": {details}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gastro_events::taxonomy::{DataRefreshRequested, ErrorOccurred, SuccessMessage};

    #[test]
    fn message_events_map_to_notifications() {
        let event = AppEvent::from(ErrorOccurred {
            message: "Speichern fehlgeschlagen".into(),
            component: "Personal".into(),
            details: Some("409 conflict".into()),
        });
        let n = Notification::from_event(&event).unwrap();
        assert_eq!(n.kind, NotificationKind::Error);
        assert_eq!(n.source_component, "Personal");
        assert_eq!(n.to_string(), "✖ Speichern fehlgeschlagen (Personal): 409 conflict");
    }

    #[test]
    fn non_message_events_are_ignored() {
        let event = AppEvent::from(DataRefreshRequested {
            scope: "all".into(),
            reason: None,
        });
        assert!(Notification::from_event(&event).is_none());
    }

    #[test]
    fn every_notification_kind_maps_to_a_message_kind() {
        for kind in NotificationKind::ALL {
            assert!(kind.event_kind().is_message());
        }
        let event = AppEvent::from(SuccessMessage {
            message: "ok".into(),
            component: "c".into(),
        });
        let a = Notification::from_event(&event).unwrap();
        let b = Notification::from_event(&event).unwrap();
        assert_ne!(a.id, b.id);
    }
}
