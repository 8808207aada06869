//! 运行配置：`GASTRO_CONFIG` 指向的 JSON 文件，再叠加 `GASTRO_*` 环境变量
//!
use anyhow::{Context, Result as AnyResult};
use gastro_events::EventBusConfig;
#[cfg(feature = "devtools")]
use gastro_ui::InspectorConfig;
use gastro_ui::NotificationConfig;
use serde::Deserialize;
use std::str::FromStr;
use std::{env, fs};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub bus: EventBusConfig,
    pub notifications: NotificationConfig,
    #[cfg(feature = "devtools")]
    pub inspector: InspectorConfig,
}

impl Settings {
    pub fn load() -> AnyResult<Self> {
        let mut settings = match env::var("GASTRO_CONFIG") {
            Ok(path) => {
                let raw = fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config file {path}"))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("failed to parse config file {path}"))?
            }
            Err(_) => Self::default(),
        };

        if let Some(capacity) = env_parse("GASTRO_HISTORY_CAPACITY")? {
            settings.bus.history_capacity = capacity;
        }
        if let Some(debug) = env_parse("GASTRO_DEBUG")? {
            settings.bus.debug = debug;
        }
        if let Some(ms) = env_parse("GASTRO_SUCCESS_MS")? {
            settings.notifications.success_ms = ms;
        }
        if let Some(ms) = env_parse("GASTRO_ERROR_MS")? {
            settings.notifications.error_ms = ms;
        }
        if let Some(ms) = env_parse("GASTRO_WARNING_MS")? {
            settings.notifications.warning_ms = ms;
        }
        if let Some(ms) = env_parse("GASTRO_INFO_MS")? {
            settings.notifications.info_ms = ms;
        }
        #[cfg(feature = "devtools")]
        {
            if let Some(ms) = env_parse("GASTRO_POLL_INTERVAL_MS")? {
                settings.inspector.poll_interval_ms = ms;
            }
            if let Some(visible) = env_parse("GASTRO_DEVTOOLS_VISIBLE")? {
                settings.inspector.visible = visible;
            }
        }

        Ok(settings)
    }
}

fn env_parse<T>(name: &str) -> AnyResult<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("invalid value for {name}: {raw:?}")),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_sections_default_independently() {
        let settings: Settings =
            serde_json::from_str(r#"{"bus": {"debug": true}, "notifications": {"info_ms": 900}}"#)
                .unwrap();
        assert!(settings.bus.debug);
        assert_eq!(settings.bus.history_capacity, 100);
        assert_eq!(settings.notifications.info_ms, 900);
        assert_eq!(settings.notifications.success_ms, 5000);
    }

    #[test]
    fn unset_variable_is_none() {
        let value: Option<u64> = env_parse("GASTRO_TEST_SURELY_UNSET_VARIABLE").unwrap();
        assert_eq!(value, None);
    }
}
