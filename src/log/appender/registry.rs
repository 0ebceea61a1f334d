// Appender 类型注册表

use crate::cfg::TypeOptions;
use crate::log::appender::{ConsoleAppender, ConsoleAppenderConfig, LogAppender};
use crate::log::error::LogError;
use anyhow::Result;
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

// 构造函数类型：从 options 构造输出器
type Constructor = Box<dyn Fn(JsonValue) -> Result<Arc<dyn LogAppender>> + Send + Sync>;

// 全局注册表，预置 ConsoleAppender
static REGISTRY: Lazy<RwLock<HashMap<String, Constructor>>> = Lazy::new(|| {
    let mut registry = HashMap::new();
    registry.insert(
        "ConsoleAppender".to_string(),
        constructor::<ConsoleAppender, ConsoleAppenderConfig>(),
    );
    RwLock::new(registry)
});

fn constructor<T, Config>() -> Constructor
where
    T: LogAppender + From<Config> + 'static,
    Config: DeserializeOwned + 'static,
{
    Box::new(|value| {
        let config: Config = serde_json::from_value(value).map_err(LogError::InvalidOptions)?;
        Ok(Arc::new(T::from(config)) as Arc<dyn LogAppender>)
    })
}

/// 以指定名称注册 Appender 类型，同名注册会覆盖之前的注册
///
/// # 示例
///
/// ```ignore
/// register_appender::<MemoryAppender, MemoryAppenderConfig>("MemoryAppender")?;
/// ```
pub fn register_appender<T, Config>(type_name: &str) -> Result<()>
where
    T: LogAppender + From<Config> + 'static,
    Config: DeserializeOwned + 'static,
{
    let mut registry = REGISTRY.write().map_err(|_| LogError::LockPoisoned)?;
    if registry
        .insert(type_name.to_string(), constructor::<T, Config>())
        .is_some()
    {
        tracing::debug!(type_name, "appender type re-registered");
    } else {
        tracing::debug!(type_name, "appender type registered");
    }
    Ok(())
}

/// 从 TypeOptions 创建 Appender
pub fn create_appender_from_options(options: &TypeOptions) -> Result<Arc<dyn LogAppender>> {
    let registry = REGISTRY.read().map_err(|_| LogError::LockPoisoned)?;
    let constructor = registry
        .get(&options.type_name)
        .ok_or_else(|| LogError::AppenderNotRegistered(options.type_name.clone()))?;
    constructor(options.options.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::sync::Mutex;

    #[derive(Debug, Clone, Deserialize, Default)]
    struct PrefixAppenderConfig {
        prefix: String,
    }

    struct PrefixAppender {
        prefix: String,
        lines: Mutex<Vec<String>>,
    }

    impl From<PrefixAppenderConfig> for PrefixAppender {
        fn from(config: PrefixAppenderConfig) -> Self {
            Self {
                prefix: config.prefix,
                lines: Mutex::new(Vec::new()),
            }
        }
    }

    impl LogAppender for PrefixAppender {
        fn append(&self, line: &str) -> Result<()> {
            self.lines
                .lock()
                .map_err(|_| LogError::LockPoisoned)?
                .push(format!("{}{}", self.prefix, line));
            Ok(())
        }
    }

    #[test]
    fn test_create_console_appender() -> Result<()> {
        let opts = TypeOptions::from_json(
            r#"
            {
                "type": "ConsoleAppender",
                "options": {
                    "target": "stdout"
                }
            }
        "#,
        )?;

        let appender = create_appender_from_options(&opts)?;
        assert!(appender.append("test message").is_ok());

        Ok(())
    }

    #[test]
    fn test_console_appender_registered_by_default() -> Result<()> {
        let appender = create_appender_from_options(&TypeOptions::new("ConsoleAppender"))?;
        assert!(appender.flush().is_ok());
        Ok(())
    }

    #[test]
    fn test_register_custom_appender() -> Result<()> {
        register_appender::<PrefixAppender, PrefixAppenderConfig>("PrefixAppender")?;

        let opts = TypeOptions::from_json(r#"{ type: "PrefixAppender", options: { prefix: "> " } }"#)?;
        let appender = create_appender_from_options(&opts)?;
        assert!(appender.append("hello").is_ok());

        Ok(())
    }

    #[test]
    fn test_create_unregistered_appender() {
        let err = create_appender_from_options(&TypeOptions::new("KafkaAppender"))
            .err()
            .unwrap();
        assert!(matches!(
            err.downcast_ref::<LogError>(),
            Some(LogError::AppenderNotRegistered(name)) if name == "KafkaAppender"
        ));
    }

    #[test]
    fn test_create_appender_invalid_options() {
        let opts = TypeOptions::new("ConsoleAppender")
            .with_options(serde_json::json!({ "target": "printer" }));
        let err = create_appender_from_options(&opts).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<LogError>(),
            Some(LogError::InvalidOptions(_))
        ));
    }
}
