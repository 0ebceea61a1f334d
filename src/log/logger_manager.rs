use crate::log::logger::{Logger, LoggerConfig};
use anyhow::Result;
use serde::Deserialize;
use smart_default::SmartDefault;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// 默认 logger 名称
pub const DEFAULT_LOGGER_NAME: &str = "_default";

/// Logger Manager 配置
///
/// 用于统一创建多个命名 Logger
#[derive(Debug, Clone, Deserialize, SmartDefault)]
#[serde(default)]
pub struct LoggerManagerConfig {
    /// 命名 logger 配置映射
    pub loggers: HashMap<String, LoggerConfig>,
}

/// Logger 管理器
///
/// 由调用方持有，同一名称在移除前总是返回同一个 Logger 实例。
/// 重复添加同名 Logger 时后添加的生效
#[derive(Default)]
pub struct LoggerManager {
    loggers: RwLock<HashMap<String, Arc<Logger>>>,
}

impl LoggerManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从配置创建 LoggerManager
    pub fn from_config(config: LoggerManagerConfig) -> Result<Self> {
        let mut loggers = HashMap::with_capacity(config.loggers.len());
        for (key, logger_config) in config.loggers {
            loggers.insert(key, Arc::new(Logger::new(logger_config)?));
        }

        Ok(Self {
            loggers: RwLock::new(loggers),
        })
    }

    /// 获取指定名称的 logger，不存在时按配置创建
    ///
    /// 已存在时忽略配置
    pub fn get_or_create(&self, key: &str, config: LoggerConfig) -> Result<Arc<Logger>> {
        if let Some(logger) = self.get(key) {
            return Ok(logger);
        }

        let mut loggers = self.loggers.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(logger) = loggers.get(key) {
            return Ok(Arc::clone(logger));
        }

        let logger = Arc::new(Logger::new(config)?);
        loggers.insert(key.to_string(), Arc::clone(&logger));
        tracing::debug!(key, "logger created");
        Ok(logger)
    }

    /// 获取默认 logger，不存在时按默认配置创建
    pub fn get_default(&self) -> Result<Arc<Logger>> {
        self.get_or_create(DEFAULT_LOGGER_NAME, LoggerConfig::default())
    }

    /// 获取指定名称的 logger
    ///
    /// 如果名称不存在，返回 None
    pub fn get(&self, key: &str) -> Option<Arc<Logger>> {
        let loggers = self.loggers.read().unwrap_or_else(PoisonError::into_inner);
        loggers.get(key).cloned()
    }

    /// 添加 logger，已存在的同名 logger 会被替换
    pub fn add(&self, key: impl Into<String>, logger: impl Into<Arc<Logger>>) -> Arc<Logger> {
        let key = key.into();
        let logger = logger.into();
        let mut loggers = self.loggers.write().unwrap_or_else(PoisonError::into_inner);
        if loggers.insert(key.clone(), Arc::clone(&logger)).is_some() {
            tracing::debug!(key = %key, "logger replaced");
        }
        logger
    }

    /// 检查指定名称的 logger 是否存在
    pub fn contains(&self, key: &str) -> bool {
        let loggers = self.loggers.read().unwrap_or_else(PoisonError::into_inner);
        loggers.contains_key(key)
    }

    /// 获取所有 logger 的名称列表
    pub fn keys(&self) -> Vec<String> {
        let loggers = self.loggers.read().unwrap_or_else(PoisonError::into_inner);
        loggers.keys().cloned().collect()
    }

    /// 移除指定名称的 logger
    pub fn remove(&self, key: &str) -> Option<Arc<Logger>> {
        let mut loggers = self.loggers.write().unwrap_or_else(PoisonError::into_inner);
        loggers.remove(key)
    }
}
