//! 多格式配置解析

use anyhow::Result;
use serde::de::DeserializeOwned;

/// 从 JSON 字符串解析配置（支持 JSON5：注释、尾随逗号、未引用的键）
pub fn from_json<T: DeserializeOwned>(json_str: &str) -> Result<T> {
    Ok(json5::from_str(json_str)?)
}

/// 从 YAML 字符串解析配置
pub fn from_yaml<T: DeserializeOwned>(yaml_str: &str) -> Result<T> {
    Ok(serde_yaml::from_str(yaml_str)?)
}

/// 从 TOML 字符串解析配置
pub fn from_toml<T: DeserializeOwned>(toml_str: &str) -> Result<T> {
    Ok(toml::from_str(toml_str)?)
}
