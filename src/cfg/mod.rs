//! cfg 模块 - 配置管理
//!
//! 提供日志器配置的解析能力，支持 JSON5 / YAML / TOML 三种格式，
//! 以及通过 `TypeOptions` 按名称选择已注册实现的机制

pub mod macros;
pub mod parse;
pub mod type_options;

pub use parse::{from_json, from_toml, from_yaml};
pub use type_options::TypeOptions;
