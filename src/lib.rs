//! service-log - 服务请求与事件日志格式化
//!
//! 将 HTTP 服务的请求、响应、错误和应用日志事件格式化为单行日志，
//! 支持结构化（JSON）和可读文本两种输出模式。
//!
//! ## 模块
//!
//! - **cfg**: 配置解析（JSON5 / YAML / TOML）与 `TypeOptions`
//! - **log**: 日志事件、格式化器、输出器、Logger 与 LoggerManager

pub mod cfg;
pub mod log;

// 重新导出主要的公共 API
pub use cfg::TypeOptions;

pub use log::{
    ErrorInfo, LogAppender, LogArg, LogEvent, LogFormatter, Logger, LoggerConfig, LoggerManager,
    Message, Request, Response,
};
