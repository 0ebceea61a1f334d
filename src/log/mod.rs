//! 日志模块
//!
//! 将请求、响应、错误和应用日志事件格式化为单行文本，交给输出器输出。
//!
//! # 特性
//!
//! - 两种输出模式：结构化（JSON 对象）和可读文本
//! - moment 风格的时间格式，支持 UTC 和本地时间
//! - 按 printf 规则合并多个消息参数
//! - 可从单一标签中提取日志级别
//! - 基于配置的输出器创建，支持注册自定义输出器
//!
//! # 快速开始
//!
//! ```rust,no_run
//! use service_log::log::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = LoggerConfig::from_json(r#"
//!         {
//!             format: "YYYY-MM-DD HH:mm:ss.SSS",
//!             utc: true,
//!             json_output: true,
//!             appender: {
//!                 type: "ConsoleAppender",
//!                 options: {
//!                     target: "stdout"
//!                 }
//!             }
//!         }
//!     "#)?;
//!
//!     let manager = LoggerManager::new();
//!     let logger = manager.get_or_create("app", config)?;
//!
//!     logger.log("info", vec!["server started on port %d".into(), 8080.into()])?;
//!     logger.log(["db", "warn"], vec![serde_json::json!({ "elapsed": 1500 }).into()])?;
//!
//!     Ok(())
//! }
//! ```

pub mod appender;
pub mod clock;
pub mod error;
pub mod events;
pub mod formatter;
pub mod inspect;
pub mod level;
pub mod log_event;
pub mod logger;
pub mod logger_manager;
pub mod macros;
pub mod merge;
pub mod message;
pub mod printf;
pub mod request_info;
pub mod stringify;
pub mod time;

// 重新导出核心类型
pub use appender::{
    create_appender_from_options, register_appender, ConsoleAppender,
    ConsoleAppenderConfig, LogAppender, Target,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::LogError;
pub use events::{RequestEvent, ResponseFailure, ServerEvent};
pub use formatter::{
    create_formatter, format_event, FormatOptions, JsonFormatter, JsonFormatterConfig,
    LogFormatter, TextFormatter, TextFormatterConfig,
};
pub use level::{extract_level, ExtractedLevel, LogLevel};
pub use log_event::{IntoTags, LogEvent};
pub use logger::{default_meta, Logger, LoggerConfig, MetaProvider};
pub use logger_manager::{LoggerManager, LoggerManagerConfig, DEFAULT_LOGGER_NAME};
pub use merge::merge_layers;
pub use message::{normalize, ErrorInfo, LogArg, Message};
pub use request_info::{build_request_info, Request, RequestInfo, RequestInfoFilter, Response};
pub use time::{format_timestamp, TimeFormat, DEFAULT_TIME_FORMAT};
