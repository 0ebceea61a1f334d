mod core;
mod json_formatter;
mod text_formatter;

pub use self::core::LogFormatter;
pub use json_formatter::{JsonFormatter, JsonFormatterConfig};
pub use text_formatter::{format_message, format_request_info, TextFormatter, TextFormatterConfig};

use crate::log::log_event::LogEvent;
use crate::log::time::TimeFormat;
use smart_default::SmartDefault;
use std::sync::Arc;

/// 输出模式配置
#[derive(Debug, Clone, PartialEq, SmartDefault)]
pub struct FormatOptions {
    /// 时间格式
    pub time: TimeFormat,

    /// 结构化（JSON）输出，否则为可读文本
    #[default = true]
    pub json_output: bool,

    /// 是否从单一标签中提取日志级别（仅结构化输出）
    #[default = false]
    pub extract_log_level: bool,
}

/// 按输出模式创建格式化器
pub fn create_formatter(options: &FormatOptions) -> Arc<dyn LogFormatter> {
    if options.json_output {
        Arc::new(JsonFormatter::new(JsonFormatterConfig {
            time: options.time.clone(),
            extract_log_level: options.extract_log_level,
        }))
    } else {
        Arc::new(TextFormatter::new(TextFormatterConfig {
            time: options.time.clone(),
        }))
    }
}

/// 按输出模式格式化日志事件
pub fn format_event(event: &LogEvent, options: &FormatOptions) -> String {
    create_formatter(options).format(event)
}
