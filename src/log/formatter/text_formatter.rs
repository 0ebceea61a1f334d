use crate::log::formatter::LogFormatter;
use crate::log::inspect::{format_json_number, inspect};
use crate::log::log_event::LogEvent;
use crate::log::message::Message;
use crate::log::stringify::safe_stringify;
use crate::log::time::TimeFormat;
use serde::Deserialize;
use serde_json::{Map, Value};
use smart_default::SmartDefault;
use std::fmt::Write;

/// TextFormatter 配置
#[derive(Debug, Clone, Deserialize, PartialEq, SmartDefault)]
#[serde(default)]
pub struct TextFormatterConfig {
    /// 时间格式
    pub time: TimeFormat,
}

/// 文本格式化器
///
/// 输出形如 `<时间>, [<标签,...>], <内容>[, <元数据 JSON>]` 的单行文本
pub struct TextFormatter {
    config: TextFormatterConfig,
}

impl TextFormatter {
    pub fn new(config: TextFormatterConfig) -> Self {
        Self { config }
    }
}

impl LogFormatter for TextFormatter {
    fn format(&self, event: &LogEvent) -> String {
        let body = match (&event.request_info, &event.message) {
            // 只有 response 事件带请求信息
            (Some(request_info), _) => format_request_info(request_info),
            (None, Some(message)) => format_message(message),
            (None, None) => String::new(),
        };

        let mut result = String::with_capacity(64 + body.len());
        result.push_str(&self.config.time.format(event.timestamp));
        result.push_str(", [");
        result.push_str(&event.tags.join(","));
        result.push_str("], ");
        result.push_str(&body);

        if let Some(metadata) = &event.metadata {
            result.push_str(", ");
            result.push_str(&safe_stringify(metadata));
        }

        result
    }
}

/// 将请求信息字段渲染为固定顺序的单行文本
///
/// `<地址>, <主机> <路径> <方法> <查询 JSON> <状态码> (<耗时>ms), [<referer>, ]<User-Agent>`。
/// 字段来自过滤后的集合，被移除的字段渲染为空，过滤器新增的字段不出现在文本中
pub fn format_request_info(fields: &Map<String, Value>) -> String {
    let text = |key: &str| fields.get(key).map(field_text).unwrap_or_default();
    let query = fields.get("query").map(safe_stringify).unwrap_or_default();

    let mut result = String::with_capacity(128);
    // 写入 String 不会失败
    let _ = write!(
        result,
        "{}, {} {} {} {} {} ({}ms), ",
        text("remoteAddress"),
        text("host"),
        text("path"),
        text("method"),
        query,
        text("statusCode"),
        text("responseTime"),
    );
    let referer = text("referer");
    if !referer.is_empty() {
        result.push_str(&referer);
        result.push_str(", ");
    }
    result.push_str(&text("userAgent"));
    result
}

fn field_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => format_json_number(n),
        other => inspect(other),
    }
}

/// 将消息渲染为文本：文本原样输出，错误输出堆栈，对象和数组输出调试形式
pub fn format_message(message: &Message) -> String {
    match message {
        Message::Text(text) => text.clone(),
        Message::Failure(err) => err.stack.clone(),
        Message::Structured(fields) => inspect(&Value::Object(fields.clone())),
        Message::Raw(Value::Number(n)) => format_json_number(n),
        Message::Raw(Value::String(s)) => s.clone(),
        Message::Raw(other) => inspect(other),
    }
}

crate::impl_from!(TextFormatterConfig => TextFormatter);
