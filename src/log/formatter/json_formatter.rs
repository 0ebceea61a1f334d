use crate::log::formatter::LogFormatter;
use crate::log::level::extract_level;
use crate::log::log_event::LogEvent;
use crate::log::merge::{merge_into, merge_layers};
use crate::log::message::Message;
use crate::log::stringify::safe_stringify;
use crate::log::time::TimeFormat;
use serde::Deserialize;
use serde_json::{Map, Value};
use smart_default::SmartDefault;

/// JsonFormatter 配置
#[derive(Debug, Clone, Deserialize, PartialEq, SmartDefault)]
#[serde(default)]
pub struct JsonFormatterConfig {
    /// 时间格式
    pub time: TimeFormat,

    /// 是否从单一标签中提取日志级别到 `_level` 字段
    #[default = false]
    pub extract_log_level: bool,
}

/// JSON 格式化器
///
/// 字段按以下顺序分层合并，后面的层覆盖前面的层：
/// `_time`/`_tags`(/`_level`) < 元数据 < 请求信息 < 消息字段。
/// 文本、数组和其他值写入 `msg`，错误的堆栈写入 `error`
pub struct JsonFormatter {
    config: JsonFormatterConfig,
}

impl JsonFormatter {
    pub fn new(config: JsonFormatterConfig) -> Self {
        Self { config }
    }

    /// 构造合并后的记录
    pub fn to_record(&self, event: &LogEvent) -> Map<String, Value> {
        let extracted = extract_level(event.tags.clone(), self.config.extract_log_level);

        let mut base = Map::new();
        base.insert("_time".to_string(), Value::String(self.config.time.format(event.timestamp)));
        base.insert("_tags".to_string(), Value::from(extracted.tags));
        if let Some(level) = extracted.level {
            base.insert("_level".to_string(), Value::String(level.to_string()));
        }

        let mut layers = vec![base];
        if let Some(metadata) = &event.metadata {
            layers.push(metadata.clone());
        }
        if let Some(request_info) = &event.request_info {
            layers.push(request_info.clone());
        }
        let mut record = merge_layers(layers);

        match &event.message {
            Some(Message::Structured(fields)) => merge_into(&mut record, fields.clone()),
            Some(Message::Failure(err)) => {
                record.insert("error".to_string(), Value::String(err.stack.clone()));
            }
            Some(Message::Text(text)) => {
                record.insert("msg".to_string(), Value::String(text.clone()));
            }
            Some(Message::Raw(value)) => {
                record.insert("msg".to_string(), value.clone());
            }
            None => {}
        }

        record
    }
}

impl LogFormatter for JsonFormatter {
    fn format(&self, event: &LogEvent) -> String {
        safe_stringify(&self.to_record(event))
    }
}

crate::impl_from!(JsonFormatterConfig => JsonFormatter);
