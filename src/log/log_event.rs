use crate::log::message::Message;
use serde_json::{Map, Value};

/// 日志事件
///
/// 每次日志调用构造一次，格式化后即丢弃。正常情况下 `message` 与
/// `request_info` 至多一个有意义，两者都缺失时只输出标签和元数据
#[derive(Debug, Clone, PartialEq)]
pub struct LogEvent {
    /// 毫秒时间戳
    pub timestamp: i64,
    /// 标签，非空
    pub tags: Vec<String>,
    pub message: Option<Message>,
    /// 请求信息字段（已经过过滤器）
    pub request_info: Option<Map<String, Value>>,
    /// 元数据
    pub metadata: Option<Map<String, Value>>,
}

impl LogEvent {
    pub fn new(timestamp: i64, tags: impl IntoTags) -> Self {
        Self {
            timestamp,
            tags: tags.into_tags(),
            message: None,
            request_info: None,
            metadata: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// 设置请求信息，接受 `RequestInfo` 或任意字段集合
    pub fn with_request_info(mut self, request_info: impl Into<Map<String, Value>>) -> Self {
        self.request_info = Some(request_info.into());
        self
    }

    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// 可转换为标签序列的类型：单个标签或多个标签
pub trait IntoTags {
    fn into_tags(self) -> Vec<String>;
}

impl IntoTags for &str {
    fn into_tags(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoTags for String {
    fn into_tags(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoTags for Vec<String> {
    fn into_tags(self) -> Vec<String> {
        self
    }
}

impl IntoTags for Vec<&str> {
    fn into_tags(self) -> Vec<String> {
        self.into_iter().map(str::to_string).collect()
    }
}

impl IntoTags for &[&str] {
    fn into_tags(self) -> Vec<String> {
        self.iter().map(|tag| tag.to_string()).collect()
    }
}

impl<const N: usize> IntoTags for [&str; N] {
    fn into_tags(self) -> Vec<String> {
        self.iter().map(|tag| tag.to_string()).collect()
    }
}
