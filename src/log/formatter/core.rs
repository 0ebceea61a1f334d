use crate::log::log_event::LogEvent;

/// 日志格式化器 trait
///
/// 负责将 LogEvent 格式化为一行字符串。格式化不会失败：缺失的可选字段直接省略，
/// 无法序列化的值以标记代替
pub trait LogFormatter: Send + Sync {
    /// 格式化日志事件
    fn format(&self, event: &LogEvent) -> String;
}
