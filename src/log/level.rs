use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 可从标签中识别的日志级别关键字
///
/// 匹配区分大小写，输出时保留原始关键字
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Info,
    Warn,
    Warning,
    Err,
    Error,
    Fatal,
    Debug,
}

impl LogLevel {
    /// 原始关键字
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Warning => "warning",
            LogLevel::Err => "err",
            LogLevel::Error => "error",
            LogLevel::Fatal => "fatal",
            LogLevel::Debug => "debug",
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, <Self as FromStr>::Err> {
        match s {
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "warning" => Ok(LogLevel::Warning),
            "err" => Ok(LogLevel::Err),
            "error" => Ok(LogLevel::Error),
            "fatal" => Ok(LogLevel::Fatal),
            "debug" => Ok(LogLevel::Debug),
            _ => Err(format!("invalid log level: {}", s)),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LogLevel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// 级别提取结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedLevel {
    pub level: Option<LogLevel>,
    pub tags: Vec<String>,
}

/// 从标签中提取日志级别
///
/// 仅当启用且标签序列恰好只有一个元素、该元素为可识别的级别关键字时，
/// 才提取为级别并清空标签；其余情况标签原样返回
pub fn extract_level(tags: Vec<String>, enabled: bool) -> ExtractedLevel {
    if enabled && tags.len() == 1 {
        if let Ok(level) = tags[0].parse::<LogLevel>() {
            return ExtractedLevel {
                level: Some(level),
                tags: Vec::new(),
            };
        }
    }

    ExtractedLevel { level: None, tags }
}
