//! 消息规整
//!
//! 将一个或多个异构参数（字符串、结构化对象、错误）规整为一条可渲染的消息

use crate::log::inspect::inspect;
use crate::log::printf::printf;
use crate::log::stringify::to_safe_value;
use serde::Serialize;
use serde_json::{Map, Value};
use std::error::Error as StdError;

/// 错误信息
///
/// `stack` 以 `"<name>: <message>"` 开头，之后每个错误来源占一行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorInfo {
    pub name: String,
    pub message: String,
    pub stack: String,
}

impl ErrorInfo {
    /// 创建名为 `Error` 的错误信息
    pub fn new(message: impl Into<String>) -> Self {
        Self::named("Error", message)
    }

    /// 创建指定名称的错误信息
    pub fn named(name: impl Into<String>, message: impl Into<String>) -> Self {
        let name = name.into();
        let message = message.into();
        let stack = format!("{}: {}", name, message);
        Self { name, message, stack }
    }

    /// 替换堆栈文本
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = stack.into();
        self
    }

    /// 从标准错误构造，错误来源链写入堆栈
    pub fn from_error(err: &(dyn StdError + 'static)) -> Self {
        let mut info = Self::new(err.to_string());
        let mut source = err.source();
        while let Some(cause) = source {
            info.stack.push_str("\n    caused by: ");
            info.stack.push_str(&cause.to_string());
            source = cause.source();
        }
        info
    }
}

impl From<&anyhow::Error> for ErrorInfo {
    fn from(err: &anyhow::Error) -> Self {
        let err: &(dyn StdError + 'static) = err.as_ref();
        Self::from_error(err)
    }
}

impl From<anyhow::Error> for ErrorInfo {
    fn from(err: anyhow::Error) -> Self {
        Self::from(&err)
    }
}

/// 日志调用的单个参数
#[derive(Debug, Clone, PartialEq)]
pub enum LogArg {
    Text(String),
    Value(Value),
    Error(ErrorInfo),
}

impl LogArg {
    /// 从标准错误构造参数
    pub fn from_error(err: &(dyn StdError + 'static)) -> Self {
        LogArg::Error(ErrorInfo::from_error(err))
    }

    /// 从任意可序列化的值构造参数
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Self {
        LogArg::Value(to_safe_value(value))
    }

    fn into_rendered_value(self) -> Value {
        match self {
            LogArg::Text(s) => Value::String(s),
            LogArg::Error(err) => Value::String(err.stack),
            LogArg::Value(value @ (Value::Object(_) | Value::Array(_))) => {
                Value::String(inspect(&value))
            }
            LogArg::Value(value) => value,
        }
    }
}

impl From<&str> for LogArg {
    fn from(s: &str) -> Self {
        LogArg::Text(s.to_string())
    }
}

impl From<String> for LogArg {
    fn from(s: String) -> Self {
        LogArg::Text(s)
    }
}

impl From<&String> for LogArg {
    fn from(s: &String) -> Self {
        LogArg::Text(s.clone())
    }
}

impl From<Value> for LogArg {
    fn from(v: Value) -> Self {
        LogArg::Value(v)
    }
}

impl From<ErrorInfo> for LogArg {
    fn from(err: ErrorInfo) -> Self {
        LogArg::Error(err)
    }
}

impl From<&anyhow::Error> for LogArg {
    fn from(err: &anyhow::Error) -> Self {
        LogArg::Error(err.into())
    }
}

macro_rules! impl_log_arg_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for LogArg {
                fn from(n: $ty) -> Self {
                    LogArg::Value(Value::from(n))
                }
            }
        )*
    };
}

impl_log_arg_from_number!(i32, i64, u32, u64, f64, bool);

/// 规整后的消息
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// 纯文本
    Text(String),
    /// 结构化对象，结构化输出时字段平铺到记录中
    Structured(Map<String, Value>),
    /// 错误，结构化输出时写入 `error` 字段
    Failure(ErrorInfo),
    /// 其他值（数字、布尔、null、数组），结构化输出时原样写入 `msg` 字段
    Raw(Value),
}

impl Message {
    /// 按值的类型构造消息
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(s) => Message::Text(s),
            Value::Object(map) => Message::Structured(map),
            other => Message::Raw(other),
        }
    }

    /// 是否为对象类消息（结构化对象或错误）
    pub fn is_object(&self) -> bool {
        matches!(self, Message::Structured(_) | Message::Failure(_))
    }
}

impl From<LogArg> for Message {
    fn from(arg: LogArg) -> Self {
        match arg {
            LogArg::Text(s) => Message::Text(s),
            LogArg::Error(err) => Message::Failure(err),
            LogArg::Value(value) => Message::from_value(value),
        }
    }
}

impl From<&str> for Message {
    fn from(s: &str) -> Self {
        Message::Text(s.to_string())
    }
}

impl From<String> for Message {
    fn from(s: String) -> Self {
        Message::Text(s)
    }
}

impl From<Value> for Message {
    fn from(v: Value) -> Self {
        Message::from_value(v)
    }
}

impl From<ErrorInfo> for Message {
    fn from(err: ErrorInfo) -> Self {
        Message::Failure(err)
    }
}

/// 将参数规整为一条消息
///
/// - 无参数：没有消息
/// - 单个参数：原样保留；非结构化输出时，非错误的对象和数组渲染为调试形式的文本
/// - 多个参数：错误取堆栈、对象取调试形式、其他值不变，然后按 printf 规则插值为文本
pub fn normalize(args: Vec<LogArg>, json_output: bool) -> Option<Message> {
    if args.len() > 1 {
        let rendered: Vec<Value> = args.into_iter().map(LogArg::into_rendered_value).collect();
        return Some(Message::Text(printf(&rendered)));
    }

    let arg = args.into_iter().next()?;
    match arg {
        LogArg::Value(value @ (Value::Object(_) | Value::Array(_))) if !json_output => {
            Some(Message::Text(inspect(&value)))
        }
        other => Some(other.into()),
    }
}
