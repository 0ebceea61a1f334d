use crate::cfg::TypeOptions;
use crate::log::appender::{create_appender_from_options, LogAppender};
use crate::log::clock::{Clock, SystemClock};
use crate::log::formatter::{create_formatter, FormatOptions, LogFormatter};
use crate::log::log_event::{IntoTags, LogEvent};
use crate::log::message::{normalize, LogArg};
use crate::log::request_info::{identity_filter, Request, RequestInfoFilter};
use crate::log::time::{TimeFormat, DEFAULT_TIME_FORMAT};
use anyhow::Result;
use serde::Deserialize;
use serde_json::{Map, Value};
use smart_default::SmartDefault;
use std::sync::Arc;

/// 元数据提供函数，不一定会收到请求
pub type MetaProvider = Arc<dyn Fn(Option<&Request>) -> Option<Map<String, Value>> + Send + Sync>;

/// Logger 配置
///
/// 输出器以外的协作者（元数据、请求信息过滤器、时钟）无法序列化，
/// 通过 `Logger` 的 `with_*` 方法设置
#[derive(Debug, Clone, Deserialize, SmartDefault, PartialEq)]
#[serde(default)]
pub struct LoggerConfig {
    /// 时间格式，moment 风格
    #[default(DEFAULT_TIME_FORMAT.to_string())]
    pub format: String,

    /// 使用 UTC 时间，否则使用本地时间
    #[default = false]
    pub utc: bool,

    /// 结构化（JSON）输出
    #[default = true]
    pub json_output: bool,

    /// 从单一标签中提取日志级别
    #[default = false]
    pub extract_log_level: bool,

    /// Appender 配置
    #[default(TypeOptions::new("ConsoleAppender"))]
    pub appender: TypeOptions,
}

impl LoggerConfig {
    /// 从 JSON 字符串加载（支持 JSON5 格式）
    pub fn from_json(json_str: &str) -> Result<Self> {
        crate::cfg::from_json(json_str)
    }

    /// 从 YAML 字符串加载
    pub fn from_yaml(yaml_str: &str) -> Result<Self> {
        crate::cfg::from_yaml(yaml_str)
    }

    /// 从 TOML 字符串加载
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        crate::cfg::from_toml(toml_str)
    }

    /// 输出模式配置
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            time: TimeFormat::new(self.format.clone(), self.utc),
            json_output: self.json_output,
            extract_log_level: self.extract_log_level,
        }
    }
}

/// 默认元数据：有请求时返回 `{requestId: <请求 id>}`
pub fn default_meta(request: Option<&Request>) -> Option<Map<String, Value>> {
    let request = request?;
    let mut meta = Map::new();
    meta.insert("requestId".to_string(), Value::String(request.id.clone()));
    Some(meta)
}

/// 日志器
///
/// 负责构造日志事件、格式化并交给输出器。配置在创建后不可变
pub struct Logger {
    options: FormatOptions,
    formatter: Arc<dyn LogFormatter>,
    appender: Arc<dyn LogAppender>,
    meta: MetaProvider,
    request_info_filter: RequestInfoFilter,
    clock: Arc<dyn Clock>,
}

impl Logger {
    /// 从配置创建 Logger
    pub fn new(config: LoggerConfig) -> Result<Self> {
        let options = config.format_options();
        let appender = create_appender_from_options(&config.appender)?;

        Ok(Self {
            formatter: create_formatter(&options),
            options,
            appender,
            meta: Arc::new(default_meta),
            request_info_filter: identity_filter(),
            clock: Arc::new(SystemClock),
        })
    }

    /// 替换输出器
    pub fn with_appender(mut self, appender: Arc<dyn LogAppender>) -> Self {
        self.appender = appender;
        self
    }

    /// 替换元数据提供函数
    pub fn with_meta<F>(mut self, meta: F) -> Self
    where
        F: Fn(Option<&Request>) -> Option<Map<String, Value>> + Send + Sync + 'static,
    {
        self.meta = Arc::new(meta);
        self
    }

    /// 设置请求信息过滤器，在请求信息写入日志前调用，可增删改任意字段
    pub fn with_request_info_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(Map<String, Value>) -> Map<String, Value> + Send + Sync + 'static,
    {
        self.request_info_filter = Arc::new(filter);
        self
    }

    /// 替换时钟
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// 当前毫秒时间戳
    pub fn now(&self) -> i64 {
        self.clock.now_millis()
    }

    /// 计算元数据
    pub fn meta(&self, request: Option<&Request>) -> Option<Map<String, Value>> {
        (self.meta)(request)
    }

    pub fn request_info_filter(&self) -> &RequestInfoFilter {
        &self.request_info_filter
    }

    /// 格式化日志事件
    pub fn format(&self, event: &LogEvent) -> String {
        self.formatter.format(event)
    }

    /// 格式化日志事件并输出
    pub fn write(&self, event: &LogEvent) -> Result<()> {
        self.appender.append(&self.format(event))
    }

    /// 记录一条应用日志
    ///
    /// 多个参数按 printf 规则合并为文本；单个参数原样保留，
    /// 结构化输出时对象字段会平铺到记录中
    ///
    /// # 示例
    ///
    /// ```ignore
    /// logger.log("info", vec!["user %s logged in".into(), "alice".into()])?;
    /// logger.log(["db", "warn"], vec![json!({ "elapsed": 1500 }).into()])?;
    /// ```
    pub fn log(&self, tags: impl IntoTags, args: Vec<LogArg>) -> Result<()> {
        let mut event = LogEvent::new(self.now(), tags);
        event.message = normalize(args, self.options.json_output);
        event.metadata = self.meta(None);
        self.write(&event)
    }

    /// 刷新输出器
    pub fn flush(&self) -> Result<()> {
        self.appender.flush()
    }
}
