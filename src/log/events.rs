//! 事件适配
//!
//! 将宿主框架的事件整理为日志事件后交给 `Logger` 输出，本身不含格式化逻辑

use crate::log::log_event::{IntoTags, LogEvent};
use crate::log::logger::Logger;
use crate::log::message::{ErrorInfo, LogArg, Message};
use crate::log::request_info::{build_request_info, Request, Response};
use anyhow::Result;
use http::StatusCode;

/// 日志事件的前置标签
const LOG_TAG: &str = "log";
const RESPONSE_TAG: &str = "response";
const ERROR_TAG: &str = "error";

/// 服务器日志事件
///
/// `data` 与 `error` 同时存在时以 `data` 为准
#[derive(Debug, Clone, PartialEq)]
pub struct ServerEvent {
    /// 毫秒时间戳
    pub timestamp: i64,
    pub tags: Vec<String>,
    pub data: Option<LogArg>,
    pub error: Option<ErrorInfo>,
}

/// 请求内产生的日志事件，与服务器日志事件结构相同
pub type RequestEvent = ServerEvent;

impl ServerEvent {
    pub fn new(timestamp: i64, tags: impl IntoTags) -> Self {
        Self {
            timestamp,
            tags: tags.into_tags(),
            data: None,
            error: None,
        }
    }

    pub fn with_data(mut self, data: impl Into<LogArg>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn with_error(mut self, error: ErrorInfo) -> Self {
        self.error = Some(error);
        self
    }

    fn into_log_event(self) -> LogEvent {
        let mut tags = Vec::with_capacity(self.tags.len() + 1);
        tags.push(LOG_TAG.to_string());
        tags.extend(self.tags);

        let mut event = LogEvent::new(self.timestamp, tags);
        event.message = match (self.data, self.error) {
            (Some(data), _) => Some(Message::from(data)),
            (None, Some(error)) => Some(Message::Failure(error)),
            (None, None) => None,
        };
        event
    }
}

/// 即将返回给客户端的失败响应
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseFailure {
    pub status: StatusCode,
    /// 是否为服务端错误，客户端错误（参数校验等）属于预期内的失败
    pub is_server: bool,
    pub error: ErrorInfo,
}

impl ResponseFailure {
    /// 按状态码判断是否为服务端错误
    pub fn new(status: StatusCode, error: ErrorInfo) -> Self {
        Self {
            status,
            is_server: status.is_server_error(),
            error,
        }
    }

    /// 仅 500 的服务端错误需要记录
    pub fn should_log(&self) -> bool {
        self.is_server && self.status == StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl Logger {
    /// 请求内的日志事件：标签前加 `log`，附带请求元数据
    pub fn on_request_event(&self, request: &Request, event: RequestEvent) -> Result<()> {
        let mut log_event = event.into_log_event();
        log_event.metadata = self.meta(Some(request));
        self.write(&log_event)
    }

    /// 服务器日志事件：标签前加 `log`，不附带元数据
    pub fn on_log_event(&self, event: ServerEvent) -> Result<()> {
        self.write(&event.into_log_event())
    }

    /// 请求完成：时间为请求到达时间，记录请求信息
    pub fn on_response_event(&self, request: &Request, response: &Response) -> Result<()> {
        let request_info =
            build_request_info(request, response, self.now(), self.request_info_filter().as_ref());

        let mut event = LogEvent::new(request.received, RESPONSE_TAG).with_request_info(request_info);
        event.metadata = self.meta(Some(request));
        self.write(&event)
    }

    /// 请求内的错误：消息为 `<错误信息>, stack:\n<堆栈>`
    pub fn on_error_event(&self, request: &Request, error: &ErrorInfo) -> Result<()> {
        let message = format!("{}, stack:\n{}", error.message, error.stack);

        let mut event = LogEvent::new(self.now(), ERROR_TAG).with_message(message);
        event.metadata = self.meta(Some(request));
        self.write(&event)
    }

    /// 响应前检查：仅记录 500 的服务端错误，返回是否记录
    pub fn on_pre_response(&self, request: &Request, failure: &ResponseFailure) -> Result<bool> {
        if !failure.should_log() {
            return Ok(false);
        }
        self.on_error_event(request, &failure.error)?;
        Ok(true)
    }
}
