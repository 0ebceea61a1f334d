//! 请求信息
//!
//! 从一次完成的 HTTP 交互中提取固定结构的描述：来源地址、主机、路径、方法、
//! 查询参数、状态码、耗时、User-Agent，以及可选的 Referer 和 Content-Length

use crate::log::stringify::to_safe_value;
use http::header::{CONTENT_LENGTH, REFERER, USER_AGENT};
use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// 转发来源地址的请求头
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// 请求信息过滤器，作用于字段集合，可增删改任意字段（例如脱敏查询参数）
pub type RequestInfoFilter =
    Arc<dyn Fn(Map<String, Value>) -> Map<String, Value> + Send + Sync>;

/// 请求快照
///
/// 由宿主框架在请求到达时构造，`received` 为到达时间（毫秒时间戳）
#[derive(Debug, Clone)]
pub struct Request {
    /// 请求关联 ID
    pub id: String,
    /// 连接的对端地址
    pub remote_address: String,
    pub hostname: String,
    pub path: String,
    pub method: Method,
    pub query: Map<String, Value>,
    pub headers: HeaderMap,
    pub received: i64,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            remote_address: String::new(),
            hostname: String::new(),
            path: path.into(),
            method,
            query: Map::new(),
            headers: HeaderMap::new(),
            received: 0,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_remote_address(mut self, remote_address: impl Into<String>) -> Self {
        self.remote_address = remote_address.into();
        self
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = hostname.into();
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn with_received(mut self, received: i64) -> Self {
        self.received = received;
        self
    }

    /// 客户端地址：存在 `x-forwarded-for` 时取其第一个地址，否则取连接地址
    pub fn client_address(&self) -> String {
        header_str(&self.headers, X_FORWARDED_FOR)
            .and_then(|forwarded| forwarded.split(',').next())
            .map(str::trim)
            .filter(|first| !first.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.remote_address.clone())
    }
}

/// 响应快照
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
}

impl Response {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
        }
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }
}

/// 一次完成的 HTTP 交互的描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestInfo {
    pub remote_address: String,
    pub host: String,
    pub path: String,
    pub method: String,
    pub query: Map<String, Value>,
    pub status_code: u16,
    /// 耗时（毫秒）
    pub response_time: u64,
    pub user_agent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_length: Option<String>,
}

impl RequestInfo {
    /// 从请求和响应快照构造
    ///
    /// `now` 为构造时刻（毫秒时间戳），耗时为 `now - request.received`，不小于 0
    pub fn from_exchange(request: &Request, response: &Response, now: i64) -> Self {
        let referer = header_str(&request.headers, REFERER.as_str())
            .filter(|referer| !referer.is_empty())
            .map(str::to_string);
        let content_length =
            header_str(&response.headers, CONTENT_LENGTH.as_str()).map(str::to_string);

        Self {
            remote_address: request.client_address(),
            host: request.hostname.clone(),
            path: request.path.clone(),
            method: request.method.as_str().to_string(),
            query: request.query.clone(),
            status_code: response.status.as_u16(),
            response_time: u64::try_from(now.saturating_sub(request.received)).unwrap_or(0),
            user_agent: header_str(&request.headers, USER_AGENT.as_str())
                .unwrap_or_default()
                .to_string(),
            referer,
            content_length,
        }
    }

    /// 转换为字段集合，缺失的可选字段不出现
    pub fn to_fields(&self) -> Map<String, Value> {
        match to_safe_value(self) {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

impl From<RequestInfo> for Map<String, Value> {
    fn from(info: RequestInfo) -> Self {
        info.to_fields()
    }
}

/// 默认过滤器：原样返回
pub fn identity_filter() -> RequestInfoFilter {
    Arc::new(|fields| fields)
}

/// 构造请求信息字段
///
/// 先按固定结构构造，再转换为字段集合交给过滤器，过滤器作为最后一步应用
pub fn build_request_info(
    request: &Request,
    response: &Response,
    now: i64,
    filter: &(dyn Fn(Map<String, Value>) -> Map<String, Value> + Send + Sync),
) -> Map<String, Value> {
    filter(RequestInfo::from_exchange(request, response, now).to_fields())
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> Request {
        Request::new(Method::GET, "/hello")
            .with_id("1589288193486:host:1234:abc:10000")
            .with_remote_address("127.0.0.1")
            .with_hostname("localhost")
            .with_query("apikey", "secret")
            .with_header(USER_AGENT, HeaderValue::from_static("shot"))
            .with_received(1_000)
    }

    #[test]
    fn test_from_exchange_basic() {
        let response = Response::new(StatusCode::OK)
            .with_header(CONTENT_LENGTH, HeaderValue::from_static("5"));
        let info = RequestInfo::from_exchange(&request(), &response, 1_042);

        assert_eq!(info.remote_address, "127.0.0.1");
        assert_eq!(info.host, "localhost");
        assert_eq!(info.path, "/hello");
        assert_eq!(info.method, "GET");
        assert_eq!(info.query, json!({ "apikey": "secret" }).as_object().unwrap().clone());
        assert_eq!(info.status_code, 200);
        assert_eq!(info.response_time, 42);
        assert_eq!(info.user_agent, "shot");
        assert_eq!(info.referer, None);
        assert_eq!(info.content_length, Some("5".to_string()));
    }

    #[test]
    fn test_forwarded_for_wins() {
        let request = request().with_header(
            HeaderName::from_static(X_FORWARDED_FOR),
            HeaderValue::from_static("12.12.12.12,10.10.10.10"),
        );
        let info = RequestInfo::from_exchange(&request, &Response::new(StatusCode::OK), 1_000);
        assert_eq!(info.remote_address, "12.12.12.12");
    }

    #[test]
    fn test_empty_forwarded_for_falls_back() {
        let request = request().with_header(
            HeaderName::from_static(X_FORWARDED_FOR),
            HeaderValue::from_static(" ,10.10.10.10"),
        );
        assert_eq!(request.client_address(), "127.0.0.1");
    }

    #[test]
    fn test_referer_only_when_non_empty() {
        let with_referer = request().with_header(REFERER, HeaderValue::from_static("http://foo.com"));
        let info = RequestInfo::from_exchange(&with_referer, &Response::new(StatusCode::OK), 1_000);
        assert_eq!(info.referer.as_deref(), Some("http://foo.com"));

        let empty_referer = request().with_header(REFERER, HeaderValue::from_static(""));
        let info = RequestInfo::from_exchange(&empty_referer, &Response::new(StatusCode::OK), 1_000);
        assert_eq!(info.referer, None);
    }

    #[test]
    fn test_response_time_never_negative() {
        let info = RequestInfo::from_exchange(&request(), &Response::new(StatusCode::OK), 500);
        assert_eq!(info.response_time, 0);
    }

    #[test]
    fn test_build_identity_filter() {
        let fields = build_request_info(
            &request(),
            &Response::new(StatusCode::NOT_FOUND),
            1_000,
            identity_filter().as_ref(),
        );

        let keys: Vec<&str> = fields.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["remoteAddress", "host", "path", "method", "query", "statusCode", "responseTime", "userAgent"]
        );
        assert_eq!(fields["statusCode"], 404);
    }

    #[test]
    fn test_filter_applied_last() {
        let filter: RequestInfoFilter = Arc::new(|mut fields: Map<String, Value>| {
            if let Some(Value::Object(query)) = fields.get_mut("query") {
                query.remove("apikey");
                query.insert("token".to_string(), json!("--snip--"));
            }
            fields
        });
        let fields = build_request_info(&request(), &Response::new(StatusCode::OK), 1_000, filter.as_ref());

        assert_eq!(fields["query"], json!({ "token": "--snip--" }));
    }

    #[test]
    fn test_filter_adds_and_removes_fields() {
        let fields = build_request_info(&request(), &Response::new(StatusCode::OK), 1_000, &|mut fields: Map<String, Value>| {
            fields.remove("userAgent");
            fields.insert("tenant".to_string(), json!("acme"));
            fields
        });

        assert!(!fields.contains_key("userAgent"));
        assert_eq!(fields["tenant"], "acme");
        assert_eq!(fields["host"], "localhost");
    }

    #[test]
    fn test_to_fields_keeps_explicit_empty_referer() {
        let mut info = RequestInfo::from_exchange(&request(), &Response::new(StatusCode::OK), 1_000);
        info.referer = Some(String::new());
        info.content_length = Some("12".to_string());
        let fields: Map<String, Value> = info.into();
        assert_eq!(fields["referer"], "");
        assert_eq!(fields["contentLength"], "12");
    }
}
