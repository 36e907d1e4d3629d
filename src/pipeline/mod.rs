//! 请求管道
//!
//! 所有出站请求都经过这里：
//! - 出站：按顺序执行拦截器的 `on_request`（如附加 Bearer 凭据）
//! - 成功：只把响应体反序列化后交给调用方
//! - 失败：归一化为单个 `ApiError`，再依次交给拦截器的 `on_error`（如 401 清除凭据并跳转登录）
//!
//! 原始传输异常不会越过这一层。

mod interceptor;
#[cfg(not(target_arch = "wasm32"))]
mod native;

use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::PortalConfig;
use crate::error::{ApiError, ApiResult, TransportError};

pub use interceptor::{BearerAuth, Interceptor, SessionGuard};
#[cfg(not(target_arch = "wasm32"))]
pub use native::ReqwestTransport;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 通用 HTTP 方法枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// 通用 HTTP 请求结构
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
    /// 最长等待时间，由传输实现负责执行
    pub timeout: Duration,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod, timeout: Duration) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
            timeout,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 状态码是否为 2xx
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 传输层 (Trait)
///
/// (?Send) 是因为浏览器环境下 fetch 相关类型不是 Send 的。
#[async_trait::async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// 请求与计时器竞速
///
/// 计时器先完成时调用 `cancel`（取消底层请求）并返回超时错误。
pub async fn with_deadline<F, T>(
    exchange: F,
    deadline: T,
    timeout: Duration,
    cancel: impl FnOnce(),
) -> Result<HttpResponse, TransportError>
where
    F: Future<Output = Result<HttpResponse, TransportError>>,
    T: Future<Output = ()>,
{
    use futures::future::{Either, select};

    match select(std::pin::pin!(exchange), std::pin::pin!(deadline)).await {
        Either::Left((result, _)) => result,
        Either::Right(_) => {
            cancel();
            Err(TransportError::Timeout(timeout))
        }
    }
}

// =========================================================
// API 客户端
// =========================================================

/// 带拦截器链的 API 客户端
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    timeout: Duration,
    transport: Rc<dyn HttpTransport>,
    interceptors: Vec<Rc<dyn Interceptor>>,
}

impl ApiClient {
    pub fn new(config: &PortalConfig, transport: Rc<dyn HttpTransport>) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
            transport,
            interceptors: Vec::new(),
        }
    }

    /// 在链尾追加拦截器
    pub fn with_interceptor(mut self, interceptor: Rc<dyn Interceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request(HttpMethod::Get, path, None).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = self.encode(body)?;
        self.request(HttpMethod::Post, path, Some(body)).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = self.encode(body)?;
        self.request(HttpMethod::Put, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request(HttpMethod::Delete, path, None).await
    }

    /// 发送请求并返回反序列化后的响应体
    ///
    /// 每次失败恰好产生一个 `ApiError`，且在返回前已通知所有拦截器。
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
    ) -> ApiResult<T> {
        let mut req = HttpRequest::new(&self.url(path), method, self.timeout);
        if let Some(body) = body {
            req = req
                .with_header("Content-Type", "application/json")
                .with_body(body);
        }

        for interceptor in &self.interceptors {
            interceptor.on_request(&mut req);
        }

        let res = match self.transport.send(req).await {
            Ok(res) => res,
            Err(e) => {
                log::debug!("[Api] {} {} 传输失败: {}", method.as_str(), path, e);
                return Err(self.fail(e.into()));
            }
        };

        if !res.ok() {
            return Err(self.fail(failure_from_response(&res)));
        }

        for interceptor in &self.interceptors {
            interceptor.on_response(&res);
        }

        decode_payload(&res.body).map_err(|e| self.fail(e))
    }

    fn encode<B: Serialize + ?Sized>(&self, body: &B) -> ApiResult<String> {
        serde_json::to_string(body).map_err(|e| self.fail(ApiError::unclassified(e.to_string())))
    }

    fn fail(&self, error: ApiError) -> ApiError {
        for interceptor in &self.interceptors {
            interceptor.on_error(&error);
        }
        error
    }
}

// =========================================================
// 响应处理
// =========================================================

/// 反序列化成功响应体，空响应体按 `null` 处理
fn decode_payload<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|e| ApiError::unclassified(e.to_string()))
}

/// 把非 2xx 响应归一化为 `ApiError`
pub fn failure_from_response(res: &HttpResponse) -> ApiError {
    let message = server_message(&res.body)
        .unwrap_or_else(|| format!("Request failed with status code {}", res.status));
    ApiError::from_status(res.status, message)
}

/// 提取服务端消息：`detail` 字符串、`detail` 校验错误列表、`message` 字符串
pub fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;

    match value.get("detail") {
        Some(serde_json::Value::String(detail)) if !detail.is_empty() => {
            return Some(detail.clone());
        }
        Some(serde_json::Value::Array(items)) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if !messages.is_empty() {
                return Some(messages.join("; "));
            }
        }
        _ => {}
    }

    value
        .get("message")
        .and_then(|m| m.as_str())
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

// =========================================================
// 测试工具: MockTransport
// =========================================================

#[cfg(test)]
pub(crate) use mock::MockTransport;
