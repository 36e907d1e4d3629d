//! 错误类型
//!
//! 传输层错误 `TransportError` 只在请求管道内部出现；
//! 调用方看到的永远是归一化后的 `ApiError`。

use std::time::Duration;

use serde::{Deserialize, Serialize};

// =========================================================
// 传输层错误
// =========================================================

/// 底层传输失败（请求未得到 HTTP 响应）
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("请求构建失败: {0}")]
    Build(String),
    #[error("Network Error: {0}")]
    Network(String),
    #[error("timeout of {}ms exceeded", .0.as_millis())]
    Timeout(Duration),
    #[error("响应解析失败: {0}")]
    Decode(String),
}

// =========================================================
// 归一化错误
// =========================================================

/// 错误分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiErrorKind {
    /// 401: 未提供或被拒绝的凭据，重新登录可恢复
    Unauthenticated,
    /// 403: 已认证但无权限，客户端不可恢复
    Forbidden,
    /// 网络错误、超时、响应格式错误及其它状态码
    Unclassified,
}

impl ApiErrorKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => ApiErrorKind::Unauthenticated,
            403 => ApiErrorKind::Forbidden,
            _ => ApiErrorKind::Unclassified,
        }
    }
}

/// 请求失败时调用方收到的唯一错误值
///
/// `message` 为可得到的最具体消息：优先服务端 `detail`，其次传输层消息。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    /// HTTP 状态码，传输失败时为 `None`
    pub status: Option<u16>,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            kind,
            status,
            message: message.into(),
        }
    }

    /// 由 HTTP 状态码构造
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::from_status(status), Some(status), message)
    }

    pub fn unclassified(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Unclassified, None, message)
    }

    pub fn is_unauthenticated(&self) -> bool {
        self.kind == ApiErrorKind::Unauthenticated
    }

    pub fn is_forbidden(&self) -> bool {
        self.kind == ApiErrorKind::Forbidden
    }
}

impl From<TransportError> for ApiError {
    fn from(e: TransportError) -> Self {
        ApiError::unclassified(e.to_string())
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

// =========================================================
// 导航错误
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    /// 重定向链超过上限，通常是两个路由互相重定向
    #[error("从 {from} 出发的重定向超过 {hops} 次")]
    RedirectLoop { from: String, hops: usize },
}
