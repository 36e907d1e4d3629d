//! 拦截器链
//!
//! 每个拦截器可在三个时机介入：请求发出前、成功响应后、失败归一化后。
//! 拦截器按注册顺序执行。

use std::rc::Rc;

use kbportal_shared::HEADER_AUTHORIZATION;

use super::{HttpRequest, HttpResponse};
use crate::credential::CredentialStore;
use crate::error::{ApiError, ApiErrorKind};
use crate::notice::{Notice, Notifier};
use crate::router::Navigator;

const MSG_SESSION_EXPIRED: &str = "登录已过期，请重新登录";
const MSG_FORBIDDEN: &str = "无权限访问";

pub trait Interceptor {
    fn on_request(&self, _req: &mut HttpRequest) {}

    fn on_response(&self, _res: &HttpResponse) {}

    fn on_error(&self, _error: &ApiError) {}
}

// =========================================================
// 出站：附加凭据
// =========================================================

/// 有凭据时附加 `Authorization: Bearer <token>`，无凭据时原样放行
pub struct BearerAuth {
    store: Rc<CredentialStore>,
}

impl BearerAuth {
    pub fn new(store: Rc<CredentialStore>) -> Self {
        Self { store }
    }
}

impl Interceptor for BearerAuth {
    fn on_request(&self, req: &mut HttpRequest) {
        if let Some(token) = self.store.get() {
            req.headers
                .insert(HEADER_AUTHORIZATION.to_string(), token.bearer());
        }
    }
}

// =========================================================
// 入站：会话失效与权限处理
// =========================================================

/// 401 清除凭据、提示并跳转登录；403 仅提示
///
/// 多个并发请求同时 401 时每个都会触发一次，依赖 `clear` 与导航的幂等性。
pub struct SessionGuard {
    store: Rc<CredentialStore>,
    notifier: Rc<dyn Notifier>,
    navigator: Rc<dyn Navigator>,
    login_path: String,
}

impl SessionGuard {
    pub fn new(
        store: Rc<CredentialStore>,
        notifier: Rc<dyn Notifier>,
        navigator: Rc<dyn Navigator>,
        login_path: &str,
    ) -> Self {
        Self {
            store,
            notifier,
            navigator,
            login_path: login_path.to_string(),
        }
    }
}

impl Interceptor for SessionGuard {
    fn on_error(&self, error: &ApiError) {
        match error.kind {
            ApiErrorKind::Unauthenticated => {
                log::warn!("[Api] 401: {}，清除凭据并跳转登录", error.message);
                self.store.clear();
                self.notifier.notify(Notice::error(MSG_SESSION_EXPIRED));
                self.navigator.navigate(&self.login_path);
            }
            ApiErrorKind::Forbidden => {
                log::warn!("[Api] 403: {}", error.message);
                self.notifier.notify(Notice::error(MSG_FORBIDDEN));
            }
            ApiErrorKind::Unclassified => {}
        }
    }
}
