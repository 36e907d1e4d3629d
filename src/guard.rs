//! 导航守卫
//!
//! 每次导航前执行一次：根据目标路由的认证要求与凭据是否存在，
//! 决定放行、跳转登录（记住原目标）或离开登录页。
//!
//! 守卫只检查凭据是否存在，不校验有效性。过期凭据会被乐观放行，
//! 直到第一次请求返回 401 时由请求管道清除并跳转登录。

use std::cell::RefCell;
use std::rc::Rc;

use kbportal_shared::RouteEntry;

use crate::config::PortalConfig;
use crate::credential::CredentialStore;
use crate::error::NavigationError;
use crate::location::Location;
use crate::routes::{LOGIN_ROUTE_NAME, ResolvedRoute, RouteTable};

/// 守卫决定
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// 按原目标继续
    Allow,
    /// 改为导航到给定位置
    Redirect(Location),
}

/// 一次守卫评估的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardOutcome {
    /// 解析（含路由重定向）后的目标位置
    pub target: Location,
    pub decision: Decision,
}

/// 纯决策函数
pub fn decide(target: &ResolvedRoute<'_>, has_credential: bool, config: &PortalConfig) -> Decision {
    if target.entry.requires_auth() && !has_credential {
        let login = Location::new(config.login_path.as_str())
            .with_query(&config.redirect_query_param, &target.full_path());
        return Decision::Redirect(login);
    }

    if is_login_route(target.entry) && has_credential {
        return Decision::Redirect(Location::new(config.home_path.as_str()));
    }

    Decision::Allow
}

/// 页面标题：`<路由标题> - <应用名>`，无标题时仅应用名
pub fn page_title(entry: &RouteEntry, app_name: &str) -> String {
    match entry.title.as_deref() {
        Some(title) if !title.is_empty() => format!("{title} - {app_name}"),
        _ => app_name.to_string(),
    }
}

fn is_login_route(entry: &RouteEntry) -> bool {
    entry.name.as_deref() == Some(LOGIN_ROUTE_NAME)
}

// =========================================================
// 页面标题输出
// =========================================================

pub trait TitleSink {
    fn set_title(&self, title: &str);
}

/// 内存标题，用于测试与非浏览器宿主
#[derive(Default)]
pub struct MemoryTitle {
    title: RefCell<String>,
}

impl MemoryTitle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> String {
        self.title.borrow().clone()
    }
}

impl TitleSink for MemoryTitle {
    fn set_title(&self, title: &str) {
        *self.title.borrow_mut() = title.to_string();
    }
}

// =========================================================
// 守卫服务
// =========================================================

pub struct NavigationGuard {
    config: PortalConfig,
    routes: Rc<RouteTable>,
    store: Rc<CredentialStore>,
    title: Rc<dyn TitleSink>,
}

impl NavigationGuard {
    pub fn new(
        config: &PortalConfig,
        routes: Rc<RouteTable>,
        store: Rc<CredentialStore>,
        title: Rc<dyn TitleSink>,
    ) -> Self {
        Self {
            config: config.clone(),
            routes,
            store,
            title,
        }
    }

    /// 评估一次导航
    ///
    /// 无论决定如何，都会先按目标路由设置页面标题。
    pub fn evaluate(&self, requested: &str) -> Result<GuardOutcome, NavigationError> {
        let target = self.routes.resolve(requested)?;
        self.title
            .set_title(&page_title(target.entry, &self.config.app_name));

        let decision = decide(&target, self.store.is_present(), &self.config);
        if let Decision::Redirect(to) = &decision {
            log::info!("[Guard] {} -> {}", target.full_path(), to);
        }

        Ok(GuardOutcome {
            target: target.location,
            decision,
        })
    }
}
