//! 路由服务 - Leptos 集成
//!
//! 把装配好的 `Portal` 放入 Context，向组件暴露当前位置、面包屑与导航方法。
//! 浏览器后退/前进 (popstate) 同样经过守卫。

use std::rc::Rc;

use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use kbportal_shared::MenuNode;

use super::location::{BrowserHistory, current_full_path};
use super::notice::NoticeBoard;
use crate::config::PortalConfig;
use crate::location::Location;
use crate::portal::{Portal, PortalError};
use crate::router::Navigator;

/// 路由服务
///
/// `Portal` 含有 `Rc`，以本地存储的 `StoredValue` 放入 Context。
#[derive(Clone, Copy)]
pub struct RouterService {
    location: ReadSignal<Option<Location>>,
    portal: StoredValue<Rc<Portal>, LocalStorage>,
}

impl RouterService {
    /// 当前位置信号
    pub fn location(&self) -> ReadSignal<Option<Location>> {
        self.location
    }

    /// 导航（经过守卫）
    pub fn navigate(&self, path: &str) {
        self.portal.with_value(|portal| portal.router.navigate(path));
    }

    /// 当前位置的面包屑（响应式）
    pub fn breadcrumb(&self) -> Vec<MenuNode> {
        let Some(location) = self.location.get() else {
            return Vec::new();
        };
        self.portal.with_value(|portal| {
            portal
                .menu
                .breadcrumb(&location.path)
                .into_iter()
                .cloned()
                .collect()
        })
    }

    /// 需要展开的菜单分组（响应式）
    pub fn open_keys(&self) -> Vec<String> {
        let Some(location) = self.location.get() else {
            return Vec::new();
        };
        self.portal.with_value(|portal| {
            portal
                .menu
                .open_keys(&location.path)
                .into_iter()
                .map(str::to_string)
                .collect()
        })
    }

    /// 访问装配好的门户（API 客户端、会话等）
    pub fn with_portal<U>(&self, f: impl FnOnce(&Portal) -> U) -> U {
        self.portal.with_value(|portal| f(portal))
    }

    /// 浏览器后退/前进时重新执行守卫（替换当前记录）
    fn init_popstate_listener(&self) {
        let portal = self.portal;

        let closure = Closure::<dyn Fn()>::new(move || {
            let path = current_full_path();
            portal.with_value(|portal| {
                if let Err(e) = portal.router.replace(&path) {
                    log::error!("[Router] popstate 导航失败: {e}");
                }
            });
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }
}

/// 启动门户
///
/// 需在组件内调用：装配门户、处理 SSO 凭据导入、对当前地址执行首次导航，
/// 并把 `RouterService` 与 `NoticeBoard` 提供到 Context。
pub fn boot(config: PortalConfig) -> Result<RouterService, PortalError> {
    let history = BrowserHistory::new();
    let notices = NoticeBoard::new();
    provide_context(notices);

    let portal = Portal::configured(config, super::browser_services(history, notices))?;
    portal.start(&current_full_path())?;

    let router = RouterService {
        location: history.location(),
        portal: StoredValue::new_local(Rc::new(portal)),
    };
    router.init_popstate_listener();
    provide_context(router);
    Ok(router)
}

/// 从 Context 获取路由服务
pub fn use_router() -> Option<RouterService> {
    use_context::<RouterService>()
}
