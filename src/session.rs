//! 会话流程
//!
//! 登录成功后保存凭据并回到登录前的目标页；注销时清除凭据并回到登录页。

use std::rc::Rc;

use crate::config::PortalConfig;
use crate::credential::{Credential, CredentialStore};
use crate::location::Location;
use crate::router::Navigator;

pub struct Session {
    config: PortalConfig,
    store: Rc<CredentialStore>,
    navigator: Rc<dyn Navigator>,
}

impl Session {
    pub fn new(config: &PortalConfig, store: Rc<CredentialStore>, navigator: Rc<dyn Navigator>) -> Self {
        Self {
            config: config.clone(),
            store,
            navigator,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.is_present()
    }

    /// 保存凭据并导航到登录前的目标
    ///
    /// `login_location` 为登录页当前位置，从中读取回跳参数。返回实际导航的目标。
    pub fn login(&self, token: Credential, login_location: &Location) -> String {
        self.store.set(&token);
        let target = self.post_login_target(login_location);
        self.navigator.navigate(&target);
        target
    }

    /// 清除凭据并导航到登录页
    pub fn logout(&self) {
        self.store.clear();
        self.navigator.navigate(&self.config.login_path);
    }

    /// 登录后的去处：安全的站内回跳路径，否则首页
    pub fn post_login_target(&self, login_location: &Location) -> String {
        login_location
            .query_value(&self.config.redirect_query_param)
            .filter(|target| self.is_safe_return_path(target))
            .map(str::to_string)
            .unwrap_or_else(|| self.config.home_path.clone())
    }

    /// 只接受以单个 `/` 开头、且不指回登录页的站内路径
    fn is_safe_return_path(&self, target: &str) -> bool {
        if !target.starts_with('/') || target.starts_with("//") || target.contains('\\') {
            return false;
        }
        Location::parse(target).path != self.config.login_path
    }
}
