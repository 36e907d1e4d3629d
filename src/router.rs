//! 路由服务
//!
//! 把守卫决定应用到历史记录上，实现"请求 -> 验证(Guard) -> 处理 -> 提交"的导航流程。
//! 守卫给出的重定向会再次经过守卫，直到放行或超过重定向上限。
//! 评估过程中发起的新导航会排队，待当前导航完成后再执行，守卫不会重入。

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::NavigationError;
use crate::guard::{Decision, NavigationGuard};
use crate::location::Location;
use crate::routes::MAX_REDIRECTS;

/// 发起导航的能力（请求管道在 401 时使用）
pub trait Navigator {
    fn navigate(&self, target: &str);
}

/// 历史记录
pub trait History {
    fn push(&self, location: &Location);
    fn replace(&self, location: &Location);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryMode {
    Push,
    Replace,
}

pub struct Router {
    guard: NavigationGuard,
    history: Rc<dyn History>,
    current: RefCell<Option<Location>>,
    resolving: Cell<bool>,
    pending: RefCell<Option<(String, HistoryMode)>>,
}

impl Router {
    pub fn new(guard: NavigationGuard, history: Rc<dyn History>) -> Self {
        Self {
            guard,
            history,
            current: RefCell::new(None),
            resolving: Cell::new(false),
            pending: RefCell::new(None),
        }
    }

    /// 当前已提交的位置
    pub fn current(&self) -> Option<Location> {
        self.current.borrow().clone()
    }

    /// 页面加载时的首次导航（替换当前历史记录）
    pub fn start(&self, full_path: &str) -> Result<Option<Location>, NavigationError> {
        self.replace(full_path)
    }

    /// 用户导航，新增历史记录
    pub fn push(&self, target: &str) -> Result<Option<Location>, NavigationError> {
        self.go(target, HistoryMode::Push)
    }

    /// 替换当前历史记录（重定向、浏览器前进后退）
    pub fn replace(&self, target: &str) -> Result<Option<Location>, NavigationError> {
        self.go(target, HistoryMode::Replace)
    }

    /// 执行导航
    ///
    /// 返回提交后的位置；若当前有导航正在评估，则排队并返回 `None`。
    fn go(&self, target: &str, mode: HistoryMode) -> Result<Option<Location>, NavigationError> {
        if self.resolving.get() {
            *self.pending.borrow_mut() = Some((target.to_string(), mode));
            return Ok(None);
        }

        self.resolving.set(true);
        let result = self.resolve_and_commit(target, mode);
        self.resolving.set(false);

        let queued = self.pending.borrow_mut().take();
        let committed = match result {
            Ok(committed) => committed,
            Err(e) => {
                // 当前导航失败不影响排队中的导航
                if let Some((next, next_mode)) = queued {
                    log::warn!("[Router] 导航失败: {e}，继续执行排队的 {next}");
                    if let Err(next_err) = self.go(&next, next_mode) {
                        log::error!("[Router] 排队导航失败: {next_err}");
                    }
                }
                return Err(e);
            }
        };

        if let Some((next, next_mode)) = queued {
            return self.go(&next, next_mode);
        }
        Ok(Some(committed))
    }

    fn resolve_and_commit(&self, target: &str, mode: HistoryMode) -> Result<Location, NavigationError> {
        let mut requested = target.to_string();

        for _ in 0..=MAX_REDIRECTS {
            let outcome = self.guard.evaluate(&requested)?;
            match outcome.decision {
                Decision::Allow => {
                    self.commit(&outcome.target, mode);
                    return Ok(outcome.target);
                }
                Decision::Redirect(to) => requested = to.full_path(),
            }
        }

        Err(NavigationError::RedirectLoop {
            from: target.to_string(),
            hops: MAX_REDIRECTS,
        })
    }

    fn commit(&self, location: &Location, mode: HistoryMode) {
        // 重复导航到当前位置不新增历史记录
        if self.current.borrow().as_ref() == Some(location) {
            return;
        }

        match mode {
            HistoryMode::Push => self.history.push(location),
            HistoryMode::Replace => self.history.replace(location),
        }
        *self.current.borrow_mut() = Some(location.clone());
    }
}

impl Navigator for Router {
    fn navigate(&self, target: &str) {
        if let Err(e) = self.push(target) {
            log::error!("[Router] 导航失败: {e}");
        }
    }
}

// =========================================================
// 内存历史记录
// =========================================================

/// 内存历史记录，用于测试与非浏览器宿主
#[derive(Default)]
pub struct MemoryHistory {
    entries: RefCell<Vec<String>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 历史记录中的完整路径，按时间顺序
    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }
}

impl History for MemoryHistory {
    fn push(&self, location: &Location) {
        self.entries.borrow_mut().push(location.full_path());
    }

    fn replace(&self, location: &Location) {
        let mut entries = self.entries.borrow_mut();
        entries.pop();
        entries.push(location.full_path());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PortalConfig;
    use crate::credential::{Credential, CredentialStore, MemoryAddressBar, MemoryStorage};
    use crate::guard::{MemoryTitle, TitleSink};
    use crate::routes::RouteTable;
    use kbportal_shared::RouteEntry;
    use kbportal_shared::config::routes::feature_groups;

    fn router_with(
        groups: Vec<Vec<RouteEntry>>,
        title: Rc<dyn TitleSink>,
    ) -> (Router, Rc<MemoryHistory>, Rc<CredentialStore>) {
        router_with_config(PortalConfig::default(), groups, title)
    }

    fn router_with_config(
        config: PortalConfig,
        groups: Vec<Vec<RouteEntry>>,
        title: Rc<dyn TitleSink>,
    ) -> (Router, Rc<MemoryHistory>, Rc<CredentialStore>) {
        let store = Rc::new(CredentialStore::new(
            &config,
            Rc::new(MemoryStorage::new()),
            Rc::new(MemoryAddressBar::new("/")),
        ));
        let routes = Rc::new(RouteTable::assemble(&config, groups).unwrap());
        let guard = NavigationGuard::new(&config, routes, store.clone(), title);
        let history = Rc::new(MemoryHistory::new());
        (Router::new(guard, history.clone()), history, store)
    }

    fn router() -> (Router, Rc<MemoryHistory>, Rc<CredentialStore>) {
        router_with(feature_groups(), Rc::new(MemoryTitle::new()))
    }

    #[test]
    fn test_start_without_credential_lands_on_login_with_return_path() {
        let (router, history, _) = router();
        let committed = router.start("/review/instant").unwrap().unwrap();

        assert_eq!(committed.full_path(), "/login?redirect=%2Freview%2Finstant");
        assert_eq!(history.entries(), vec!["/login?redirect=%2Freview%2Finstant"]);
    }

    #[test]
    fn test_logged_in_user_visiting_login_ends_on_landing() {
        let (router, history, store) = router();
        store.set(&Credential::new("t"));

        router.start("/dashboard").unwrap();
        router.push("/login").unwrap();

        // /login -> / -> /dashboard，与当前位置相同，不新增记录
        assert_eq!(router.current().unwrap().full_path(), "/dashboard");
        assert_eq!(history.entries(), vec!["/dashboard"]);
    }

    #[test]
    fn test_push_appends_and_replace_overwrites() {
        let (router, history, store) = router();
        store.set(&Credential::new("t"));

        router.start("/dashboard").unwrap();
        router.push("/kb/cases").unwrap();
        router.replace("/kb/cases/12").unwrap();

        assert_eq!(history.entries(), vec!["/dashboard", "/kb/cases/12"]);
    }

    #[test]
    fn test_navigator_is_idempotent_for_repeated_login_redirects() {
        let (router, history, _) = router();
        router.start("/login").unwrap();

        router.navigate("/login");
        router.navigate("/login");

        assert_eq!(history.entries(), vec!["/login"]);
    }

    #[test]
    fn test_redirect_loop_is_an_error() {
        let groups = vec![vec![
            RouteEntry::try_new("/a").unwrap().redirect_to("/b"),
            RouteEntry::try_new("/b").unwrap().redirect_to("/a"),
        ]];
        let (router, history, _) = router_with(groups, Rc::new(MemoryTitle::new()));

        assert!(matches!(
            router.push("/a"),
            Err(NavigationError::RedirectLoop { .. })
        ));
        assert!(history.entries().is_empty());
    }

    /// 设置标题时顺带发起导航，用于验证守卫不重入
    struct NavigatingTitle {
        router: RefCell<Option<Rc<Router>>>,
        fired: Cell<bool>,
    }

    impl TitleSink for NavigatingTitle {
        fn set_title(&self, _title: &str) {
            if self.fired.replace(true) {
                return;
            }
            if let Some(router) = self.router.borrow().as_ref() {
                assert_eq!(router.push("/generate").unwrap(), None);
            }
        }
    }

    #[test]
    fn test_navigation_during_evaluation_is_queued() {
        let title = Rc::new(NavigatingTitle {
            router: RefCell::new(None),
            fired: Cell::new(false),
        });
        let (router, history, store) = router_with(feature_groups(), title.clone());
        store.set(&Credential::new("t"));
        let router = Rc::new(router);
        *title.router.borrow_mut() = Some(router.clone());

        let committed = router.push("/kb/reports").unwrap().unwrap();

        assert_eq!(committed.full_path(), "/generate");
        assert_eq!(history.entries(), vec!["/kb/reports", "/generate"]);
    }

    #[test]
    fn test_queued_navigation_survives_failed_navigation() {
        let config = PortalConfig {
            landing_path: "/a".to_string(),
            ..PortalConfig::default()
        };
        let groups = vec![vec![
            RouteEntry::try_new("/a").unwrap().redirect_to("/b"),
            RouteEntry::try_new("/b").unwrap().redirect_to("/a"),
            RouteEntry::try_new("/generate").unwrap(),
        ]];
        let title = Rc::new(NavigatingTitle {
            router: RefCell::new(None),
            fired: Cell::new(false),
        });
        let (router, history, store) = router_with_config(config, groups, title.clone());
        store.set(&Credential::new("t"));
        let router = Rc::new(router);
        *title.router.borrow_mut() = Some(router.clone());

        // /login -> / -> /a <-> /b 形成循环；评估 /login 时排队了 /generate
        let result = router.push("/login");

        assert!(matches!(result, Err(NavigationError::RedirectLoop { .. })));
        assert_eq!(history.entries(), vec!["/generate"]);
        assert_eq!(router.current().unwrap().full_path(), "/generate");
    }
}
