//! 门户装配
//!
//! 把凭据存储、请求管道、路由表、守卫、路由服务与菜单模型装配在一起。
//! 平台相关的能力通过 `Services` 注入：浏览器端见 `web::browser_services`，
//! 测试使用各模块的内存实现。

use std::rc::Rc;

use kbportal_shared::config::{menu_config, routes::feature_groups};
use kbportal_shared::route::PatternError;
use kbportal_shared::{MenuNode, RouteEntry};

use crate::config::PortalConfig;
use crate::credential::{AddressBar, CredentialStore, KeyValueStorage};
use crate::error::NavigationError;
use crate::guard::{NavigationGuard, TitleSink};
use crate::location::Location;
use crate::menu::{IconRegistry, MenuError, MenuTree};
use crate::notice::Notifier;
use crate::pipeline::{ApiClient, BearerAuth, HttpTransport, SessionGuard};
use crate::router::{History, Router};
use crate::routes::RouteTable;
use crate::session::Session;

#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error("路由配置错误: {0}")]
    Route(#[from] PatternError),
    #[error("菜单配置错误: {0}")]
    Menu(#[from] MenuError),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
}

/// 平台能力
pub struct Services {
    pub storage: Rc<dyn KeyValueStorage>,
    pub address_bar: Rc<dyn AddressBar>,
    pub transport: Rc<dyn HttpTransport>,
    pub history: Rc<dyn History>,
    pub title: Rc<dyn TitleSink>,
    pub notifier: Rc<dyn Notifier>,
}

#[cfg(not(target_arch = "wasm32"))]
impl Services {
    /// 无界面宿主：内存存储与历史记录、reqwest 传输、提示只写日志
    ///
    /// `full_path` 为启动时地址栏中的完整路径，可携带 SSO 凭据。
    pub fn native(full_path: &str) -> Self {
        use crate::credential::{MemoryAddressBar, MemoryStorage};
        use crate::guard::MemoryTitle;
        use crate::notice::LogNotifier;
        use crate::pipeline::ReqwestTransport;
        use crate::router::MemoryHistory;

        Self {
            storage: Rc::new(MemoryStorage::new()),
            address_bar: Rc::new(MemoryAddressBar::new(full_path)),
            transport: Rc::new(ReqwestTransport::new()),
            history: Rc::new(MemoryHistory::new()),
            title: Rc::new(MemoryTitle::new()),
            notifier: Rc::new(LogNotifier),
        }
    }
}

pub struct Portal {
    pub config: PortalConfig,
    pub credentials: Rc<CredentialStore>,
    pub routes: Rc<RouteTable>,
    pub router: Rc<Router>,
    pub api: ApiClient,
    pub session: Session,
    pub menu: MenuTree,
    pub icons: IconRegistry,
}

impl Portal {
    /// 使用内置的菜单与业务路由装配
    pub fn configured(config: PortalConfig, services: Services) -> Result<Self, PortalError> {
        Self::assemble(config, services, feature_groups(), menu_config())
    }

    pub fn assemble(
        config: PortalConfig,
        services: Services,
        route_groups: Vec<Vec<RouteEntry>>,
        menu_roots: Vec<MenuNode>,
    ) -> Result<Self, PortalError> {
        let credentials = Rc::new(CredentialStore::new(
            &config,
            services.storage,
            services.address_bar,
        ));
        let routes = Rc::new(RouteTable::assemble(&config, route_groups)?);
        let menu = MenuTree::new(menu_roots)?;

        let guard = NavigationGuard::new(&config, routes.clone(), credentials.clone(), services.title);
        let router = Rc::new(Router::new(guard, services.history));

        let api = ApiClient::new(&config, services.transport)
            .with_interceptor(Rc::new(BearerAuth::new(credentials.clone())))
            .with_interceptor(Rc::new(SessionGuard::new(
                credentials.clone(),
                services.notifier,
                router.clone(),
                &config.login_path,
            )));

        let session = Session::new(&config, credentials.clone(), router.clone());

        Ok(Self {
            config,
            credentials,
            routes,
            router,
            api,
            session,
            menu,
            icons: IconRegistry::configured(),
        })
    }

    /// 页面加载：先读取凭据（处理 SSO 导入），再对当前地址执行首次导航
    pub fn start(&self, full_path: &str) -> Result<Location, PortalError> {
        self.credentials.get();
        // 导入凭据会改写地址栏，使用去掉凭据参数后的地址
        let target = strip_param(full_path, &self.config.token_query_param);
        let committed = self.router.start(&target)?;
        Ok(committed.unwrap_or_else(|| Location::parse(&target)))
    }

    /// 当前位置的面包屑
    pub fn breadcrumb(&self) -> Vec<&MenuNode> {
        match self.router.current() {
            Some(location) => self.menu.breadcrumb(&location.path),
            None => Vec::new(),
        }
    }

    /// 当前位置所需展开的菜单分组
    pub fn open_keys(&self) -> Vec<&str> {
        match self.router.current() {
            Some(location) => self.menu.open_keys(&location.path),
            None => Vec::new(),
        }
    }
}

fn strip_param(full_path: &str, param: &str) -> String {
    let mut location = Location::parse(full_path);
    location.take_query(param);
    location.full_path()
}
