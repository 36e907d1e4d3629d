//! 估价知识库前端会话与导航授权层
//!
//! 采用依赖注入的高内聚低耦合架构：
//! - `credential`: 凭据存储（含 SSO 跳转时的 URL 导入）
//! - `pipeline`: 请求管道（附加凭据、归一化失败、401/403 处理）
//! - `routes`: 路由表组装与路径解析
//! - `guard`: 导航守卫（纯决策函数 + 页面标题）
//! - `router`: 路由服务（把守卫决定应用到历史记录）
//! - `menu`: 菜单模型（路径查找、面包屑）
//! - `session`: 登录 / 注销流程
//! - `portal`: 装配入口
//! - `web`: 浏览器端实现（仅 wasm32）

pub mod config;
pub mod credential;
pub mod error;
pub mod guard;
pub mod location;
pub mod menu;
pub mod notice;
pub mod pipeline;
pub mod portal;
pub mod router;
pub mod routes;
pub mod session;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::PortalConfig;
pub use credential::{Credential, CredentialStore};
pub use error::{ApiError, ApiErrorKind, ApiResult, NavigationError, TransportError};
pub use guard::{Decision, NavigationGuard};
pub use location::Location;
pub use menu::MenuTree;
pub use pipeline::ApiClient;
pub use portal::{Portal, PortalError, Services};
pub use router::Router;
pub use routes::RouteTable;
pub use session::Session;

pub use kbportal_shared as shared;
