//! 估价知识库前端共享定义
//!
//! 只包含纯数据：路由条目、菜单节点、URL/存储常量，以及 `config`
//! 下的静态配置（菜单树、各业务模块路由、图标表）。
//! 不依赖任何浏览器 API，可在原生目标上直接测试。

pub mod config;
pub mod menu;
pub mod route;

pub use menu::{Badge, MenuNode};
pub use route::{PathPattern, RouteEntry, Segment};

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// LocalStorage 中保存凭据的键
pub const TOKEN_STORAGE_KEY: &str = "api_token";
/// SSO 跳转时携带凭据的查询参数
pub const TOKEN_QUERY_PARAM: &str = "token";
/// 登录页携带原始目标路径的查询参数
pub const REDIRECT_QUERY_PARAM: &str = "redirect";
/// 鉴权请求头
pub const HEADER_AUTHORIZATION: &str = "Authorization";

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";
pub const LANDING_PATH: &str = "/dashboard";
pub const API_BASE_URL: &str = "/api";
/// 未配置标题时使用的应用名
pub const APP_NAME: &str = "估价知识库";
