//! 运行时配置
//!
//! 所有固定常量集中于此，默认值与线上部署一致。
//! 宿主页面可通过变量查找函数覆盖个别字段，读不到时使用默认值。

use std::time::Duration;

use kbportal_shared::{
    API_BASE_URL, APP_NAME, HOME_PATH, LANDING_PATH, LOGIN_PATH, REDIRECT_QUERY_PARAM,
    TOKEN_QUERY_PARAM, TOKEN_STORAGE_KEY,
};
use serde::Deserialize;

/// 所有请求统一的最长等待时间
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("无效的超时配置 {var}={value}")]
    InvalidTimeout { var: String, value: String },
}

/// 门户配置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// 所有请求的基础路径
    pub base_url: String,
    /// 单次请求超时
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    pub token_storage_key: String,
    /// SSO 导入凭据的查询参数名
    pub token_query_param: String,
    /// 登录页回跳参数名
    pub redirect_query_param: String,
    pub login_path: String,
    /// 已登录用户访问登录页时的去处
    pub home_path: String,
    /// 根路径重定向目标
    pub landing_path: String,
    pub app_name: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: API_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            token_storage_key: TOKEN_STORAGE_KEY.to_string(),
            token_query_param: TOKEN_QUERY_PARAM.to_string(),
            redirect_query_param: REDIRECT_QUERY_PARAM.to_string(),
            login_path: LOGIN_PATH.to_string(),
            home_path: HOME_PATH.to_string(),
            landing_path: LANDING_PATH.to_string(),
            app_name: APP_NAME.to_string(),
        }
    }
}

impl PortalConfig {
    /// 从变量表读取配置
    ///
    /// `lookup` 返回变量值，`None` 表示未定义，此时使用默认值。
    /// 超时以秒为单位。
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |name: &str, fallback: String| lookup(name).unwrap_or(fallback);

        let timeout = match lookup("API_TIMEOUT_SECS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidTimeout {
                    var: "API_TIMEOUT_SECS".to_string(),
                    value,
                })?,
            None => defaults.timeout,
        };

        Ok(Self {
            base_url: var("API_BASE_URL", defaults.base_url),
            timeout,
            token_storage_key: var("TOKEN_STORAGE_KEY", defaults.token_storage_key),
            token_query_param: var("TOKEN_QUERY_PARAM", defaults.token_query_param),
            redirect_query_param: var("REDIRECT_QUERY_PARAM", defaults.redirect_query_param),
            login_path: var("LOGIN_PATH", defaults.login_path),
            home_path: var("HOME_PATH", defaults.home_path),
            landing_path: var("LANDING_PATH", defaults.landing_path),
            app_name: var("APP_NAME", defaults.app_name),
        })
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
