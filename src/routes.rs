//! 路由表组装与解析
//!
//! 启动时把固定的公开路由（根重定向、登录）与各业务模块路由按顺序拼接，
//! 末尾追加通配的 404 路由。未声明认证要求的业务路由一律补为需要认证。
//! 解析时首个匹配者胜出。

use kbportal_shared::route::PatternError;
use kbportal_shared::RouteEntry;

use crate::config::PortalConfig;
use crate::error::NavigationError;
use crate::location::{Location, decode_component};

/// 重定向链上限
pub const MAX_REDIRECTS: usize = 8;

pub const CATCH_ALL_PATTERN: &str = "/:pathMatch(.*)*";
pub const LOGIN_ROUTE_NAME: &str = "Login";
pub const NOT_FOUND_ROUTE_NAME: &str = "NotFound";

/// 解析结果：命中的路由条目、最终位置与路径参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute<'a> {
    pub entry: &'a RouteEntry,
    /// 跟随重定向后的位置
    pub location: Location,
    /// 已解码的路径参数
    pub params: Vec<(String, String)>,
}

impl ResolvedRoute<'_> {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn full_path(&self) -> String {
        self.location.full_path()
    }
}

/// 组装完成的只读路由表
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// 组装路由表
    ///
    /// 顺序：根重定向、登录页、各业务分组（按传入顺序）、通配 404。
    /// 业务分组中的通配路由会被丢弃，以保证 404 是最后的匹配者。
    pub fn assemble<I>(config: &PortalConfig, groups: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = Vec<RouteEntry>>,
    {
        let mut entries = vec![
            RouteEntry::try_new(&config.home_path)?
                .named("Root")
                .redirect_to(&config.landing_path)
                .public(),
            RouteEntry::try_new(&config.login_path)?
                .named(LOGIN_ROUTE_NAME)
                .titled("登录")
                .public(),
        ];

        for route in groups.into_iter().flatten() {
            if route.path.is_catch_all() {
                log::warn!("[Routes] 忽略业务模块中的通配路由 {}", route.path);
                continue;
            }
            let mut route = route;
            route.requires_auth.get_or_insert(true);
            entries.push(route);
        }

        entries.push(
            RouteEntry::try_new(CATCH_ALL_PATTERN)?
                .named(NOT_FOUND_ROUTE_NAME)
                .titled("页面不存在")
                .public(),
        );

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn by_name(&self, name: &str) -> Option<&RouteEntry> {
        self.entries
            .iter()
            .find(|entry| entry.name.as_deref() == Some(name))
    }

    /// 首个匹配路径（不含查询串）的条目及其原始参数
    pub fn match_path(&self, path: &str) -> Option<(&RouteEntry, Vec<(String, String)>)> {
        self.entries
            .iter()
            .find_map(|entry| entry.path.matches(path).map(|params| (entry, params)))
    }

    /// 解析完整路径并跟随重定向
    ///
    /// 重定向目标既不带查询串也不带片段时，沿用原查询串与片段；否则都不沿用。
    pub fn resolve(&self, full_path: &str) -> Result<ResolvedRoute<'_>, NavigationError> {
        let mut location = Location::parse(full_path);

        for _ in 0..=MAX_REDIRECTS {
            // 通配路由保证总能命中；表为空时视为无法解析
            let Some((entry, params)) = self.match_path(&location.path) else {
                break;
            };

            match &entry.redirect {
                Some(target) => {
                    let mut next = Location::parse(target);
                    if !target.contains(['?', '#']) {
                        next.query = std::mem::take(&mut location.query);
                        next.hash = location.hash.take();
                    }
                    location = next;
                }
                None => {
                    let params = params
                        .into_iter()
                        .map(|(k, v)| (k, decode_component_path(&v)))
                        .collect();
                    return Ok(ResolvedRoute {
                        entry,
                        location,
                        params,
                    });
                }
            }
        }

        Err(NavigationError::RedirectLoop {
            from: full_path.to_string(),
            hops: MAX_REDIRECTS,
        })
    }
}

/// 路径段解码：与查询参数不同，`+` 保持原样
fn decode_component_path(raw: &str) -> String {
    if raw.contains('+') {
        return raw
            .split('+')
            .map(decode_component)
            .collect::<Vec<_>>()
            .join("+");
    }
    decode_component(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kbportal_shared::config::routes::feature_groups;

    fn table() -> RouteTable {
        RouteTable::assemble(&PortalConfig::default(), feature_groups()).unwrap()
    }

    #[test]
    fn test_assembled_order_infrastructure_first_catch_all_last() {
        let table = table();
        let paths: Vec<&str> = table.entries().iter().map(|e| e.path.as_str()).collect();

        assert_eq!(paths[0], "/");
        assert_eq!(paths[1], "/login");
        assert_eq!(paths[2], "/dashboard");
        assert_eq!(*paths.last().unwrap(), CATCH_ALL_PATTERN);
        assert_eq!(
            table
                .entries()
                .iter()
                .filter(|e| e.path.is_catch_all())
                .count(),
            1
        );
    }

    #[test]
    fn test_feature_routes_require_auth_and_infrastructure_is_public() {
        let table = table();
        for entry in table.entries() {
            let infrastructure = matches!(
                entry.name.as_deref(),
                Some("Root") | Some(LOGIN_ROUTE_NAME) | Some(NOT_FOUND_ROUTE_NAME)
            );
            assert_eq!(entry.requires_auth(), !infrastructure, "{}", entry.path);
            assert!(entry.requires_auth.is_some());
        }
    }

    #[test]
    fn test_declared_public_feature_route_is_kept_public() {
        let group = vec![
            RouteEntry::try_new("/help").unwrap().public(),
            RouteEntry::try_new("/private").unwrap(),
        ];
        let table = RouteTable::assemble(&PortalConfig::default(), vec![group]).unwrap();

        assert!(!table.match_path("/help").unwrap().0.requires_auth());
        assert!(table.match_path("/private").unwrap().0.requires_auth());
    }

    #[test]
    fn test_feature_catch_all_is_dropped() {
        let group = vec![
            RouteEntry::try_new("/:rest(.*)*").unwrap(),
            RouteEntry::try_new("/after").unwrap(),
        ];
        let table = RouteTable::assemble(&PortalConfig::default(), vec![group]).unwrap();

        assert_eq!(table.match_path("/after").unwrap().0.path.as_str(), "/after");
        assert_eq!(
            table.match_path("/nowhere").unwrap().0.name.as_deref(),
            Some(NOT_FOUND_ROUTE_NAME)
        );
    }

    #[test]
    fn test_assemble_is_deterministic() {
        assert_eq!(table().entries(), table().entries());
    }

    #[test]
    fn test_resolve_first_match_wins_with_params() {
        let table = table();
        let resolved = table.resolve("/kb/reports/doc%201?tab=pdf").unwrap();

        assert_eq!(resolved.entry.name.as_deref(), Some("ReportDetail"));
        assert_eq!(resolved.param("docId"), Some("doc 1"));
        assert_eq!(resolved.full_path(), "/kb/reports/doc%201?tab=pdf");
    }

    #[test]
    fn test_resolve_unknown_path_hits_not_found() {
        let table = table();
        let resolved = table.resolve("/no/such/page").unwrap();
        assert_eq!(resolved.entry.name.as_deref(), Some(NOT_FOUND_ROUTE_NAME));
        assert!(!resolved.entry.requires_auth());
    }

    #[test]
    fn test_resolve_follows_root_redirect_and_keeps_query() {
        let table = table();
        let resolved = table.resolve("/?from=sso").unwrap();

        assert_eq!(resolved.entry.name.as_deref(), Some("Dashboard"));
        assert_eq!(resolved.full_path(), "/dashboard?from=sso");
    }

    #[test]
    fn test_redirect_target_with_query_or_hash_drops_both_originals() {
        let group = vec![
            RouteEntry::try_new("/old-query").unwrap().redirect_to("/kb/cases?tab=all"),
            RouteEntry::try_new("/old-hash").unwrap().redirect_to("/kb/cases#top"),
            RouteEntry::try_new("/old-bare").unwrap().redirect_to("/kb/cases"),
            RouteEntry::try_new("/kb/cases").unwrap(),
        ];
        let table = RouteTable::assemble(&PortalConfig::default(), vec![group]).unwrap();

        assert_eq!(
            table.resolve("/old-query?q=1#frag").unwrap().full_path(),
            "/kb/cases?tab=all"
        );
        assert_eq!(
            table.resolve("/old-hash?q=1#frag").unwrap().full_path(),
            "/kb/cases#top"
        );
        assert_eq!(
            table.resolve("/old-bare?q=1#frag").unwrap().full_path(),
            "/kb/cases?q=1#frag"
        );
    }

    #[test]
    fn test_redirect_loop_is_reported() {
        let group = vec![
            RouteEntry::try_new("/a").unwrap().redirect_to("/b"),
            RouteEntry::try_new("/b").unwrap().redirect_to("/a"),
        ];
        let table = RouteTable::assemble(&PortalConfig::default(), vec![group]).unwrap();

        assert!(matches!(
            table.resolve("/a"),
            Err(NavigationError::RedirectLoop { .. })
        ));
    }

    #[test]
    fn test_by_name() {
        let table = table();
        assert_eq!(
            table.by_name("InstantReview").map(|e| e.path.as_str()),
            Some("/review/instant")
        );
        assert!(table.by_name("Missing").is_none());
    }
}
