//! 路由定义模块 - 领域模型
//!
//! 纯数据层，不依赖于 DOM 或 web_sys。
//! `RouteEntry` 描述一个可导航位置，`PathPattern` 负责路径匹配。

use std::fmt;

use serde::{Deserialize, Serialize};

// =========================================================
// 路径模式 (Path Pattern)
// =========================================================

/// 路径模式中的一段
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// 字面量，如 `kb`
    Static(String),
    /// 单段参数，如 `:docId`
    Param(String),
    /// 通配，如 `:pathMatch(.*)*`，匹配剩余全部路径（可为空）
    CatchAll(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("路径模式必须以 '/' 开头: {0}")]
    NotAbsolute(String),
    #[error("参数名为空: {0}")]
    EmptyParam(String),
    #[error("通配段必须位于末尾: {0}")]
    CatchAllNotLast(String),
}

/// 已解析的路由路径模式
///
/// 与 vue-router 的写法兼容：`/kb/reports/:docId`、`/:pathMatch(.*)*`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PathPattern {
    source: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(source: &str) -> Result<Self, PatternError> {
        if !source.starts_with('/') {
            return Err(PatternError::NotAbsolute(source.to_string()));
        }

        let parts: Vec<&str> = source.split('/').filter(|s| !s.is_empty()).collect();
        let mut segments = Vec::with_capacity(parts.len());

        for (i, part) in parts.iter().enumerate() {
            let segment = match part.strip_prefix(':') {
                Some(rest) => {
                    // `:name(.*)*` 或 `:name(.*)` 视为通配
                    if let Some(open) = rest.find('(') {
                        let name = &rest[..open];
                        if name.is_empty() {
                            return Err(PatternError::EmptyParam(source.to_string()));
                        }
                        if i + 1 != parts.len() {
                            return Err(PatternError::CatchAllNotLast(source.to_string()));
                        }
                        Segment::CatchAll(name.to_string())
                    } else if rest.is_empty() {
                        return Err(PatternError::EmptyParam(source.to_string()));
                    } else {
                        Segment::Param(rest.to_string())
                    }
                }
                None => Segment::Static((*part).to_string()),
            };
            segments.push(segment);
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// 原始模式字符串
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// 是否为通配模式（可匹配任意路径）
    pub fn is_catch_all(&self) -> bool {
        matches!(self.segments.first(), Some(Segment::CatchAll(_)))
    }

    /// 匹配路径（不含查询串），成功时返回按出现顺序排列的参数
    ///
    /// 末尾斜杠与重复斜杠被忽略，参数值保持原样（未解码）。
    pub fn matches(&self, path: &str) -> Option<Vec<(String, String)>> {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let mut params = Vec::new();

        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Static(literal) => {
                    if parts.get(i) != Some(&literal.as_str()) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    let value = parts.get(i)?;
                    params.push((name.clone(), (*value).to_string()));
                }
                Segment::CatchAll(name) => {
                    let rest = parts.get(i..).unwrap_or_default().join("/");
                    params.push((name.clone(), rest));
                    return Some(params);
                }
            }
        }

        (parts.len() == self.segments.len()).then_some(params)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl TryFrom<String> for PathPattern {
    type Error = PatternError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PathPattern> for String {
    fn from(value: PathPattern) -> Self {
        value.source
    }
}

// =========================================================
// 路由条目 (Route Entry)
// =========================================================

/// 一个可导航位置
///
/// `requires_auth` 为 `None` 表示未声明，由路由表组装器补为 `true`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub path: PathPattern,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_auth: Option<bool>,
    /// 不在菜单中显示，但仍可导航（如详情页）
    #[serde(default)]
    pub hidden: bool,
    /// 命中后直接跳转到的路径
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

impl RouteEntry {
    /// 创建静态配置中的路由条目
    ///
    /// # Panics
    /// 路径模式非法时 panic。只供 `config` 下的内置路由使用，其余场景请使用 [`RouteEntry::try_new`]。
    pub(crate) fn new(path: &str) -> Self {
        match Self::try_new(path) {
            Ok(entry) => entry,
            Err(e) => panic!("静态路由配置错误: {e}"),
        }
    }

    pub fn try_new(path: &str) -> Result<Self, PatternError> {
        Ok(Self {
            path: PathPattern::parse(path)?,
            name: None,
            title: None,
            icon: None,
            requires_auth: None,
            hidden: false,
            redirect: None,
        })
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn titled(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// 显式标记为公开（无需登录）
    pub fn public(mut self) -> Self {
        self.requires_auth = Some(false);
        self
    }

    pub fn redirect_to(mut self, target: &str) -> Self {
        self.redirect = Some(target.to_string());
        self
    }

    /// 是否需要认证（未声明时默认需要）
    pub fn requires_auth(&self) -> bool {
        self.requires_auth.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_pattern_matches_exact_path() {
        let pattern = PathPattern::parse("/kb/reports").unwrap();
        assert_eq!(pattern.matches("/kb/reports"), Some(vec![]));
        assert_eq!(pattern.matches("/kb/reports/"), Some(vec![]));
        assert_eq!(pattern.matches("/kb"), None);
        assert_eq!(pattern.matches("/kb/reports/1"), None);
    }

    #[test]
    fn test_param_pattern_captures_segment() {
        let pattern = PathPattern::parse("/kb/reports/:docId").unwrap();
        assert_eq!(
            pattern.matches("/kb/reports/42"),
            Some(vec![("docId".to_string(), "42".to_string())])
        );
        assert_eq!(pattern.matches("/kb/reports"), None);
    }

    #[test]
    fn test_root_pattern_only_matches_root() {
        let pattern = PathPattern::parse("/").unwrap();
        assert_eq!(pattern.matches("/"), Some(vec![]));
        assert_eq!(pattern.matches(""), Some(vec![]));
        assert_eq!(pattern.matches("/login"), None);
    }

    #[test]
    fn test_catch_all_matches_everything() {
        let pattern = PathPattern::parse("/:pathMatch(.*)*").unwrap();
        assert!(pattern.is_catch_all());
        assert_eq!(
            pattern.matches("/no/such/page"),
            Some(vec![("pathMatch".to_string(), "no/such/page".to_string())])
        );
        assert_eq!(
            pattern.matches("/"),
            Some(vec![("pathMatch".to_string(), String::new())])
        );
    }

    #[test]
    fn test_invalid_patterns_are_rejected() {
        assert!(matches!(
            PathPattern::parse("kb"),
            Err(PatternError::NotAbsolute(_))
        ));
        assert!(matches!(
            PathPattern::parse("/kb/:"),
            Err(PatternError::EmptyParam(_))
        ));
        assert!(matches!(
            PathPattern::parse("/:rest(.*)*/tail"),
            Err(PatternError::CatchAllNotLast(_))
        ));
    }

    #[test]
    fn test_requires_auth_defaults_to_true() {
        assert!(RouteEntry::try_new("/kb/cases").unwrap().requires_auth());
        assert!(!RouteEntry::try_new("/login").unwrap().public().requires_auth());
    }

    #[test]
    fn test_try_new_reports_bad_pattern() {
        assert!(matches!(
            RouteEntry::try_new("kb/cases"),
            Err(PatternError::NotAbsolute(_))
        ));
        assert!(matches!(
            RouteEntry::try_new("/:rest(.*)*/tail"),
            Err(PatternError::CatchAllNotLast(_))
        ));
    }

    #[test]
    fn test_route_entry_deserializes_from_json() {
        let json = r#"{"path": "/review/tasks/:taskId", "title": "任务详情", "hidden": true}"#;
        let entry: RouteEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.path.as_str(), "/review/tasks/:taskId");
        assert!(entry.hidden);
        assert_eq!(entry.requires_auth, None);
    }
}
