//! 地址解析
//!
//! 把 `path?query#hash` 形式的完整路径拆成结构化的 `Location`，
//! 查询参数保持原有顺序，值已解码。

use std::fmt;

/// 一个应用内位置
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    pub path: String,
    pub query: Vec<(String, String)>,
    pub hash: Option<String>,
}

impl Location {
    /// 仅包含路径的位置
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
            hash: None,
        }
    }

    /// 解析完整路径，空路径视为 `/`
    pub fn parse(full_path: &str) -> Self {
        let (rest, hash) = match full_path.split_once('#') {
            Some((rest, hash)) => (rest, Some(hash.to_string())),
            None => (full_path, None),
        };
        let (path, search) = rest.split_once('?').unwrap_or((rest, ""));

        Self {
            path: if path.is_empty() {
                "/".to_string()
            } else {
                path.to_string()
            },
            query: parse_query(search),
            hash,
        }
    }

    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// 第一个同名查询参数的值
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// 移除所有同名查询参数，返回被移除的第一个值
    pub fn take_query(&mut self, key: &str) -> Option<String> {
        let first = self.query_value(key).map(str::to_string);
        self.query.retain(|(k, _)| k != key);
        first
    }

    /// 编码后的查询串（不含 `?`）
    pub fn search(&self) -> String {
        self.query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// 完整路径：路径、查询与片段
    pub fn full_path(&self) -> String {
        let mut out = self.path.clone();
        if !self.query.is_empty() {
            out.push('?');
            out.push_str(&self.search());
        }
        if let Some(hash) = &self.hash {
            out.push('#');
            out.push_str(hash);
        }
        out
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_path())
    }
}

/// 解析 `a=1&b=2` 形式的查询串（可带前导 `?`）
pub fn parse_query(search: &str) -> Vec<(String, String)> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(k), decode_component(v))
        })
        .collect()
}

/// 表单编码解码：`+` 视为空格，非法转义保留原文
pub fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}
