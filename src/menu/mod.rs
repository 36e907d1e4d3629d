//! 菜单模型
//!
//! 静态菜单树上的只读查询：按路径查找、面包屑、展开分组。
//! 查询均为深度优先、先序、首个匹配者胜出。

use std::collections::HashMap;

use kbportal_shared::MenuNode;
use kbportal_shared::config::{ICONS, menu_config};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MenuError {
    #[error("菜单路径 {path} 同时属于 {first} 与 {second}")]
    DuplicatePath {
        path: String,
        first: String,
        second: String,
    },
}

/// 按路径查找节点，找不到返回 `None`
pub fn find_by_path<'a>(nodes: &'a [MenuNode], path: &str) -> Option<&'a MenuNode> {
    for node in nodes {
        if node.has_path(path) {
            return Some(node);
        }
        if let Some(found) = find_by_path(&node.children, path) {
            return Some(found);
        }
    }
    None
}

/// 从根级祖先到匹配节点（含）的节点序列，找不到返回空序列
pub fn breadcrumb<'a>(nodes: &'a [MenuNode], path: &str) -> Vec<&'a MenuNode> {
    let mut trail = Vec::new();
    if descend(nodes, path, &mut trail) {
        trail
    } else {
        Vec::new()
    }
}

fn descend<'a>(nodes: &'a [MenuNode], path: &str, trail: &mut Vec<&'a MenuNode>) -> bool {
    for node in nodes {
        trail.push(node);
        if node.has_path(path) || descend(&node.children, path, trail) {
            return true;
        }
        trail.pop();
    }
    false
}

/// 只读菜单树
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuTree {
    roots: Vec<MenuNode>,
}

impl MenuTree {
    /// 构建菜单树并校验路径唯一
    pub fn new(roots: Vec<MenuNode>) -> Result<Self, MenuError> {
        check_unique_paths(&roots)?;
        Ok(Self { roots })
    }

    /// 应用内置的侧边栏菜单
    pub fn configured() -> Result<Self, MenuError> {
        Self::new(menu_config())
    }

    pub fn roots(&self) -> &[MenuNode] {
        &self.roots
    }

    pub fn find_by_path(&self, path: &str) -> Option<&MenuNode> {
        find_by_path(&self.roots, path)
    }

    pub fn breadcrumb(&self, path: &str) -> Vec<&MenuNode> {
        breadcrumb(&self.roots, path)
    }

    /// 需要展开的分组：匹配节点的全部祖先 id
    pub fn open_keys(&self, path: &str) -> Vec<&str> {
        let mut trail = self.breadcrumb(path);
        trail.pop();
        trail.into_iter().map(|node| node.id.as_str()).collect()
    }

    /// 去掉隐藏节点（连同其子树）后的菜单，用于渲染
    pub fn visible(&self) -> Vec<MenuNode> {
        fn prune(nodes: &[MenuNode]) -> Vec<MenuNode> {
            nodes
                .iter()
                .filter(|node| !node.hidden)
                .map(|node| MenuNode {
                    children: prune(&node.children),
                    ..node.clone()
                })
                .collect()
        }
        prune(&self.roots)
    }
}

fn check_unique_paths(roots: &[MenuNode]) -> Result<(), MenuError> {
    let mut owners: HashMap<&str, &str> = HashMap::new();
    let mut stack: Vec<&MenuNode> = roots.iter().rev().collect();

    while let Some(node) = stack.pop() {
        if let Some(path) = node.path.as_deref().filter(|p| !p.is_empty()) {
            if let Some(first) = owners.insert(path, &node.id) {
                return Err(MenuError::DuplicatePath {
                    path: path.to_string(),
                    first: first.to_string(),
                    second: node.id.clone(),
                });
            }
        }
        stack.extend(node.children.iter().rev());
    }
    Ok(())
}

// =========================================================
// 图标表
// =========================================================

/// 图标名到前端资源的映射
#[derive(Debug, Clone, Default)]
pub struct IconRegistry {
    assets: HashMap<String, String>,
}

impl IconRegistry {
    pub fn new<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self {
            assets: entries
                .into_iter()
                .map(|(name, asset)| (name.to_string(), asset.to_string()))
                .collect(),
        }
    }

    /// 内置图标表
    pub fn configured() -> Self {
        Self::new(ICONS.iter().copied())
    }

    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.assets.get(name).map(String::as_str)
    }

    /// 节点的图标资源，无图标或未登记时为 `None`
    pub fn for_node(&self, node: &MenuNode) -> Option<&str> {
        node.icon.as_deref().and_then(|name| self.resolve(name))
    }
}

#[cfg(test)]
mod tests;
