//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 提供凭据的持久化读写。

use crate::credential::KeyValueStorage;

/// 浏览器 LocalStorage
pub struct LocalStorage;

impl LocalStorage {
    /// 获取 LocalStorage 实例（隐私模式等情况下可能不可用）
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStorage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    fn delete(&self, key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}
