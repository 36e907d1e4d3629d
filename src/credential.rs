//! 凭据存储模块
//!
//! 管理当前会话的访问令牌：持久化读写、清除，以及 SSO 跳转时从 URL 一次性导入。
//! 存储与地址栏均通过 trait 注入，浏览器实现见 `web` 模块，测试使用内存实现。

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::config::PortalConfig;
use crate::location::Location;

// =========================================================
// 凭据 (Credential)
// =========================================================

/// 不透明的访问令牌
///
/// 本地不校验格式，有效性只由服务端判定。`Debug` 输出不含令牌内容。
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Authorization` 请求头的值
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential(<{} chars>)", self.0.chars().count())
    }
}

// =========================================================
// 平台抽象 (Platform Abstraction)
// =========================================================

/// 持久化键值存储（浏览器中为 LocalStorage）
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    /// 写入，失败返回 `false`
    fn set(&self, key: &str, value: &str) -> bool;
    /// 删除，键不存在也视为成功
    fn delete(&self, key: &str) -> bool;
}

/// 可见地址栏
pub trait AddressBar {
    /// 当前地址（路径、查询与片段）
    fn current(&self) -> Location;
    /// 原地替换地址，不新增历史记录，不触发导航
    fn replace(&self, location: &Location);
}

// =========================================================
// 凭据存储 (Credential Store)
// =========================================================

/// 进程级凭据存储
///
/// 单线程模型下无需加锁；`set`/`clear` 幂等，可被多个失败请求重复触发。
pub struct CredentialStore {
    storage: Rc<dyn KeyValueStorage>,
    address_bar: Rc<dyn AddressBar>,
    storage_key: String,
    query_param: String,
}

impl CredentialStore {
    pub fn new(
        config: &PortalConfig,
        storage: Rc<dyn KeyValueStorage>,
        address_bar: Rc<dyn AddressBar>,
    ) -> Self {
        Self {
            storage,
            address_bar,
            storage_key: config.token_storage_key.clone(),
            query_param: config.token_query_param.clone(),
        }
    }

    /// 读取当前凭据
    ///
    /// URL 中携带凭据参数时优先使用：写入存储、从地址栏中移除后立即返回。
    /// 移除后再次调用不会重复导入，回落到已持久化的值。
    pub fn get(&self) -> Option<Credential> {
        if let Some(token) = self.import_from_url() {
            return Some(token);
        }

        self.storage
            .get(&self.storage_key)
            .filter(|token| !token.is_empty())
            .map(Credential)
    }

    /// 持久化凭据，覆盖旧值
    pub fn set(&self, token: &Credential) {
        if !self.storage.set(&self.storage_key, token.as_str()) {
            log::warn!("[Credential] 写入存储失败，凭据仅在本次读取中有效");
        }
    }

    /// 清除凭据，幂等
    pub fn clear(&self) {
        self.storage.delete(&self.storage_key);
    }

    /// 是否持有凭据（只判断存在，不判断有效）
    pub fn is_present(&self) -> bool {
        self.get().is_some()
    }

    fn import_from_url(&self) -> Option<Credential> {
        let mut location = self.address_bar.current();
        let token = location
            .query_value(&self.query_param)
            .filter(|token| !token.is_empty())
            .map(Credential::new)?;

        self.set(&token);
        location.take_query(&self.query_param);
        self.address_bar.replace(&location);
        log::info!("[Credential] 已从 URL 导入凭据");

        Some(token)
    }
}

// =========================================================
// 内存实现 (In-memory Implementations)
// =========================================================

/// 内存键值存储，用于测试与非浏览器宿主
#[derive(Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage.set(key, value);
        storage
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn delete(&self, key: &str) -> bool {
        self.entries.borrow_mut().remove(key);
        true
    }
}

/// 内存地址栏，记录替换次数
#[derive(Default)]
pub struct MemoryAddressBar {
    location: RefCell<Location>,
    replacements: RefCell<usize>,
}

impl MemoryAddressBar {
    pub fn new(full_path: &str) -> Self {
        Self {
            location: RefCell::new(Location::parse(full_path)),
            replacements: RefCell::new(0),
        }
    }

    /// 模拟页面跳转到新地址（如 SSO 回跳）
    pub fn visit(&self, full_path: &str) {
        *self.location.borrow_mut() = Location::parse(full_path);
    }

    pub fn replacements(&self) -> usize {
        *self.replacements.borrow()
    }
}

impl AddressBar for MemoryAddressBar {
    fn current(&self) -> Location {
        self.location.borrow().clone()
    }

    fn replace(&self, location: &Location) {
        *self.location.borrow_mut() = location.clone();
        *self.replacements.borrow_mut() += 1;
    }
}
