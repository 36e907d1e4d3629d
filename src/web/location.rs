//! 地址栏、History 与文档标题
//!
//! 所有对 window.location / window.history 的操作都集中在此。

use leptos::prelude::*;
use wasm_bindgen::JsValue;

use crate::credential::AddressBar;
use crate::guard::TitleSink;
use crate::location::Location;
use crate::router::History;

/// 当前浏览器地址（路径 + 查询串 + 片段）
pub fn current_full_path() -> String {
    let Some(location) = web_sys::window().map(|w| w.location()) else {
        return "/".to_string();
    };
    let path = location.pathname().unwrap_or_else(|_| "/".to_string());
    let search = location.search().unwrap_or_default();
    let hash = location.hash().unwrap_or_default();
    format!("{path}{search}{hash}")
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 可见地址栏：替换 URL 但不新增历史记录
pub struct BrowserAddressBar;

impl AddressBar for BrowserAddressBar {
    fn current(&self) -> Location {
        Location::parse(&current_full_path())
    }

    fn replace(&self, location: &Location) {
        replace_history_state(&location.full_path());
    }
}

/// 浏览器历史记录
///
/// 每次提交同时更新位置信号，驱动界面刷新。
#[derive(Clone, Copy)]
pub struct BrowserHistory {
    location: RwSignal<Option<Location>>,
}

impl BrowserHistory {
    pub fn new() -> Self {
        Self {
            location: RwSignal::new(None),
        }
    }

    pub fn location(&self) -> ReadSignal<Option<Location>> {
        self.location.read_only()
    }
}

impl Default for BrowserHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl History for BrowserHistory {
    fn push(&self, location: &Location) {
        push_history_state(&location.full_path());
        self.location.set(Some(location.clone()));
    }

    fn replace(&self, location: &Location) {
        replace_history_state(&location.full_path());
        self.location.set(Some(location.clone()));
    }
}

/// `document.title`
pub struct DocumentTitle;

impl TitleSink for DocumentTitle {
    fn set_title(&self, title: &str) {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            document.set_title(title);
        }
    }
}
