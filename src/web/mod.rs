//! 浏览器端实现 (仅 wasm32)
//!
//! 为核心模块的各个 trait 提供基于浏览器原生 API 的实现，
//! 并通过 Leptos Context 向组件暴露路由服务与提示队列。

mod http;
mod location;
mod notice;
mod router;
mod storage;

use std::rc::Rc;

pub use http::FetchTransport;
pub use location::{BrowserAddressBar, BrowserHistory, DocumentTitle, current_full_path};
pub use notice::{NoticeBoard, use_notices};
pub use router::{RouterService, boot, use_router};
pub use storage::LocalStorage;

use crate::portal::Services;

/// 安装 console 日志与 panic hook
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"[Portal] logger already installed".into());
    }
}

/// 浏览器平台能力
pub fn browser_services(history: BrowserHistory, notices: NoticeBoard) -> Services {
    Services {
        storage: Rc::new(LocalStorage),
        address_bar: Rc::new(BrowserAddressBar),
        transport: Rc::new(FetchTransport),
        history: Rc::new(history),
        title: Rc::new(DocumentTitle),
        notifier: Rc::new(notices),
    }
}
