//! 提示队列
//!
//! 提示写入 Leptos 信号，由界面层渲染，数秒后自动移除。

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::notice::{Notice, Notifier};

/// 提示停留时间（毫秒）
const NOTICE_MILLIS: u32 = 3000;

#[derive(Clone, Copy)]
pub struct NoticeBoard {
    notices: RwSignal<Vec<Notice>>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self {
            notices: RwSignal::new(Vec::new()),
        }
    }

    /// 当前待显示的提示
    pub fn notices(&self) -> ReadSignal<Vec<Notice>> {
        self.notices.read_only()
    }

    pub fn dismiss(&self, index: usize) {
        self.notices.update(|list| {
            if index < list.len() {
                list.remove(index);
            }
        });
    }
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for NoticeBoard {
    fn notify(&self, notice: Notice) {
        log::info!("[Notice] {}", notice.message);
        self.notices.update(|list| list.push(notice));

        let notices = self.notices;
        Timeout::new(NOTICE_MILLIS, move || {
            notices.update(|list| {
                if !list.is_empty() {
                    list.remove(0);
                }
            });
        })
        .forget();
    }
}

/// 从 Context 获取提示队列
pub fn use_notices() -> Option<NoticeBoard> {
    use_context::<NoticeBoard>()
}
