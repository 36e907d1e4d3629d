//! 审查模块路由

use crate::route::RouteEntry;

pub fn routes() -> Vec<RouteEntry> {
    vec![
        RouteEntry::new("/review/tasks")
            .named("ReviewTasks")
            .titled("审查任务")
            .with_icon("List"),
        RouteEntry::new("/review/tasks/:taskId")
            .named("ReviewTaskDetail")
            .titled("任务详情")
            .hidden(),
        RouteEntry::new("/review/instant")
            .named("InstantReview")
            .titled("即时审查")
            .with_icon("Lightning"),
    ]
}
