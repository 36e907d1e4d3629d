//! 知识库模块路由

use crate::route::RouteEntry;

pub fn routes() -> Vec<RouteEntry> {
    vec![
        RouteEntry::new("/kb/reports")
            .named("KBReports")
            .titled("报告管理")
            .with_icon("Folder"),
        RouteEntry::new("/kb/reports/:docId")
            .named("ReportDetail")
            .titled("报告详情")
            .hidden(),
        RouteEntry::new("/kb/cases")
            .named("CaseSearch")
            .titled("案例搜索")
            .with_icon("Search"),
        RouteEntry::new("/kb/cases/:caseId")
            .named("CaseDetail")
            .titled("案例详情")
            .hidden(),
    ]
}
