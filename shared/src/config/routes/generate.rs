use crate::route::RouteEntry;

pub fn routes() -> Vec<RouteEntry> {
    vec![
        RouteEntry::new("/generate")
            .named("ReportGenerate")
            .titled("报告生成")
            .with_icon("EditPen"),
    ]
}
