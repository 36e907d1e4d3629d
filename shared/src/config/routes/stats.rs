use crate::route::RouteEntry;

pub fn routes() -> Vec<RouteEntry> {
    vec![
        RouteEntry::new("/dashboard")
            .named("Dashboard")
            .titled("统计面板")
            .with_icon("DataLine"),
    ]
}
