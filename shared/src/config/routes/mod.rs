//! 业务模块路由
//!
//! 每个模块只声明自己的页面；认证要求由核心的路由表组装器统一补全。

mod generate;
mod kb;
mod review;
mod stats;

use crate::route::RouteEntry;

pub use generate::routes as generate_routes;
pub use kb::routes as kb_routes;
pub use review::routes as review_routes;
pub use stats::routes as stats_routes;

/// 按菜单顺序排列的全部业务路由分组
pub fn feature_groups() -> Vec<Vec<RouteEntry>> {
    vec![stats_routes(), kb_routes(), review_routes(), generate_routes()]
}
