//! 静态配置数据
//!
//! 菜单内容、各业务模块的路由列表与图标表。核心逻辑只消费这些数据。

mod icons;
mod menu;
pub mod routes;

pub use icons::ICONS;
pub use menu::menu_config;
