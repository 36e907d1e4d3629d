use crate::menu::MenuNode;

/// 侧边栏菜单
pub fn menu_config() -> Vec<MenuNode> {
    vec![
        MenuNode::new("dashboard", "统计面板")
            .with_icon("DataLine")
            .with_path("/dashboard"),
        MenuNode::new("kb", "知识库")
            .with_icon("FolderOpened")
            .with_children(vec![
                MenuNode::new("kb-manage", "报告管理").with_path("/kb/reports"),
                MenuNode::new("kb-cases", "案例搜索").with_path("/kb/cases"),
            ]),
        MenuNode::new("review", "报告审查")
            .with_icon("Document")
            .with_children(vec![
                MenuNode::new("review-tasks", "审查任务").with_path("/review/tasks"),
                MenuNode::new("review-instant", "即时审查").with_path("/review/instant"),
            ]),
        MenuNode::new("generate", "报告生成")
            .with_icon("EditPen")
            .with_path("/generate"),
    ]
}
