use super::*;
use kbportal_shared::Badge;

// =========================================================
// 辅助函数
// =========================================================

fn tree() -> MenuTree {
    MenuTree::configured().unwrap()
}

fn ids(nodes: &[&MenuNode]) -> Vec<String> {
    nodes.iter().map(|n| n.id.clone()).collect()
}

fn all_nodes(nodes: &[MenuNode]) -> Vec<&MenuNode> {
    let mut out = Vec::new();
    for node in nodes {
        out.push(node);
        out.extend(all_nodes(&node.children));
    }
    out
}

// =========================================================
// find_by_path
// =========================================================

#[test]
fn test_find_root_level_node() {
    let tree = tree();
    assert_eq!(tree.find_by_path("/dashboard").unwrap().id, "dashboard");
}

#[test]
fn test_find_nested_node() {
    let tree = tree();
    assert_eq!(tree.find_by_path("/kb/cases").unwrap().id, "kb-cases");
    assert_eq!(tree.find_by_path("/review/tasks").unwrap().id, "review-tasks");
}

#[test]
fn test_find_missing_path() {
    let tree = tree();
    assert!(tree.find_by_path("/kb/reports/42").is_none());
    assert!(tree.find_by_path("/kb").is_none());
}

#[test]
fn test_find_in_either_sibling_subtree() {
    let left = MenuNode::new("left", "左").with_children(vec![
        MenuNode::new("left-a", "A").with_path("/a"),
    ]);
    let right = MenuNode::new("right", "右").with_children(vec![
        MenuNode::new("right-b", "B").with_path("/b"),
    ]);

    let forward = MenuTree::new(vec![left.clone(), right.clone()]).unwrap();
    let reversed = MenuTree::new(vec![right, left]).unwrap();

    for tree in [&forward, &reversed] {
        assert_eq!(tree.find_by_path("/a").unwrap().id, "left-a");
        assert_eq!(tree.find_by_path("/b").unwrap().id, "right-b");
    }
}

#[test]
fn test_node_with_path_and_children_matches_itself_first() {
    let roots = vec![
        MenuNode::new("parent", "父")
            .with_path("/parent")
            .with_children(vec![MenuNode::new("child", "子").with_path("/parent/child")]),
    ];
    let tree = MenuTree::new(roots).unwrap();

    assert_eq!(tree.find_by_path("/parent").unwrap().id, "parent");
    assert_eq!(ids(&tree.breadcrumb("/parent/child")), vec!["parent", "child"]);
}

// =========================================================
// breadcrumb
// =========================================================

#[test]
fn test_breadcrumb_review_instant() {
    let tree = tree();
    assert_eq!(
        ids(&tree.breadcrumb("/review/instant")),
        vec!["review", "review-instant"]
    );
}

#[test]
fn test_breadcrumb_root_level() {
    let tree = tree();
    assert_eq!(ids(&tree.breadcrumb("/generate")), vec!["generate"]);
}

#[test]
fn test_breadcrumb_missing_is_empty() {
    let tree = tree();
    assert!(tree.breadcrumb("/nowhere").is_empty());
    assert!(tree.breadcrumb("").is_empty());
}

#[test]
fn test_breadcrumb_round_trip_for_every_navigable_node() {
    let tree = tree();
    for node in all_nodes(tree.roots()) {
        let Some(path) = node.path.as_deref() else {
            continue;
        };
        let trail = tree.breadcrumb(path);
        assert_eq!(*trail.last().unwrap(), node);

        // 每个元素都是下一个元素的父节点
        for pair in trail.windows(2) {
            assert!(pair[0].children.iter().any(|c| c == pair[1]));
        }
        assert!(tree.roots().iter().any(|root| root == trail[0]));
    }
}

#[test]
fn test_breadcrumb_deep_tree() {
    let roots = vec![MenuNode::new("a", "A").with_children(vec![
        MenuNode::new("b", "B").with_children(vec![
            MenuNode::new("c", "C").with_children(vec![MenuNode::new("d", "D").with_path("/d")]),
        ]),
    ])];
    let tree = MenuTree::new(roots).unwrap();
    assert_eq!(ids(&tree.breadcrumb("/d")), vec!["a", "b", "c", "d"]);
}

// =========================================================
// 其它查询
// =========================================================

#[test]
fn test_open_keys_are_strict_ancestors() {
    let tree = tree();
    assert_eq!(tree.open_keys("/kb/reports"), vec!["kb"]);
    assert!(tree.open_keys("/dashboard").is_empty());
    assert!(tree.open_keys("/nowhere").is_empty());
}

#[test]
fn test_visible_prunes_hidden_nodes() {
    let roots = vec![
        MenuNode::new("shown", "显示").with_children(vec![
            MenuNode::new("child", "子").with_path("/child"),
            MenuNode::new("secret", "隐藏").with_path("/secret").hidden(),
        ]),
        MenuNode::new("gone", "隐藏分组").hidden(),
    ];
    let tree = MenuTree::new(roots).unwrap();
    let visible = tree.visible();

    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].children.len(), 1);
    assert_eq!(visible[0].children[0].id, "child");
    // 隐藏节点仍可查找
    assert_eq!(tree.find_by_path("/secret").unwrap().id, "secret");
}

#[test]
fn test_duplicate_path_is_rejected() {
    let roots = vec![
        MenuNode::new("a", "A").with_path("/same"),
        MenuNode::new("g", "G").with_children(vec![MenuNode::new("b", "B").with_path("/same")]),
    ];
    assert_eq!(
        MenuTree::new(roots),
        Err(MenuError::DuplicatePath {
            path: "/same".to_string(),
            first: "a".to_string(),
            second: "b".to_string(),
        })
    );
}

#[test]
fn test_badge_survives_visible() {
    let roots = vec![MenuNode::new("tasks", "任务").with_path("/t").with_badge(Badge::Count(3))];
    let tree = MenuTree::new(roots).unwrap();
    assert_eq!(tree.visible()[0].badge, Some(Badge::Count(3)));
}

#[test]
fn test_icon_registry_resolves_configured_icons() {
    let tree = tree();
    let icons = IconRegistry::configured();

    for root in tree.roots() {
        assert!(icons.for_node(root).is_some(), "{} 缺少图标资源", root.id);
    }
    assert_eq!(icons.resolve("NoSuchIcon"), None);
    assert_eq!(icons.for_node(&MenuNode::new("x", "X")), None);
}
