/// 图标名 -> 前端资源名
pub const ICONS: &[(&str, &str)] = &[
    ("DataLine", "icons/data-line.svg"),
    ("FolderOpened", "icons/folder-opened.svg"),
    ("Folder", "icons/folder.svg"),
    ("Document", "icons/document.svg"),
    ("EditPen", "icons/edit-pen.svg"),
    ("Search", "icons/search.svg"),
    ("List", "icons/list.svg"),
    ("Lightning", "icons/lightning.svg"),
];
