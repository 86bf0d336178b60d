/// Bookmark tree data structures and folder extraction
use serde::Deserialize;

/// A node of the host bookmark tree.
///
/// The folder/bookmark distinction is decided once when the host record is
/// decoded: a record without a url is a folder, even when it carries no
/// `children` (the host omits them from `get` and `getChildren` results).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawBookmarkNode")]
pub struct BookmarkNode {
    pub id: String,
    pub title: String,
    pub parent_id: Option<String>,
    pub index: Option<u32>,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Folder { children: Vec<BookmarkNode> },
    Bookmark { url: String },
}

/// Wire shape of `chrome.bookmarks.BookmarkTreeNode`
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBookmarkNode {
    id: String,
    #[serde(default)]
    title: String,
    url: Option<String>,
    children: Option<Vec<BookmarkNode>>,
    parent_id: Option<String>,
    index: Option<u32>,
}

impl From<RawBookmarkNode> for BookmarkNode {
    fn from(raw: RawBookmarkNode) -> Self {
        let kind = match raw.url.filter(|url| !url.is_empty()) {
            Some(url) => NodeKind::Bookmark { url },
            None => NodeKind::Folder {
                children: raw.children.unwrap_or_default(),
            },
        };

        BookmarkNode {
            id: raw.id,
            title: raw.title,
            parent_id: raw.parent_id,
            index: raw.index,
            kind,
        }
    }
}

impl BookmarkNode {
    pub fn folder(id: &str, title: &str, children: Vec<BookmarkNode>) -> BookmarkNode {
        BookmarkNode {
            id: id.to_string(),
            title: title.to_string(),
            parent_id: None,
            index: None,
            kind: NodeKind::Folder { children },
        }
    }

    pub fn bookmark(id: &str, title: &str, url: &str) -> BookmarkNode {
        BookmarkNode {
            id: id.to_string(),
            title: title.to_string(),
            parent_id: None,
            index: None,
            kind: NodeKind::Bookmark {
                url: url.to_string(),
            },
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder { .. })
    }

    pub fn url(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Bookmark { url } => Some(url),
            NodeKind::Folder { .. } => None,
        }
    }

    /// Direct children in host order; empty for bookmarks
    pub fn children(&self) -> &[BookmarkNode] {
        match &self.kind {
            NodeKind::Folder { children } => children,
            NodeKind::Bookmark { .. } => &[],
        }
    }
}

/// Direct (non-recursive) child counts of a folder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderStats {
    pub subfolders: usize,
    pub bookmarks: usize,
}

impl FolderStats {
    pub fn from_children(children: &[BookmarkNode]) -> FolderStats {
        children.iter().fold(FolderStats::default(), |mut stats, child| {
            if child.is_folder() {
                stats.subfolders += 1;
            } else {
                stats.bookmarks += 1;
            }
            stats
        })
    }

    pub fn is_empty(&self) -> bool {
        self.subfolders == 0 && self.bookmarks == 0
    }

    /// Row summary: "2 folders, 3 bookmarks", or just "0 bookmarks" for an
    /// empty folder.
    pub fn label(&self) -> String {
        if self.is_empty() {
            format!("{} bookmarks", self.bookmarks)
        } else {
            format!("{} folders, {} bookmarks", self.subfolders, self.bookmarks)
        }
    }
}

/// A folder row of the side panel, tagged with its depth in the tree
#[derive(Debug, Clone, PartialEq)]
pub struct FolderView {
    pub id: String,
    pub title: String,
    pub level: usize,
    pub stats: FolderStats,
}

impl FolderView {
    pub fn indent_px(&self, unit: u32) -> u32 {
        self.level as u32 * unit
    }
}

/// Flatten the host tree into its folders, in pre-order.
///
/// Each folder is emitted before any of its descendants, tagged with its
/// depth (top-level roots are level 0). Host child order is kept as is.
/// Unnamed top-level roots are skipped but their children are still walked.
pub fn extract_folders(roots: &[BookmarkNode]) -> Vec<FolderView> {
    let mut folders = Vec::new();
    for root in roots {
        collect_folders(root, 0, &mut folders);
    }
    folders
}

fn collect_folders(node: &BookmarkNode, level: usize, folders: &mut Vec<FolderView>) {
    let NodeKind::Folder { children } = &node.kind else {
        return;
    };

    if level > 0 || !node.title.is_empty() {
        folders.push(FolderView {
            id: node.id.clone(),
            title: node.title.clone(),
            level,
            stats: FolderStats::from_children(children),
        });
    }

    for child in children {
        collect_folders(child, level + 1, folders);
    }
}

/// A bookmark shown as a link in the details view
#[derive(Debug, Clone, PartialEq)]
pub struct BookmarkLink {
    pub title: String,
    pub url: String,
}

/// Summary of a single folder for the details sub-panel
#[derive(Debug, Clone, PartialEq)]
pub struct FolderDetails {
    pub id: String,
    pub title: String,
    pub stats: FolderStats,
    pub preview: Vec<BookmarkLink>,
    pub remaining: usize,
}

impl FolderDetails {
    /// Build the details of `folder` from its direct children, previewing at
    /// most `limit` bookmarks in child order.
    pub fn new(folder: &BookmarkNode, children: &[BookmarkNode], limit: usize) -> FolderDetails {
        let links: Vec<BookmarkLink> = children
            .iter()
            .filter_map(|child| {
                child.url().map(|url| BookmarkLink {
                    title: child.title.clone(),
                    url: url.to_string(),
                })
            })
            .collect();

        let remaining = links.len().saturating_sub(limit);

        FolderDetails {
            id: folder.id.clone(),
            title: folder.title.clone(),
            stats: FolderStats::from_children(children),
            preview: links.into_iter().take(limit).collect(),
            remaining,
        }
    }

    pub fn more_label(&self) -> Option<String> {
        (self.remaining > 0).then(|| format!("... and {} more", self.remaining))
    }

    /// Whether a freshly loaded folder list still shows this folder with the
    /// same title and counts
    pub fn is_current(&self, folders: &[FolderView]) -> bool {
        folders
            .iter()
            .any(|f| f.id == self.id && f.title == self.title && f.stats == self.stats)
    }
}
