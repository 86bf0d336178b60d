/// In-memory host fakes for controller and notifier tests
use std::cell::{Cell, RefCell};
use std::collections::{HashSet, VecDeque};

use crate::bookmarks::{BookmarkNode, FolderDetails, NodeKind};
use crate::error::PanelError;
use crate::host::{BookmarkStore, PanelSurface, PanelView};

/// A Chrome-shaped tree:
///
/// ```text
/// "" (0)
/// ├── Bookmarks bar (1)
/// │   ├── Work (3)
/// │   ├── Rust (5) https://www.rust-lang.org/
/// │   └── Personal (4)
/// │       └── Cooking (9) https://cooking.example/
/// └── Other bookmarks (2)
/// ```
pub fn chrome_tree() -> Vec<BookmarkNode> {
    let json = r#"[{
        "id": "0", "title": "",
        "children": [
            {"id": "1", "parentId": "0", "index": 0, "title": "Bookmarks bar", "children": [
                {"id": "3", "parentId": "1", "index": 0, "title": "Work", "children": []},
                {"id": "5", "parentId": "1", "index": 1, "title": "Rust", "url": "https://www.rust-lang.org/"},
                {"id": "4", "parentId": "1", "index": 2, "title": "Personal", "children": [
                    {"id": "9", "parentId": "4", "index": 0, "title": "Cooking", "url": "https://cooking.example/"}
                ]}
            ]},
            {"id": "2", "parentId": "0", "index": 1, "title": "Other bookmarks", "children": []}
        ]
    }]"#;
    serde_json::from_str(json).unwrap()
}

/// Bookmark store backed by an owned tree. Records every mutation the
/// controller issues so tests can assert on host writes.
pub struct MemoryStore {
    roots: RefCell<Vec<BookmarkNode>>,
    next_id: Cell<u32>,
    mutations: RefCell<Vec<String>>,
    failing: Cell<bool>,
}

impl MemoryStore {
    pub fn new(roots: Vec<BookmarkNode>) -> MemoryStore {
        let max_id = all_ids(&roots)
            .iter()
            .filter_map(|id| id.parse::<u32>().ok())
            .max()
            .unwrap_or(0);

        MemoryStore {
            roots: RefCell::new(roots),
            next_id: Cell::new(max_id + 1),
            mutations: RefCell::new(Vec::new()),
            failing: Cell::new(false),
        }
    }

    /// Make every store call reject
    pub fn fail_calls(&self, failing: bool) {
        self.failing.set(failing);
    }

    /// Insert a folder behind the controller's back
    pub fn add_folder(&self, parent_id: &str, title: &str) -> String {
        let node = BookmarkNode::folder(&self.allocate_id(), title, vec![]);
        self.insert(parent_id, node).unwrap()
    }

    pub fn add_bookmark(&self, parent_id: &str, title: &str, url: &str) -> String {
        let node = BookmarkNode::bookmark(&self.allocate_id(), title, url);
        self.insert(parent_id, node).unwrap()
    }

    pub fn mutations(&self) -> Vec<String> {
        self.mutations.borrow().clone()
    }

    pub fn contains(&self, id: &str) -> bool {
        find(&self.roots.borrow(), id).is_some()
    }

    fn allocate_id(&self) -> String {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id.to_string()
    }

    fn insert(&self, parent_id: &str, mut node: BookmarkNode) -> Result<String, PanelError> {
        let mut roots = self.roots.borrow_mut();
        let parent = find_mut(&mut roots, parent_id)
            .ok_or_else(|| PanelError::NotFound(parent_id.to_string()))?;
        let NodeKind::Folder { children } = &mut parent.kind else {
            return Err(PanelError::host("bookmarks.create", "Parent is not a folder"));
        };

        node.parent_id = Some(parent_id.to_string());
        node.index = Some(children.len() as u32);
        let id = node.id.clone();
        children.push(node);
        Ok(id)
    }

    fn check(&self, operation: &'static str) -> Result<(), PanelError> {
        if self.failing.get() {
            Err(PanelError::host(operation, "Simulated host failure"))
        } else {
            Ok(())
        }
    }

    fn record(&self, mutation: String) {
        self.mutations.borrow_mut().push(mutation);
    }
}

impl BookmarkStore for MemoryStore {
    async fn get_tree(&self) -> Result<Vec<BookmarkNode>, PanelError> {
        self.check("bookmarks.getTree")?;
        Ok(self.roots.borrow().clone())
    }

    async fn get(&self, id: &str) -> Result<BookmarkNode, PanelError> {
        self.check("bookmarks.get")?;
        find(&self.roots.borrow(), id)
            .map(without_children)
            .ok_or_else(|| PanelError::NotFound(id.to_string()))
    }

    async fn get_children(&self, id: &str) -> Result<Vec<BookmarkNode>, PanelError> {
        self.check("bookmarks.getChildren")?;
        let roots = self.roots.borrow();
        let node = find(&roots, id).ok_or_else(|| PanelError::NotFound(id.to_string()))?;
        Ok(node.children().iter().map(without_children).collect())
    }

    async fn update_title(&self, id: &str, title: &str) -> Result<(), PanelError> {
        self.check("bookmarks.update")?;
        {
            let mut roots = self.roots.borrow_mut();
            let node = find_mut(&mut roots, id)
                .ok_or_else(|| PanelError::NotFound(id.to_string()))?;
            node.title = title.to_string();
        }
        self.record(format!("update {} {}", id, title));
        Ok(())
    }

    async fn remove_tree(&self, id: &str) -> Result<(), PanelError> {
        self.check("bookmarks.removeTree")?;
        {
            let mut roots = self.roots.borrow_mut();
            if roots.iter().any(|root| root.id == id) {
                return Err(PanelError::host(
                    "bookmarks.removeTree",
                    "Can't modify the root bookmark folders.",
                ));
            }
            if !remove_node(&mut roots, id) {
                return Err(PanelError::NotFound(id.to_string()));
            }
        }
        self.record(format!("removeTree {}", id));
        Ok(())
    }

    async fn create_folder(
        &self,
        parent_id: &str,
        title: &str,
    ) -> Result<BookmarkNode, PanelError> {
        self.check("bookmarks.create")?;
        let node = BookmarkNode::folder(&self.allocate_id(), title, vec![]);
        let id = self.insert(parent_id, node)?;
        self.record(format!("create {} {}", parent_id, title));

        let roots = self.roots.borrow();
        find(&roots, &id)
            .map(without_children)
            .ok_or(PanelError::NotFound(id))
    }
}

fn without_children(node: &BookmarkNode) -> BookmarkNode {
    let mut node = node.clone();
    if let NodeKind::Folder { children } = &mut node.kind {
        children.clear();
    }
    node
}

fn all_ids(nodes: &[BookmarkNode]) -> Vec<String> {
    nodes
        .iter()
        .flat_map(|node| {
            let mut ids = vec![node.id.clone()];
            ids.extend(all_ids(node.children()));
            ids
        })
        .collect()
}

fn find<'a>(nodes: &'a [BookmarkNode], id: &str) -> Option<&'a BookmarkNode> {
    nodes.iter().find_map(|node| {
        if node.id == id {
            Some(node)
        } else {
            find(node.children(), id)
        }
    })
}

fn find_mut<'a>(nodes: &'a mut [BookmarkNode], id: &str) -> Option<&'a mut BookmarkNode> {
    for node in nodes.iter_mut() {
        if node.id == id {
            return Some(node);
        }
        if let NodeKind::Folder { children } = &mut node.kind {
            if let Some(found) = find_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn remove_node(nodes: &mut Vec<BookmarkNode>, id: &str) -> bool {
    if let Some(position) = nodes.iter().position(|node| node.id == id) {
        nodes.remove(position);
        return true;
    }

    nodes.iter_mut().any(|node| match &mut node.kind {
        NodeKind::Folder { children } => remove_node(children, id),
        NodeKind::Bookmark { .. } => false,
    })
}

/// Panel surface that answers dialogs from queues and records everything
/// it is asked to show.
#[derive(Default)]
pub struct RecordingSurface {
    prompt_answers: RefCell<VecDeque<Option<String>>>,
    confirm_answers: RefCell<VecDeque<bool>>,
    prompts: RefCell<Vec<(String, String)>>,
    confirms: RefCell<Vec<String>>,
    alerts: RefCell<Vec<String>>,
    views: RefCell<Vec<PanelView>>,
    details: RefCell<Option<FolderDetails>>,
    opened_tabs: RefCell<Vec<String>>,
    failing_urls: RefCell<HashSet<String>>,
    stalled_urls: RefCell<HashSet<String>>,
}

impl RecordingSurface {
    pub fn new() -> RecordingSurface {
        RecordingSurface::default()
    }

    pub fn push_prompt(&self, answer: Option<&str>) {
        self.prompt_answers
            .borrow_mut()
            .push_back(answer.map(str::to_string));
    }

    pub fn push_confirm(&self, answer: bool) {
        self.confirm_answers.borrow_mut().push_back(answer);
    }

    pub fn fail_url(&self, url: &str) {
        self.failing_urls.borrow_mut().insert(url.to_string());
    }

    /// Opening `url` never completes
    pub fn stall_url(&self, url: &str) {
        self.stalled_urls.borrow_mut().insert(url.to_string());
    }

    pub fn prompts(&self) -> Vec<(String, String)> {
        self.prompts.borrow().clone()
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.borrow().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }

    pub fn views(&self) -> Vec<PanelView> {
        self.views.borrow().clone()
    }

    pub fn last_view(&self) -> Option<PanelView> {
        self.views.borrow().last().cloned()
    }

    pub fn details(&self) -> Option<FolderDetails> {
        self.details.borrow().clone()
    }

    pub fn opened_tabs(&self) -> Vec<String> {
        self.opened_tabs.borrow().clone()
    }
}

impl PanelSurface for RecordingSurface {
    fn prompt(&self, message: &str, default: &str) -> Option<String> {
        self.prompts
            .borrow_mut()
            .push((message.to_string(), default.to_string()));
        self.prompt_answers.borrow_mut().pop_front().flatten()
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirms.borrow_mut().push(message.to_string());
        self.confirm_answers.borrow_mut().pop_front().unwrap_or(false)
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn render(&self, view: PanelView) {
        self.views.borrow_mut().push(view);
    }

    fn show_details(&self, details: FolderDetails) {
        *self.details.borrow_mut() = Some(details);
    }

    async fn open_background_tab(&self, url: &str) -> Result<(), PanelError> {
        if self.stalled_urls.borrow().contains(url) {
            return futures::future::pending().await;
        }
        if self.failing_urls.borrow().contains(url) {
            return Err(PanelError::host("tabs.create", "No current window"));
        }
        self.opened_tabs.borrow_mut().push(url.to_string());
        Ok(())
    }
}
