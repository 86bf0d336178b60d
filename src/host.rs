/// Host capabilities consumed by the side panel
///
/// The controller only talks to the browser through these traits, so the
/// chrome bindings can be swapped for in-memory fakes in tests.
use crate::bookmarks::{BookmarkNode, FolderDetails, FolderView};
use crate::error::PanelError;

/// The host bookmark database (`chrome.bookmarks`)
#[allow(async_fn_in_trait)]
pub trait BookmarkStore {
    async fn get_tree(&self) -> Result<Vec<BookmarkNode>, PanelError>;

    async fn get(&self, id: &str) -> Result<BookmarkNode, PanelError>;

    async fn get_children(&self, id: &str) -> Result<Vec<BookmarkNode>, PanelError>;

    async fn update_title(&self, id: &str, title: &str) -> Result<(), PanelError>;

    /// Remove a folder together with everything below it
    async fn remove_tree(&self, id: &str) -> Result<(), PanelError>;

    async fn create_folder(&self, parent_id: &str, title: &str) -> Result<BookmarkNode, PanelError>;
}

/// What the folder list container currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum PanelView {
    Loading,
    Error(String),
    Empty,
    Folders(Vec<FolderView>),
}

/// The panel UI plus the host UI calls it needs
#[allow(async_fn_in_trait)]
pub trait PanelSurface {
    /// Blocking text prompt; `None` when the user cancels
    fn prompt(&self, message: &str, default: &str) -> Option<String>;

    fn confirm(&self, message: &str) -> bool;

    fn alert(&self, message: &str);

    fn render(&self, view: PanelView);

    fn show_details(&self, details: FolderDetails);

    /// Open `url` in a new tab without focusing it
    async fn open_background_tab(&self, url: &str) -> Result<(), PanelError>;
}
