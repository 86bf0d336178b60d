/// Folder panel controller: loads, renders and edits bookmark folders
use futures::future::join_all;
use log::{debug, error, info, warn};

use crate::bookmarks::{FolderDetails, extract_folders};
use crate::config::PanelConfig;
use crate::error::PanelError;
use crate::host::{BookmarkStore, PanelSurface, PanelView};
use crate::notifier::PanelMessage;

/// Holds no bookmark state of its own: every action re-reads the host
/// store and every mutation is followed by a full reload.
pub struct PanelController<S, U> {
    store: S,
    surface: U,
    config: PanelConfig,
}

impl<S: BookmarkStore, U: PanelSurface> PanelController<S, U> {
    pub fn new(store: S, surface: U, config: PanelConfig) -> Self {
        PanelController {
            store,
            surface,
            config,
        }
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn surface(&self) -> &U {
        &self.surface
    }

    /// Fetch the tree and render every named folder
    pub async fn load_bookmark_folders(&self) {
        match self.store.get_tree().await {
            Ok(tree) => {
                let folders = extract_folders(&tree);
                debug!("Rendering {} bookmark folders", folders.len());

                if folders.is_empty() {
                    self.surface.render(PanelView::Empty);
                } else {
                    self.surface.render(PanelView::Folders(folders));
                }
            }
            Err(e) => {
                error!("Error loading bookmark folders: {}", e);
                self.surface
                    .render(PanelView::Error("Error loading bookmarks".to_string()));
            }
        }
    }

    /// React to a message from the background worker
    pub async fn handle_message(&self, message: &PanelMessage) {
        match message {
            PanelMessage::BookmarksChanged => {
                debug!("Bookmarks changed, reloading folders");
                self.load_bookmark_folders().await;
            }
            PanelMessage::Other => {}
        }
    }

    pub async fn rename_folder(&self, folder_id: &str) {
        if let Err(e) = self.try_rename_folder(folder_id).await {
            error!("Error renaming folder {}: {}", folder_id, e);
            self.surface.alert("Error renaming folder");
        }
    }

    async fn try_rename_folder(&self, folder_id: &str) -> Result<(), PanelError> {
        let folder = self.store.get(folder_id).await?;

        let Some(input) = self.surface.prompt("Enter new folder name:", &folder.title) else {
            return Ok(());
        };

        let title = input.trim();
        if title.is_empty() || title == folder.title.trim() {
            debug!("Rename of {} skipped", folder_id);
            return Ok(());
        }

        self.store.update_title(folder_id, title).await?;
        info!("Renamed folder {} to {:?}", folder_id, title);
        self.load_bookmark_folders().await;
        Ok(())
    }

    pub async fn delete_folder(&self, folder_id: &str) {
        if let Err(e) = self.try_delete_folder(folder_id).await {
            error!("Error deleting folder {}: {}", folder_id, e);
            self.surface.alert("Error deleting folder");
        }
    }

    async fn try_delete_folder(&self, folder_id: &str) -> Result<(), PanelError> {
        let folder = self.store.get(folder_id).await?;

        let message = format!(
            "Are you sure you want to delete \"{}\" and all its contents?",
            folder.title
        );
        if !self.surface.confirm(&message) {
            return Ok(());
        }

        self.store.remove_tree(folder_id).await?;
        info!("Deleted folder {} ({:?})", folder_id, folder.title);
        self.load_bookmark_folders().await;
        Ok(())
    }

    /// Open the folder's direct bookmarks in background tabs, returning how
    /// many tabs were opened.
    pub async fn open_all_bookmarks(&self, folder_id: &str) -> usize {
        match self.try_open_all_bookmarks(folder_id).await {
            Ok(opened) => opened,
            Err(e) => {
                error!("Error opening bookmarks of {}: {}", folder_id, e);
                self.surface.alert("Error opening bookmarks");
                0
            }
        }
    }

    async fn try_open_all_bookmarks(&self, folder_id: &str) -> Result<usize, PanelError> {
        let children = self.store.get_children(folder_id).await?;
        let urls: Vec<&str> = children.iter().filter_map(|child| child.url()).collect();

        if urls.is_empty() {
            self.surface.alert("No bookmarks found in this folder");
            return Ok(0);
        }

        if urls.len() > self.config.open_all_confirm_threshold {
            let message = format!("This will open {} bookmarks. Continue?", urls.len());
            if !self.surface.confirm(&message) {
                return Ok(0);
            }
        }

        // Every tab is requested up front, in child order
        let opens = urls.iter().map(|url| self.surface.open_background_tab(url));
        let results = join_all(opens).await;

        let mut opened = 0;
        for (url, result) in urls.iter().zip(results) {
            match result {
                Ok(()) => opened += 1,
                Err(e) => warn!("Could not open {}: {}", url, e),
            }
        }
        Ok(opened)
    }

    pub async fn show_folder_details(&self, folder_id: &str) {
        if let Err(e) = self.try_show_folder_details(folder_id).await {
            error!("Error showing folder details for {}: {}", folder_id, e);
            self.surface.alert("Error loading folder details");
        }
    }

    async fn try_show_folder_details(&self, folder_id: &str) -> Result<(), PanelError> {
        let children = self.store.get_children(folder_id).await?;
        let folder = self.store.get(folder_id).await?;

        let details = FolderDetails::new(&folder, &children, self.config.details_preview_limit);
        self.surface.show_details(details);
        Ok(())
    }

    /// Ask for a name and create a folder under the bookmarks bar
    pub async fn add_folder(&self) {
        let Some(input) = self.surface.prompt("Enter folder name:", "") else {
            return;
        };

        let name = input.trim();
        if name.is_empty() {
            return;
        }

        if let Err(e) = self.try_add_folder(name).await {
            error!("Error creating folder {:?}: {}", name, e);
            self.surface.alert("Error creating folder");
        }
    }

    async fn try_add_folder(&self, name: &str) -> Result<(), PanelError> {
        let bookmarks_bar = self.store.get(&self.config.bookmarks_bar_id).await?;
        let folder = self.store.create_folder(&bookmarks_bar.id, name).await?;
        info!("Created folder {} ({:?})", folder.id, folder.title);
        self.load_bookmark_folders().await;
        Ok(())
    }
}
