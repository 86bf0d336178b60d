/// Background change notifier
///
/// Relays host bookmark events to any open side panel and opens the panel
/// when the toolbar icon is clicked. Holds no state between events.
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::PanelError;

/// Message sent from the background worker to side panels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum PanelMessage {
    #[serde(rename = "bookmarksChanged")]
    BookmarksChanged,
    /// Any action this panel does not understand
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookmarkEvent {
    Created,
    Removed,
    Changed,
    Moved,
}

impl BookmarkEvent {
    pub const ALL: [BookmarkEvent; 4] = [
        BookmarkEvent::Created,
        BookmarkEvent::Removed,
        BookmarkEvent::Changed,
        BookmarkEvent::Moved,
    ];

    /// Name of the `chrome.bookmarks` event
    pub fn event_name(&self) -> &'static str {
        match self {
            BookmarkEvent::Created => "onCreated",
            BookmarkEvent::Removed => "onRemoved",
            BookmarkEvent::Changed => "onChanged",
            BookmarkEvent::Moved => "onMoved",
        }
    }
}

/// Port name the side panel connects with
pub const SIDE_PANEL_PORT: &str = "sidepanel";

/// Extension-level host calls used by the notifier
#[allow(async_fn_in_trait)]
pub trait ExtensionHost {
    /// Send `message` to every extension page; rejects when nobody listens
    async fn broadcast(&self, message: &PanelMessage) -> Result<(), PanelError>;

    async fn open_side_panel(&self, tab_id: i32) -> Result<(), PanelError>;
}

pub struct ChangeNotifier<H> {
    host: H,
}

impl<H: ExtensionHost> ChangeNotifier<H> {
    pub fn new(host: H) -> Self {
        ChangeNotifier { host }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn on_installed(&self) {
        info!("Bookmark Folder Manager extension installed");
    }

    pub fn on_connect(&self, port_name: &str) {
        if port_name == SIDE_PANEL_PORT {
            info!("Side panel connected");
        }
    }

    /// Open the side panel for the clicked tab. Tabs without an id (devtools,
    /// some special pages) are ignored.
    pub async fn on_action_clicked(&self, tab_id: Option<i32>) {
        let Some(tab_id) = tab_id else {
            debug!("Action clicked without a tab id");
            return;
        };

        if let Err(e) = self.host.open_side_panel(tab_id).await {
            warn!("Could not open side panel for tab {}: {}", tab_id, e);
        }
    }

    pub async fn on_bookmark_event(&self, event: BookmarkEvent) {
        debug!("Bookmark event {}", event.event_name());
        if let Err(e) = self.host.broadcast(&PanelMessage::BookmarksChanged).await {
            // No side panel open
            debug!("bookmarksChanged not delivered: {}", e);
        }
    }
}
