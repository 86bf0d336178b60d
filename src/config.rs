/// Side panel settings
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Left margin per tree level, in pixels
    pub indent_px: u32,
    /// Open-all asks for confirmation above this many bookmarks
    pub open_all_confirm_threshold: usize,
    /// Bookmarks listed in the details view
    pub details_preview_limit: usize,
    /// Where new folders are created; "1" is Chrome's bookmarks bar
    pub bookmarks_bar_id: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        PanelConfig {
            indent_px: 20,
            open_all_confirm_threshold: 10,
            details_preview_limit: 5,
            bookmarks_bar_id: "1".to_string(),
        }
    }
}
