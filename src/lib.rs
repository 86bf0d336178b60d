/// Bookmark Folder Manager - Chrome side panel for bookmark folders
/// Built with Rust + WASM + Yew

pub mod bookmarks;
pub mod chrome;
pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod host;
pub mod notifier;
pub mod ui;

#[cfg(test)]
mod testing;

use std::rc::Rc;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Start the Yew app for the side panel
#[wasm_bindgen]
pub fn start_side_panel() {
    yew::Renderer::<ui::sidepanel::SidePanel>::new().render();
}

// Install the change notifier in the background service worker
#[wasm_bindgen]
pub fn start_background() -> Result<(), JsValue> {
    let notifier = notifier::ChangeNotifier::new(chrome::ChromeExtension);
    chrome::install_background_listeners(Rc::new(notifier))
}
