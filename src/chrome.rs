/// Bindings to the `chrome.*` extension APIs
use std::rc::Rc;

use js_sys::{Function, Reflect};
use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::bookmarks::BookmarkNode;
use crate::error::PanelError;
use crate::host::BookmarkStore;
use crate::notifier::{BookmarkEvent, ChangeNotifier, ExtensionHost, PanelMessage};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["chrome", "bookmarks"], js_name = getTree)]
    async fn bookmarks_get_tree() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "bookmarks"], js_name = get)]
    async fn bookmarks_get(id: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "bookmarks"], js_name = getChildren)]
    async fn bookmarks_get_children(id: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "bookmarks"], js_name = update)]
    async fn bookmarks_update(id: &str, changes: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "bookmarks"], js_name = removeTree)]
    async fn bookmarks_remove_tree(id: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "bookmarks"], js_name = create)]
    async fn bookmarks_create(details: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = create)]
    async fn tabs_create(properties: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "sidePanel"], js_name = open)]
    async fn side_panel_open(options: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "runtime"], js_name = sendMessage)]
    async fn runtime_send_message(message: JsValue) -> Result<JsValue, JsValue>;
}

#[derive(Serialize)]
struct TitleChange<'a> {
    title: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateDetails<'a> {
    parent_id: &'a str,
    title: &'a str,
}

#[derive(Serialize)]
struct CreateTabProperties<'a> {
    url: &'a str,
    active: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SidePanelOptions {
    tab_id: i32,
}

#[derive(serde::Deserialize)]
struct TabRef {
    id: Option<i32>,
}

/// Human-readable text of a rejected promise
fn describe(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            Reflect::get(err, &JsValue::from_str("message"))
                .ok()
                .and_then(|message| message.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", err))
}

fn rejected(operation: &'static str) -> impl FnOnce(JsValue) -> PanelError {
    move |err| PanelError::host(operation, describe(&err))
}

fn decode<T: DeserializeOwned>(what: &'static str, value: JsValue) -> Result<T, PanelError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| PanelError::Decode {
        what,
        message: e.to_string(),
    })
}

fn encode<T: Serialize>(what: &'static str, value: &T) -> Result<JsValue, PanelError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| PanelError::Decode {
        what,
        message: e.to_string(),
    })
}

/// `chrome.bookmarks.get` answers with an array
fn first_node(id: &str, value: JsValue) -> Result<BookmarkNode, PanelError> {
    let nodes: Vec<BookmarkNode> = decode("bookmark", value)?;
    nodes
        .into_iter()
        .next()
        .ok_or_else(|| PanelError::NotFound(id.to_string()))
}

/// The browser bookmark database
pub struct ChromeBookmarks;

impl BookmarkStore for ChromeBookmarks {
    async fn get_tree(&self) -> Result<Vec<BookmarkNode>, PanelError> {
        let tree = bookmarks_get_tree()
            .await
            .map_err(rejected("bookmarks.getTree"))?;
        decode("bookmark tree", tree)
    }

    async fn get(&self, id: &str) -> Result<BookmarkNode, PanelError> {
        let nodes = bookmarks_get(id).await.map_err(rejected("bookmarks.get"))?;
        first_node(id, nodes)
    }

    async fn get_children(&self, id: &str) -> Result<Vec<BookmarkNode>, PanelError> {
        let children = bookmarks_get_children(id)
            .await
            .map_err(rejected("bookmarks.getChildren"))?;
        decode("bookmark children", children)
    }

    async fn update_title(&self, id: &str, title: &str) -> Result<(), PanelError> {
        let changes = encode("title change", &TitleChange { title })?;
        bookmarks_update(id, changes)
            .await
            .map_err(rejected("bookmarks.update"))?;
        Ok(())
    }

    async fn remove_tree(&self, id: &str) -> Result<(), PanelError> {
        bookmarks_remove_tree(id)
            .await
            .map_err(rejected("bookmarks.removeTree"))?;
        Ok(())
    }

    async fn create_folder(
        &self,
        parent_id: &str,
        title: &str,
    ) -> Result<BookmarkNode, PanelError> {
        let details = encode("folder details", &CreateDetails { parent_id, title })?;
        let created = bookmarks_create(details)
            .await
            .map_err(rejected("bookmarks.create"))?;
        decode("created folder", created)
    }
}

/// Open `url` in a new tab without switching to it
pub async fn open_background_tab(url: &str) -> Result<(), PanelError> {
    let properties = encode("tab properties", &CreateTabProperties { url, active: false })?;
    tabs_create(properties).await.map_err(rejected("tabs.create"))?;
    Ok(())
}

/// Runtime messaging and side panel control for the background worker
pub struct ChromeExtension;

impl ExtensionHost for ChromeExtension {
    async fn broadcast(&self, message: &PanelMessage) -> Result<(), PanelError> {
        let message = encode("panel message", message)?;
        runtime_send_message(message)
            .await
            .map_err(rejected("runtime.sendMessage"))?;
        Ok(())
    }

    async fn open_side_panel(&self, tab_id: i32) -> Result<(), PanelError> {
        let options = encode("side panel options", &SidePanelOptions { tab_id })?;
        side_panel_open(options)
            .await
            .map_err(rejected("sidePanel.open"))?;
        Ok(())
    }
}

/// Call `addListener` on the event object at `path`, e.g.
/// `["chrome", "bookmarks", "onMoved"]`.
fn add_listener(path: &[&str], callback: &Function) -> Result<(), JsValue> {
    let mut event: JsValue = js_sys::global().into();
    for key in path {
        event = Reflect::get(&event, &JsValue::from_str(key))?;
    }

    let add: Function = Reflect::get(&event, &JsValue::from_str("addListener"))?.dyn_into()?;
    add.call1(&event, callback)?;
    Ok(())
}

/// Register `callback` for an event for the lifetime of the page
fn listen<F>(path: &[&str], callback: Closure<F>) -> Result<(), JsValue>
where
    F: ?Sized + wasm_bindgen::closure::WasmClosure,
{
    add_listener(path, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

/// Wire the change notifier to the runtime, action and bookmark events
pub fn install_background_listeners(
    notifier: Rc<ChangeNotifier<ChromeExtension>>,
) -> Result<(), JsValue> {
    let on_installed = {
        let notifier = notifier.clone();
        Closure::<dyn Fn()>::new(move || notifier.on_installed())
    };
    listen(&["chrome", "runtime", "onInstalled"], on_installed)?;

    let on_connect = {
        let notifier = notifier.clone();
        Closure::<dyn Fn(JsValue)>::new(move |port: JsValue| {
            let name = Reflect::get(&port, &JsValue::from_str("name"))
                .ok()
                .and_then(|name| name.as_string())
                .unwrap_or_default();
            notifier.on_connect(&name);
        })
    };
    listen(&["chrome", "runtime", "onConnect"], on_connect)?;

    let on_clicked = {
        let notifier = notifier.clone();
        Closure::<dyn Fn(JsValue)>::new(move |tab: JsValue| {
            let tab_id = serde_wasm_bindgen::from_value::<TabRef>(tab)
                .ok()
                .and_then(|tab| tab.id);
            let notifier = notifier.clone();
            spawn_local(async move {
                notifier.on_action_clicked(tab_id).await;
            });
        })
    };
    listen(&["chrome", "action", "onClicked"], on_clicked)?;

    for event in BookmarkEvent::ALL {
        let on_event = {
            let notifier = notifier.clone();
            Closure::<dyn Fn()>::new(move || {
                let notifier = notifier.clone();
                spawn_local(async move {
                    notifier.on_bookmark_event(event).await;
                });
            })
        };
        listen(&["chrome", "bookmarks", event.event_name()], on_event)?;
    }

    Ok(())
}

/// Deliver every runtime message this panel understands to `handler`
pub fn listen_for_panel_messages(handler: impl Fn(PanelMessage) + 'static) -> Result<(), JsValue> {
    let on_message = Closure::<dyn Fn(JsValue)>::new(move |message: JsValue| {
        match serde_wasm_bindgen::from_value::<PanelMessage>(message) {
            Ok(message) => handler(message),
            Err(e) => debug!("Ignoring runtime message: {}", e),
        }
    });
    listen(&["chrome", "runtime", "onMessage"], on_message)
}
