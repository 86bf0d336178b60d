/// Folder list and details components

use yew::prelude::*;
use crate::bookmarks::{FolderDetails, FolderView};

#[derive(Properties, PartialEq)]
pub struct FolderRowProps {
    pub folder: FolderView,
    pub indent_px: u32,
    #[prop_or(true)]
    pub visible: bool,
    pub on_inspect: Callback<String>,
    pub on_rename: Callback<String>,
    pub on_delete: Callback<String>,
    pub on_open_all: Callback<String>,
}

/// Button callback that handles the click itself so the row underneath
/// does not also open the details view
fn action_click(callback: &Callback<String>, folder_id: &str) -> Callback<MouseEvent> {
    let callback = callback.clone();
    let folder_id = folder_id.to_string();
    Callback::from(move |e: MouseEvent| {
        e.stop_propagation();
        callback.emit(folder_id.clone());
    })
}

#[function_component(FolderRow)]
pub fn folder_row(props: &FolderRowProps) -> Html {
    let folder = &props.folder;

    let on_row_click = props.on_inspect.reform({
        let folder_id = folder.id.clone();
        move |_: MouseEvent| folder_id.clone()
    });

    let style = if props.visible {
        format!("margin-left: {}px", props.indent_px)
    } else {
        format!("margin-left: {}px; display: none", props.indent_px)
    };

    html! {
        <div
            class="folder-item"
            data-folder-id={folder.id.clone()}
            style={style}
            onclick={on_row_click}
        >
            <div class="folder-header">
                <div class="folder-info">
                    <span class="folder-icon">{"📁"}</span>
                    <span class="folder-name" title={folder.title.clone()}>{&folder.title}</span>
                    <span class="folder-stats">{folder.stats.label()}</span>
                </div>
                <div class="folder-actions">
                    <button
                        class="action-btn rename-btn"
                        title="Rename"
                        onclick={action_click(&props.on_rename, &folder.id)}
                    >
                        {"✏️"}
                    </button>
                    <button
                        class="action-btn delete-btn"
                        title="Delete"
                        onclick={action_click(&props.on_delete, &folder.id)}
                    >
                        {"🗑️"}
                    </button>
                    <button
                        class="action-btn open-btn"
                        title="Open all bookmarks"
                        onclick={action_click(&props.on_open_all, &folder.id)}
                    >
                        {"🔗"}
                    </button>
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct FolderDetailsCardProps {
    pub details: FolderDetails,
    pub on_close: Callback<()>,
}

#[function_component(FolderDetailsCard)]
pub fn folder_details_card(props: &FolderDetailsCardProps) -> Html {
    let details = &props.details;

    html! {
        <div id="folder-details" class="folder-details">
            <div class="details-header">
                <h3>{&details.title}</h3>
                <button
                    class="action-btn close-btn"
                    title="Close"
                    onclick={props.on_close.reform(|_: MouseEvent| ())}
                >
                    {"✕"}
                </button>
            </div>
            <p><strong>{"Subfolders:"}</strong>{format!(" {}", details.stats.subfolders)}</p>
            <p><strong>{"Bookmarks:"}</strong>{format!(" {}", details.stats.bookmarks)}</p>

            if !details.preview.is_empty() {
                <h4>{"Recent bookmarks:"}</h4>
                <ul class="details-bookmarks">
                    {for details.preview.iter().map(|link| html! {
                        <li>
                            <a href={link.url.clone()} target="_blank">{&link.title}</a>
                        </li>
                    })}
                    if let Some(more) = details.more_label() {
                        <li class="details-more">{more}</li>
                    }
                </ul>
            }
        </div>
    }
}
