/// Side panel UI for the Bookmark Folder Manager extension

use std::future::Future;
use std::rc::Rc;

use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use patternfly_yew::prelude::*;
use log::error;

use crate::bookmarks::FolderDetails;
use crate::chrome::{self, ChromeBookmarks, listen_for_panel_messages};
use crate::config::PanelConfig;
use crate::controller::PanelController;
use crate::error::PanelError;
use crate::filter::FolderFilter;
use crate::host::{PanelSurface, PanelView};
use crate::ui::components::{FolderDetailsCard, FolderRow};

/// Renders into Yew state and uses the browser's blocking dialogs
struct YewSurface {
    view: UseStateSetter<PanelView>,
    details: UseStateSetter<Option<FolderDetails>>,
}

impl PanelSurface for YewSurface {
    fn prompt(&self, message: &str, default: &str) -> Option<String> {
        web_sys::window()?
            .prompt_with_message_and_default(message, default)
            .ok()
            .flatten()
    }

    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|window| window.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    fn render(&self, view: PanelView) {
        self.view.set(view);
    }

    fn show_details(&self, details: FolderDetails) {
        self.details.set(Some(details));
    }

    async fn open_background_tab(&self, url: &str) -> Result<(), PanelError> {
        chrome::open_background_tab(url).await
    }
}

type Panel = PanelController<ChromeBookmarks, YewSurface>;

/// Callback running a folder action in the background
fn folder_action<F, Fut>(controller: &Rc<Panel>, action: F) -> Callback<String>
where
    F: Fn(Rc<Panel>, String) -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
{
    let controller = controller.clone();
    Callback::from(move |folder_id: String| {
        spawn_local(action(controller.clone(), folder_id));
    })
}

#[function_component(SidePanel)]
pub fn side_panel() -> Html {
    let view = use_state(|| PanelView::Loading);
    let details = use_state(|| None::<FolderDetails>);
    let search_query = use_state(String::new);

    let controller = {
        let surface = YewSurface {
            view: view.setter(),
            details: details.setter(),
        };
        use_memo((), move |_| {
            PanelController::new(ChromeBookmarks, surface, PanelConfig::default())
        })
    };

    // Initial load, then reload on every change notification
    {
        let controller = controller.clone();
        use_effect_with((), move |_| {
            let loader = controller.clone();
            spawn_local(async move {
                loader.load_bookmark_folders().await;
            });

            let listener = controller.clone();
            let installed = listen_for_panel_messages(move |message| {
                let controller = listener.clone();
                spawn_local(async move {
                    controller.handle_message(&message).await;
                });
            });
            if let Err(e) = installed {
                error!("Could not listen for bookmark changes: {:?}", e);
            }
            || ()
        });
    }

    // Drop a details card the latest reload no longer agrees with
    {
        let details = details.clone();
        use_effect_with((*view).clone(), move |view| {
            if let Some(shown) = &*details {
                let current = match view {
                    PanelView::Folders(folders) => shown.is_current(folders),
                    _ => false,
                };
                if !current {
                    details.set(None);
                }
            }
            || ()
        });
    }

    let on_search_input = {
        let search_query = search_query.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                search_query.set(input.value());
            }
        })
    };

    let on_add_folder = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| {
            let controller = controller.clone();
            spawn_local(async move {
                controller.add_folder().await;
            });
        })
    };

    let on_close_details = {
        let details = details.clone();
        Callback::from(move |_: ()| details.set(None))
    };

    let on_inspect = folder_action(&controller, |controller, id| async move {
        controller.show_folder_details(&id).await;
    });
    let on_rename = folder_action(&controller, |controller, id| async move {
        controller.rename_folder(&id).await;
    });
    let on_delete = folder_action(&controller, |controller, id| async move {
        controller.delete_folder(&id).await;
    });
    let on_open_all = folder_action(&controller, |controller, id| async move {
        controller.open_all_bookmarks(&id).await;
    });

    let filter = FolderFilter::new(&search_query);
    let indent_unit = controller.config().indent_px;

    html! {
        <div class="side-panel">
            <div class="panel-header">
                <h1 class="panel-title">{"Bookmark Folders"}</h1>
                <Button onclick={on_add_folder} variant={ButtonVariant::Primary}>
                    {"➕ Add Folder"}
                </Button>
            </div>

            <div class="search-container">
                <input
                    id="search-input"
                    type="text"
                    placeholder="Search folders..."
                    value={(*search_query).clone()}
                    oninput={on_search_input}
                    class="search-input"
                />
            </div>

            <div id="bookmark-folders" class="folder-list">
                {match &*view {
                    PanelView::Loading => html! {
                        <div class="loading-text-center">
                            <Spinner />
                        </div>
                    },
                    PanelView::Error(message) => html! {
                        <div class="error">
                            <Alert r#type={AlertType::Danger} title={message.clone()} inline={true}>
                            </Alert>
                        </div>
                    },
                    PanelView::Empty => html! {
                        <div class="no-folders">{"No bookmark folders found"}</div>
                    },
                    PanelView::Folders(folders) => html! {
                        <>
                        {for folders.iter().map(|folder| html! {
                            <FolderRow
                                key={folder.id.clone()}
                                folder={folder.clone()}
                                indent_px={folder.indent_px(indent_unit)}
                                visible={filter.matches(&folder.title)}
                                on_inspect={on_inspect.clone()}
                                on_rename={on_rename.clone()}
                                on_delete={on_delete.clone()}
                                on_open_all={on_open_all.clone()}
                            />
                        })}
                        if filter.is_active() && !folders.iter().any(|f| filter.matches(&f.title)) {
                            <div class="no-folders">{"No folders match your search."}</div>
                        }
                        </>
                    },
                }}
            </div>

            if let Some(folder_details) = (*details).clone() {
                <FolderDetailsCard details={folder_details} on_close={on_close_details} />
            }
        </div>
    }
}
