/// Popup UI: add, search, reuse, copy and delete saved dorks

use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use patternfly_yew::prelude::*;
use crate::browser;
use crate::dork::{DorkId, Timestamp};
use crate::operations::{Capability, search_url};
use crate::storage::DorkStore;
use crate::ui::components::{DorkCard, StatusToast, use_toast_slot};

#[derive(Clone, PartialEq)]
enum PopupState {
    Loading,
    Idle,
    Error(String),
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| PopupState::Loading);
    let store = use_state(DorkStore::default);
    let dork_input = use_state(String::new);
    let tag_input = use_state(String::new);
    let toasts = use_toast_slot();

    // Load dorks on mount
    {
        let state = state.clone();
        let store = store.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                match browser::load_dorks().await {
                    Ok(dorks) => {
                        store.set(DorkStore::new(dorks));
                        state.set(PopupState::Idle);
                    }
                    Err(e) => {
                        state.set(PopupState::Error(format!("Failed to load: {}", e)));
                    }
                }
            });
            || ()
        });
    }

    let on_dork_input = {
        let dork_input = dork_input.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                dork_input.set(input.value());
            }
        })
    };

    let on_tag_input = {
        let tag_input = tag_input.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                tag_input.set(input.value());
            }
        })
    };

    // Save the form contents as a new dork
    let on_save = {
        let store = store.clone();
        let state = state.clone();
        let dork_input = dork_input.clone();
        let tag_input = tag_input.clone();
        let toasts = toasts.clone();

        Callback::from(move |_: ()| {
            if dork_input.trim().is_empty() {
                return;
            }

            let mut new_store = (*store).clone();
            match new_store.add(&dork_input, &tag_input, Timestamp::now()) {
                Ok(dork) => {
                    log::info!("Added dork {}", dork.id);
                    store.set(new_store.clone());
                    dork_input.set(String::new());
                    tag_input.set(String::new());

                    let state = state.clone();
                    let toasts = toasts.clone();
                    spawn_local(async move {
                        match browser::save_dorks(new_store.records()).await {
                            Ok(_) => toasts.success("Dork saved successfully!"),
                            Err(e) => {
                                toasts.error("Failed to save dork");
                                state.set(PopupState::Error(format!("Failed to save: {}", e)));
                            }
                        }
                    });
                }
                Err(e) => {
                    log::warn!("Rejected dork: {}", e);
                    toasts.error(e.to_string());
                }
            }
        })
    };

    let on_save_click = on_save.reform(|_: MouseEvent| ());

    let on_dork_keypress = {
        let on_save = on_save.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                on_save.emit(());
            }
        })
    };

    let on_search_input = {
        let store = store.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                let mut new_store = (*store).clone();
                new_store.search(&input.value());
                store.set(new_store);
            }
        })
    };

    let on_clear_search = {
        let store = store.clone();
        Callback::from(move |_: MouseEvent| {
            let mut new_store = (*store).clone();
            new_store.clear_search();
            store.set(new_store);
        })
    };

    // Re-issue a dork: count the use, then open it
    let on_search_dork = {
        let store = store.clone();
        let state = state.clone();
        let toasts = toasts.clone();

        Callback::from(move |id: DorkId| {
            let mut new_store = (*store).clone();
            let dork = match new_store.record_use(id, Timestamp::now()) {
                Some(dork) => dork.clone(),
                None => return,
            };
            store.set(new_store.clone());

            let state = state.clone();
            let toasts = toasts.clone();
            spawn_local(async move {
                if let Err(e) = browser::save_dorks(new_store.records()).await {
                    state.set(PopupState::Error(format!("Failed to save: {}", e)));
                }

                match browser::open_url(&search_url(&dork.text)).await {
                    Ok(Capability::NewTab) => toasts.success("Opened search in new tab!"),
                    Ok(_) => toasts.success("Opened search in new window!"),
                    Err(e) => {
                        log::warn!("Could not open search: {}", e);
                        match browser::copy_text(&dork.text).await {
                            Ok(_) => toasts.error("Copied dork to clipboard (couldn't open tab)"),
                            Err(_) => toasts.error("Failed to open or copy dork"),
                        }
                    }
                }
            });
        })
    };

    let on_copy_dork = {
        let toasts = toasts.clone();

        Callback::from(move |text: String| {
            let toasts = toasts.clone();
            spawn_local(async move {
                match browser::copy_text(&text).await {
                    Ok(_) => toasts.success("Dork copied to clipboard!"),
                    Err(e) => {
                        log::error!("Copy failed: {}", e);
                        toasts.error("Failed to copy dork");
                    }
                }
            });
        })
    };

    let on_delete_dork = {
        let store = store.clone();
        let state = state.clone();
        let toasts = toasts.clone();

        Callback::from(move |id: DorkId| {
            if !browser::confirm("Are you sure you want to delete this dork?") {
                return;
            }

            let mut new_store = (*store).clone();
            if !new_store.remove(id) {
                return;
            }
            store.set(new_store.clone());

            let state = state.clone();
            let toasts = toasts.clone();
            spawn_local(async move {
                match browser::save_dorks(new_store.records()).await {
                    Ok(_) => toasts.success("Dork deleted successfully!"),
                    Err(e) => state.set(PopupState::Error(format!("Failed to save: {}", e))),
                }
            });
        })
    };

    let filtered = store.filtered();
    let term = store.search_term().to_string();

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"Dork History Manager"}</h1>

            if let Some(message) = toasts.current() {
                <StatusToast message={message} />
            }

            // Status display
            {match &*state {
                PopupState::Loading => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{"Loading dorks..."}</p>
                    </div>
                },
                PopupState::Error(err) => html! {
                    <div class="message-top-margin">
                        <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                            {err.clone()}
                        </Alert>
                    </div>
                },
                PopupState::Idle => html! {}
            }}

            // Add form
            <div class="flex-column-gap">
                <input
                    id="dorkInput"
                    type="text"
                    placeholder="Enter a dork, e.g. site:example.com filetype:pdf"
                    value={(*dork_input).clone()}
                    oninput={on_dork_input}
                    onkeypress={on_dork_keypress}
                    class="dork-input"
                />
                <input
                    id="tagInput"
                    type="text"
                    placeholder="Tags (comma separated)"
                    value={(*tag_input).clone()}
                    oninput={on_tag_input}
                    class="tag-input"
                />
                <Button onclick={on_save_click} variant={ButtonVariant::Primary} block={true}>
                    {"Save Dork"}
                </Button>
            </div>

            // Search bar
            <div class="search-container">
                <input
                    id="searchInput"
                    type="text"
                    placeholder="Search dorks or tags..."
                    value={term.clone()}
                    oninput={on_search_input}
                    class="search-input"
                />
                <Button onclick={on_clear_search} variant={ButtonVariant::Secondary}>
                    {"Clear"}
                </Button>
            </div>

            <div id="dorkCount" class="dork-count">{store.count_label()}</div>

            // Dork list
            <div id="dorksList">
                if filtered.is_empty() {
                    <div class="empty-state">
                        if store.records().is_empty() {
                            {"No dorks saved yet. Start by saving your first dork!"}
                        } else {
                            {"No dorks match your search. Try a different search term."}
                        }
                    </div>
                } else {
                    {for filtered.into_iter().map(|dork| html! {
                        <DorkCard
                            key={dork.id.to_string()}
                            dork={dork.clone()}
                            term={term.clone()}
                            on_search={on_search_dork.clone()}
                            on_copy={on_copy_dork.clone()}
                            on_delete={on_delete_dork.clone()}
                        />
                    })}
                }
            </div>

            <p class="footer-popup">
                {"Dork History Manager v0.1.0"}
            </p>
        </div>
    }
}
