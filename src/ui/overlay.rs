/// "Save this dork" button injected into search result pages

use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use crate::browser;
use crate::detector::{save_detected, save_error_label};

const OFFER_MILLIS: i32 = 10_000;
const CONFIRM_MILLIS: i32 = 2_000;
const HOST_ID: &str = "dork-save-button";

#[derive(Clone, Copy, PartialEq)]
enum OverlayState {
    Offered,
    Saving,
    Saved,
    Failed(&'static str),
    Dismissed,
}

#[derive(Properties, PartialEq)]
pub struct SaveOverlayProps {
    pub query: String,
}

#[function_component(SaveOverlay)]
pub fn save_overlay(props: &SaveOverlayProps) -> Html {
    let state = use_state(|| OverlayState::Offered);

    // Auto-hide if the user ignores the offer
    {
        let state = state.clone();
        use_effect_with((), move |_| {
            browser::set_timeout(OFFER_MILLIS, move || state.set(OverlayState::Dismissed));
            || ()
        });
    }

    let on_click = {
        let state = state.clone();
        let query = props.query.clone();

        Callback::from(move |_: MouseEvent| {
            if *state != OverlayState::Offered {
                return;
            }
            state.set(OverlayState::Saving);

            let state = state.clone();
            let query = query.clone();
            spawn_local(async move {
                match save_detected(query).await {
                    Ok(_) => state.set(OverlayState::Saved),
                    Err(e) => {
                        log::error!("Failed to save detected dork: {}", e);
                        state.set(OverlayState::Failed(save_error_label(&e)));
                    }
                }
                browser::set_timeout(CONFIRM_MILLIS, move || state.set(OverlayState::Dismissed));
            });
        })
    };

    let (label, background) = match *state {
        OverlayState::Dismissed => return html! {},
        OverlayState::Offered => ("💾 Save this dork", "linear-gradient(135deg, #667eea 0%, #764ba2 100%)"),
        OverlayState::Saving => ("Saving...", "linear-gradient(135deg, #667eea 0%, #764ba2 100%)"),
        OverlayState::Saved => ("✅ Saved!", "#4CAF50"),
        OverlayState::Failed(reason) => (reason, "#f44336"),
    };

    html! {
        <div
            onclick={on_click}
            style={format!("position: fixed; top: 20px; right: 20px; background: {}; color: white; padding: 12px 20px; border-radius: 25px; box-shadow: 0 4px 15px rgba(0,0,0,0.2); cursor: pointer; font-family: 'Segoe UI', sans-serif; font-size: 14px; font-weight: 600; z-index: 10000; border: 1px solid rgba(255,255,255,0.2);", background)}
        >
            {label}
        </div>
    }
}

/// Attach the overlay to the current page
pub fn mount(query: String) {
    let document = match web_sys::window().and_then(|w| w.document()) {
        Some(document) => document,
        None => return,
    };

    let (host, body) = match (document.create_element("div"), document.body()) {
        (Ok(host), Some(body)) => (host, body),
        _ => {
            log::warn!("No document body to attach the save button to");
            return;
        }
    };

    host.set_id(HOST_ID);
    if let Err(e) = body.append_child(&host) {
        log::warn!("Failed to attach save button: {:?}", e);
        return;
    }

    yew::Renderer::<SaveOverlay>::with_root_and_props(host, SaveOverlayProps { query }).render();
}
