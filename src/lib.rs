/// Dork History Manager - browser extension for saving search dorks
/// Built with Rust + WASM + Yew

mod background;
mod browser;
mod classifier;
mod detector;
pub mod dork;
mod error;
mod messages;
mod operations;
mod storage;
pub mod ui;

use messages::{ErrorResponse, Message};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export the classifier for JavaScript access
#[wasm_bindgen]
pub fn is_dork(query: &str) -> bool {
    classifier::is_dork(query)
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}

// Content script: offer to save the page's query if it is a new dork
#[wasm_bindgen]
pub fn run_detector() {
    spawn_local(async {
        match detector::detect().await {
            Ok(Some(query)) => ui::overlay::mount(query),
            Ok(None) => {}
            Err(e) => log::error!("Dork detection failed: {}", e),
        }
    });
}

// Background: runtime.onInstalled
#[wasm_bindgen]
pub async fn handle_install() -> Result<(), JsValue> {
    background::on_installed()
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
pub fn register_context_menu() {
    background::register_context_menu();
}

#[wasm_bindgen]
pub fn context_menu_id() -> String {
    background::CONTEXT_MENU_ID.to_string()
}

// Background: contextMenus.onClicked for our entry; failures become notices
#[wasm_bindgen]
pub async fn handle_context_menu_click(selection: Option<String>) {
    background::save_selection(selection.as_deref().unwrap_or_default()).await;
}

// Background: runtime.onMessage; resolves to the reply, or undefined for
// fire-and-forget and unknown messages
#[wasm_bindgen]
pub async fn handle_message(message: JsValue) -> Result<JsValue, JsValue> {
    let message: Message = match serde_wasm_bindgen::from_value(message) {
        Ok(message) => message,
        Err(e) => {
            log::warn!("Ignoring unknown message: {}", e);
            return Ok(JsValue::UNDEFINED);
        }
    };

    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    let reply = match background::dispatch(message).await {
        Ok(Some(response)) => response.serialize(&serializer),
        Ok(None) => return Ok(JsValue::UNDEFINED),
        Err(e) => {
            log::warn!("Message handling failed: {}", e);
            ErrorResponse { error: e.to_string() }.serialize(&serializer)
        }
    };

    reply.map_err(|e| JsValue::from_str(&e.to_string()))
}
