/// Typed wrappers over the chrome.* and DOM calls in bridge.js

use crate::dork::{DorkRecord, Settings};
use crate::error::{DorkError, Result};
use crate::messages::Message;
use crate::operations::{Attempt, Capability, first_success};
use crate::storage::{DORKS_KEY, SETTINGS_KEY};
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

// Import JS bridge functions
#[wasm_bindgen(module = "/bridge.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(key: &str, value: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn createTab(url: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn activeTabUrl() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn writeClipboard(text: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    fn legacyCopy(text: &str) -> Result<bool, JsValue>;

    fn createNotification(title: &str, message: &str);

    fn createContextMenu(id: &str, title: &str);

    fn sendRuntimeMessage(message: JsValue);
}

// Storage

async fn load<T: DeserializeOwned>(key: &str) -> Result<Option<T>> {
    let value = getStorage(key).await.map_err(|e| {
        log::error!("Failed to read {}: {:?}", key, e);
        DorkError::StorageUnavailable(format!("{:?}", e))
    })?;

    if value.is_null() || value.is_undefined() {
        Ok(None)
    } else {
        Ok(Some(serde_wasm_bindgen::from_value(value)?))
    }
}

async fn save<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<()> {
    // Plain objects only; chrome.storage cannot hold JS Maps
    let value = value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())?;

    setStorage(key, value).await.map_err(|e| {
        log::error!("Failed to write {}: {:?}", key, e);
        DorkError::StorageUnavailable(format!("{:?}", e))
    })
}

/// Stored collection, or `None` when the key was never written
pub async fn load_dorks_if_present() -> Result<Option<Vec<DorkRecord>>> {
    load(DORKS_KEY).await
}

pub async fn load_dorks() -> Result<Vec<DorkRecord>> {
    Ok(load_dorks_if_present().await?.unwrap_or_default())
}

/// Rewrite the whole collection
pub async fn save_dorks(dorks: &[DorkRecord]) -> Result<()> {
    save(DORKS_KEY, dorks).await
}

pub async fn load_settings_if_present() -> Result<Option<Settings>> {
    load(SETTINGS_KEY).await
}

pub async fn load_settings() -> Result<Settings> {
    Ok(load_settings_if_present().await?.unwrap_or_default())
}

pub async fn save_settings(settings: &Settings) -> Result<()> {
    save(SETTINGS_KEY, settings).await
}

// Tabs and windows

async fn open_tab(url: &str) -> Result<()> {
    createTab(url).await.map_err(|e| {
        log::warn!("chrome.tabs.create failed: {:?}", e);
        DorkError::ResourceUnavailable("chrome.tabs".to_string())
    })
}

async fn open_window(url: &str) -> Result<()> {
    let window = web_sys::window().ok_or_else(|| DorkError::ResourceUnavailable("window".to_string()))?;

    match window.open_with_url_and_target(url, "_blank") {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(DorkError::ResourceUnavailable("window.open".to_string())),
        Err(e) => {
            log::warn!("window.open failed: {:?}", e);
            Err(DorkError::ResourceUnavailable("window.open".to_string()))
        }
    }
}

/// Open a URL in a new tab, falling back to a new window
pub async fn open_url(url: &str) -> Result<Capability> {
    let attempts: Vec<(Capability, Attempt<'_, ()>)> = vec![
        (Capability::NewTab, Box::pin(open_tab(url))),
        (Capability::NewWindow, Box::pin(open_window(url))),
    ];

    first_success(attempts).await.map(|(capability, _)| capability)
}

/// URL of the active tab in the current window
pub async fn active_tab_url() -> Result<String> {
    let url = activeTabUrl().await.map_err(|e| {
        log::warn!("chrome.tabs.query failed: {:?}", e);
        DorkError::ResourceUnavailable("chrome.tabs".to_string())
    })?;

    url.as_string()
        .ok_or_else(|| DorkError::ResourceUnavailable("active tab".to_string()))
}

// Clipboard

async fn clipboard_write(text: &str) -> Result<()> {
    writeClipboard(text).await.map_err(|e| {
        log::warn!("navigator.clipboard failed: {:?}", e);
        DorkError::ResourceUnavailable("navigator.clipboard".to_string())
    })
}

async fn legacy_copy(text: &str) -> Result<()> {
    match legacyCopy(text) {
        Ok(true) => Ok(()),
        Ok(false) => Err(DorkError::ResourceUnavailable("execCommand('copy')".to_string())),
        Err(e) => {
            log::warn!("legacy copy failed: {:?}", e);
            Err(DorkError::ResourceUnavailable("execCommand('copy')".to_string()))
        }
    }
}

/// Copy text, falling back to a hidden textarea selection
pub async fn copy_text(text: &str) -> Result<Capability> {
    let attempts: Vec<(Capability, Attempt<'_, ()>)> = vec![
        (Capability::Clipboard, Box::pin(clipboard_write(text))),
        (Capability::LegacyCopy, Box::pin(legacy_copy(text))),
    ];

    first_success(attempts).await.map(|(capability, _)| capability)
}

// Notifications, menus, messaging

pub fn notify(title: &str, message: &str) {
    createNotification(title, message);
}

pub fn register_context_menu(id: &str, title: &str) {
    createContextMenu(id, title);
}

/// Fire-and-forget message to the background
pub fn send_message(message: &Message) -> Result<()> {
    let value = message.serialize(&serde_wasm_bindgen::Serializer::json_compatible())?;
    sendRuntimeMessage(value);
    Ok(())
}

// Page helpers

/// Ask the user to confirm; a missing window counts as "no"
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Run `f` once after `millis`
pub fn set_timeout(millis: i32, f: impl FnOnce() + 'static) {
    let callback = Closure::once_into_js(f);
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis) {
            log::warn!("setTimeout failed: {:?}", e);
        }
    }
}
