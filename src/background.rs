/// Background service worker: install seeding, context menu, message dispatch

use crate::browser;
use crate::dork::{DorkRecord, NewDork, Settings, Timestamp};
use crate::error::{DorkError, Result};
use crate::messages::{Message, TabUrlResponse};
use crate::operations::preview;
use crate::storage::{InstallSeed, insert_unique};

pub const CONTEXT_MENU_ID: &str = "saveDork";
const CONTEXT_MENU_TITLE: &str = "Save as Dork";

/// A system notification to show
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: &'static str,
    pub message: String,
}

impl Notice {
    pub fn welcome() -> Notice {
        Notice {
            title: "Dork History Manager Installed!",
            message: "Start saving your Google dorks for easy reuse. Click the extension icon to get started."
                .to_string(),
        }
    }

    pub fn auto_saved(text: &str) -> Notice {
        Notice {
            title: "Dork Saved!",
            message: format!("Automatically saved: {}", preview(text)),
        }
    }

    pub fn saved(text: &str) -> Notice {
        Notice {
            title: "Dork Saved!",
            message: format!("Saved: {}", preview(text)),
        }
    }

    pub fn save_failed(error: &DorkError) -> Notice {
        Notice {
            title: "Could Not Save Dork",
            message: error.to_string(),
        }
    }

    pub fn duplicate() -> Notice {
        Notice {
            title: "Dork Already Exists",
            message: "This dork is already in your collection.".to_string(),
        }
    }
}

fn show(notice: &Notice, settings: &Settings) {
    if settings.show_notifications {
        browser::notify(notice.title, &notice.message);
    }
}

/// Settings for gating notifications; unreadable settings fall back to defaults
async fn current_settings() -> Settings {
    browser::load_settings().await.unwrap_or_else(|e| {
        log::warn!("Using default settings: {}", e);
        Settings::default()
    })
}

/// Seed empty storage on install without touching existing data
pub async fn on_installed() -> Result<()> {
    let has_dorks = browser::load_dorks_if_present().await?.is_some();
    let has_settings = browser::load_settings_if_present().await?.is_some();
    let seed = InstallSeed::plan(has_dorks, has_settings);

    if let Some(dorks) = &seed.dorks {
        browser::save_dorks(dorks).await?;
    }
    if let Some(settings) = &seed.settings {
        browser::save_settings(settings).await?;
    }
    if !seed.is_empty() {
        log::info!("Seeded storage defaults");
    }

    show(&Notice::welcome(), &current_settings().await);
    Ok(())
}

pub fn register_context_menu() {
    browser::register_context_menu(CONTEXT_MENU_ID, CONTEXT_MENU_TITLE);
}

/// Save a context-menu selection verbatim, without classifying it
///
/// Every outcome ends in a notice or a log line; nothing is returned to the glue.
pub async fn save_selection(selection: &str) {
    if selection.is_empty() {
        return;
    }

    let settings = current_settings().await;
    let outcome = store_selection(selection).await;

    match &outcome {
        Ok(record) => log::info!("Saved selection as dork {}", record.id),
        Err(DorkError::Duplicate) => log::warn!("Selection already saved"),
        Err(DorkError::EmptyText) => {}
        Err(e) => log::error!("Failed to save selection: {}", e),
    }

    if let Some(notice) = selection_notice(&outcome) {
        show(&notice, &settings);
    }
}

async fn store_selection(selection: &str) -> Result<DorkRecord> {
    let mut dorks = browser::load_dorks().await?;
    let record = insert_unique(&mut dorks, NewDork::from_context_menu(selection.to_string()), Timestamp::now())?;
    browser::save_dorks(&dorks).await?;
    Ok(record)
}

/// Notice for a context-menu save; blank selections stay silent
fn selection_notice(outcome: &Result<DorkRecord>) -> Option<Notice> {
    match outcome {
        Ok(record) => Some(Notice::saved(&record.text)),
        Err(DorkError::Duplicate) => Some(Notice::duplicate()),
        Err(DorkError::EmptyText) => None,
        Err(e) => Some(Notice::save_failed(e)),
    }
}

/// Handle one runtime message; `Some` carries the reply for request messages
pub async fn dispatch(message: Message) -> Result<Option<TabUrlResponse>> {
    match message {
        Message::DorkSaved { dork } => {
            show(&Notice::auto_saved(&dork.text), &current_settings().await);
            Ok(None)
        }
        Message::GetCurrentTabUrl => {
            let url = browser::active_tab_url().await?;
            Ok(Some(TabUrlResponse { url }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_previews_long_text() {
        let text = "intitle:\"index of\" ".repeat(5);
        let notice = Notice::auto_saved(&text);

        assert_eq!(notice.title, "Dork Saved!");
        assert!(notice.message.starts_with("Automatically saved: intitle:"));
        assert!(notice.message.ends_with("..."));
        assert_eq!(notice.message.chars().count(), "Automatically saved: ".len() + 53);
    }

    #[test]
    fn test_notice_short_text_untouched() {
        assert_eq!(Notice::saved("site:a.com").message, "Saved: site:a.com");
    }

    #[test]
    fn test_duplicate_notice() {
        assert_eq!(Notice::duplicate().title, "Dork Already Exists");
    }

    #[test]
    fn test_selection_notice_for_each_outcome() {
        let mut dorks: Vec<DorkRecord> = Vec::new();
        let saved = insert_unique(
            &mut dorks,
            NewDork::from_context_menu("site:a.com".to_string()),
            Timestamp::from_millis(1),
        );

        assert_eq!(selection_notice(&saved), Some(Notice::saved("site:a.com")));
        assert_eq!(selection_notice(&Err(DorkError::Duplicate)), Some(Notice::duplicate()));
        assert_eq!(selection_notice(&Err(DorkError::EmptyText)), None);
    }

    #[test]
    fn test_storage_failure_is_reported() {
        let error = DorkError::StorageUnavailable("QUOTA_BYTES_PER_ITEM quota exceeded".to_string());

        let notice = selection_notice(&Err(error)).unwrap();

        assert_eq!(notice.title, "Could Not Save Dork");
        assert_eq!(notice.message, "Storage unavailable: QUOTA_BYTES_PER_ITEM quota exceeded");
    }

    #[test]
    fn test_malformed_data_is_reported() {
        let notice = selection_notice(&Err(DorkError::Malformed("expected a sequence".to_string()))).unwrap();
        assert_eq!(notice.message, "Malformed stored data: expected a sequence");
    }
}
