/// Search-page dork detection for the content script

use crate::browser;
use crate::classifier::is_dork;
use crate::dork::{DorkRecord, NewDork, Timestamp};
use crate::error::{DorkError, Result};
use crate::messages::Message;
use crate::storage::{contains_text, insert_unique};

const SEARCH_HOST: &str = "google.com";
const SEARCH_PATH: &str = "/search";

/// The `q` parameter of a search results page, if this is one
///
/// `search` is `location.search`, with or without the leading `?`.
pub fn search_query(hostname: &str, pathname: &str, search: &str) -> Option<String> {
    if !hostname.contains(SEARCH_HOST) || pathname != SEARCH_PATH {
        return None;
    }

    url::form_urlencoded::parse(search.trim_start_matches('?').as_bytes())
        .find(|(key, _)| key == "q")
        .map(|(_, value)| value.into_owned())
        .filter(|query| !query.is_empty())
}

/// Whether to offer saving `query` given what is already stored
pub fn should_offer(query: &str, saved: &[DorkRecord]) -> bool {
    is_dork(query) && !contains_text(saved, query)
}

/// Check the current page and return the query worth offering, if any
pub async fn detect() -> Result<Option<String>> {
    let location = match web_sys::window() {
        Some(window) => window.location(),
        None => return Ok(None),
    };

    let (hostname, pathname, search) = match (location.hostname(), location.pathname(), location.search()) {
        (Ok(h), Ok(p), Ok(s)) => (h, p, s),
        _ => return Ok(None),
    };

    let query = match search_query(&hostname, &pathname, &search) {
        Some(query) => query,
        None => return Ok(None),
    };

    if !browser::load_settings().await?.auto_detect {
        log::info!("Auto-detect disabled; ignoring query");
        return Ok(None);
    }

    let saved = browser::load_dorks().await?;
    Ok(should_offer(&query, &saved).then_some(query))
}

/// Persist an auto-detected dork and tell the background about it
pub async fn save_detected(query: String) -> Result<DorkRecord> {
    let mut dorks = browser::load_dorks().await?;
    let record = insert_unique(&mut dorks, NewDork::auto_detected(query), Timestamp::now())?;
    browser::save_dorks(&dorks).await?;

    log::info!("Saved detected dork {}", record.id);

    if let Err(e) = browser::send_message(&Message::DorkSaved { dork: record.clone() }) {
        log::warn!("Could not notify background: {}", e);
    }

    Ok(record)
}

/// Overlay text for a failed save
pub fn save_error_label(error: &DorkError) -> &'static str {
    match error {
        DorkError::Duplicate => "Already saved",
        _ => "Could not save",
    }
}
