/// Dork operations: tag parsing, search URLs, highlighting, fallback chains

use crate::error::{DorkError, Result};
use chrono::DateTime;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::RegexBuilder;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

pub const SEARCH_URL_PREFIX: &str = "https://www.google.com/search?q=";

/// Characters `encodeURIComponent` leaves alone
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const PREVIEW_CHARS: usize = 50;

/// Split comma-separated tag input, trimming each and dropping empties
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Search URL that re-issues a dork
pub fn search_url(text: &str) -> String {
    format!("{}{}", SEARCH_URL_PREFIX, utf8_percent_encode(text, URI_COMPONENT))
}

/// First 50 characters of a dork, with "..." when cut
pub fn preview(text: &str) -> String {
    if text.chars().count() > PREVIEW_CHARS {
        let head: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

/// `YYYY-MM-DD` for an ISO timestamp, or the raw string if it does not parse
pub fn format_created_date(iso: &str) -> String {
    DateTime::parse_from_rfc3339(iso)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| iso.to_string())
}

/// A run of text, flagged when it matched the search term
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub text: String,
    pub highlighted: bool,
}

/// Split text into plain and matching runs for a case-insensitive term
pub fn highlight_segments(text: &str, term: &str) -> Vec<Segment> {
    let plain = || vec![Segment { text: text.to_string(), highlighted: false }];

    if term.trim().is_empty() || text.is_empty() {
        return plain();
    }

    let pattern = match RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern,
        Err(_) => return plain(),
    };

    let mut segments = Vec::new();
    let mut last = 0;
    for found in pattern.find_iter(text) {
        if found.start() > last {
            segments.push(Segment { text: text[last..found.start()].to_string(), highlighted: false });
        }
        segments.push(Segment { text: found.as_str().to_string(), highlighted: true });
        last = found.end();
    }
    if last < text.len() {
        segments.push(Segment { text: text[last..].to_string(), highlighted: false });
    }

    segments
}

/// A browser facility a fallback chain can try
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    NewTab,
    NewWindow,
    Clipboard,
    LegacyCopy,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::NewTab => "new tab",
            Capability::NewWindow => "new window",
            Capability::Clipboard => "clipboard",
            Capability::LegacyCopy => "legacy copy",
        };
        f.write_str(name)
    }
}

pub type Attempt<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a>>;

/// Try each capability in order; the first success wins
///
/// Attempts are lazy futures, so later ones never run once an earlier one
/// succeeds. If all fail the error lists every failure in order.
pub async fn first_success<T>(attempts: Vec<(Capability, Attempt<'_, T>)>) -> Result<(Capability, T)> {
    let mut failures = Vec::new();

    for (capability, attempt) in attempts {
        match attempt.await {
            Ok(value) => return Ok((capability, value)),
            Err(e) => {
                log::warn!("{} failed: {}", capability, e);
                failures.push(format!("{} ({})", capability, e));
            }
        }
    }

    Err(DorkError::ResourceUnavailable(failures.join(", ")))
}

#[cfg(test)]
pub(crate) fn block_on<F: Future>(future: F) -> F::Output {
    use std::task::{Context, Poll, Waker};

    let mut future = std::pin::pin!(future);
    let mut cx = Context::from_waker(Waker::noop());
    match future.as_mut().poll(&mut cx) {
        Poll::Ready(value) => value,
        Poll::Pending => panic!("test future did not complete synchronously"),
    }
}
