/// Error kinds shared by every surface of the extension
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DorkError {
    #[error("This dork is already saved!")]
    Duplicate,

    #[error("Dork text is empty")]
    EmptyText,

    /// A browser capability (tab, window, clipboard) is missing or failed
    #[error("{0} unavailable")]
    ResourceUnavailable(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Malformed stored data: {0}")]
    Malformed(String),
}

impl From<serde_wasm_bindgen::Error> for DorkError {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        DorkError::Malformed(e.to_string())
    }
}

pub type Result<T, E = DorkError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_message_is_user_facing() {
        assert_eq!(DorkError::Duplicate.to_string(), "This dork is already saved!");
    }

    #[test]
    fn test_resource_message_names_capability() {
        let err = DorkError::ResourceUnavailable("chrome.tabs".to_string());
        assert_eq!(err.to_string(), "chrome.tabs unavailable");
    }
}
