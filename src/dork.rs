/// Data structures for saved dorks
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub type DorkId = u64;

/// Who created a record. Manually entered records carry no source.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DorkSource {
    ContextMenu,
    AutoDetected,
}

impl DorkSource {
    /// Tag attached to records created by this producer
    pub fn tag(self) -> &'static str {
        match self {
            DorkSource::ContextMenu => "context-menu",
            DorkSource::AutoDetected => "auto-detected",
        }
    }
}

/// A saved dork
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DorkRecord {
    pub id: DorkId,
    pub text: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: String,
    #[serde(default)]
    pub usage_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<DorkSource>,
}

impl DorkRecord {
    pub fn created(&self) -> Option<Timestamp> {
        Timestamp::parse_iso(&self.created_at)
    }
}

/// Input for creating a record, before an id and timestamp are assigned
#[derive(Debug, Clone, PartialEq)]
pub struct NewDork {
    pub text: String,
    pub tags: Vec<String>,
    pub usage_count: u32,
    pub source: Option<DorkSource>,
}

impl NewDork {
    pub fn manual(text: String, tags: Vec<String>) -> NewDork {
        NewDork {
            text,
            tags,
            usage_count: 0,
            source: None,
        }
    }

    pub fn from_context_menu(text: String) -> NewDork {
        NewDork {
            text,
            tags: vec![DorkSource::ContextMenu.tag().to_string()],
            usage_count: 0,
            source: Some(DorkSource::ContextMenu),
        }
    }

    /// Auto-detected dorks count the search that surfaced them as one use
    pub fn auto_detected(text: String) -> NewDork {
        NewDork {
            text,
            tags: vec![DorkSource::AutoDetected.tag().to_string()],
            usage_count: 1,
            source: Some(DorkSource::AutoDetected),
        }
    }
}

/// User settings stored under the `settings` key
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub auto_detect: bool,
    pub show_notifications: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            auto_detect: true,
            show_notifications: true,
        }
    }
}

/// Wall-clock instant in milliseconds since the Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn from_millis(millis: u64) -> Timestamp {
        Timestamp(millis)
    }

    /// Current time from the JS clock
    pub fn now() -> Timestamp {
        Timestamp(js_sys::Date::now() as u64)
    }

    pub fn millis(self) -> u64 {
        self.0
    }

    /// Same shape as JS `Date.prototype.toISOString`
    pub fn to_iso(self) -> String {
        DateTime::<Utc>::from_timestamp_millis(self.0 as i64)
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
            .unwrap_or_default()
    }

    pub fn parse_iso(s: &str) -> Option<Timestamp> {
        DateTime::parse_from_rfc3339(s)
            .ok()
            .and_then(|dt| u64::try_from(dt.timestamp_millis()).ok())
            .map(Timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_iso_matches_js_format() {
        let ts = Timestamp::from_millis(1698508200000);
        assert_eq!(ts.to_iso(), "2023-10-28T15:50:00.000Z");
        assert_eq!(Timestamp::parse_iso(&ts.to_iso()), Some(ts));
    }

    #[test]
    fn test_parse_iso_rejects_garbage() {
        assert_eq!(Timestamp::parse_iso("yesterday"), None);
    }

    #[test]
    fn test_record_reads_stored_layout() {
        let json = r#"{
            "id": 1698508200000,
            "text": "site:example.com",
            "tags": ["recon"],
            "createdAt": "2023-10-28T15:50:00.000Z",
            "usageCount": 2
        }"#;

        let record: DorkRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id, 1698508200000);
        assert_eq!(record.tags, vec!["recon".to_string()]);
        assert_eq!(record.usage_count, 2);
        assert_eq!(record.last_used, None);
        assert_eq!(record.source, None);
    }

    #[test]
    fn test_record_writes_camel_case_and_omits_absent_fields() {
        let record = DorkRecord {
            id: 1,
            text: "inurl:admin".to_string(),
            tags: vec!["context-menu".to_string()],
            created_at: "2023-10-28T15:50:00.000Z".to_string(),
            usage_count: 0,
            last_used: None,
            source: Some(DorkSource::ContextMenu),
        };

        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["createdAt"], "2023-10-28T15:50:00.000Z");
        assert_eq!(value["usageCount"], 0);
        assert_eq!(value["source"], "context-menu");
        assert!(value.get("lastUsed").is_none());
    }

    #[test]
    fn test_settings_missing_keys_default_to_true() {
        let settings: Settings = serde_json::from_str(r#"{"autoDetect": false}"#).unwrap();
        assert!(!settings.auto_detect);
        assert!(settings.show_notifications);
    }

    #[test]
    fn test_producer_defaults() {
        let auto = NewDork::auto_detected("site:a.com".to_string());
        assert_eq!(auto.usage_count, 1);
        assert_eq!(auto.tags, vec!["auto-detected".to_string()]);

        let menu = NewDork::from_context_menu("site:a.com".to_string());
        assert_eq!(menu.usage_count, 0);
        assert_eq!(menu.source, Some(DorkSource::ContextMenu));
    }
}
