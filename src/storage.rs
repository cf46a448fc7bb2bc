/// The saved-dork collection and the popup's filtered view of it

use crate::dork::{DorkId, DorkRecord, NewDork, Settings, Timestamp};
use crate::error::{DorkError, Result};

pub const DORKS_KEY: &str = "savedDorks";
pub const SETTINGS_KEY: &str = "settings";

/// Whether `text` is already in the collection (exact match)
pub fn contains_text(records: &[DorkRecord], text: &str) -> bool {
    records.iter().any(|r| r.text == text)
}

/// Prepend a new record, rejecting blank text and exact duplicates
///
/// The id is the creation time in millis, bumped past the largest existing id
/// when another record already holds that millisecond.
pub fn insert_unique(records: &mut Vec<DorkRecord>, draft: NewDork, now: Timestamp) -> Result<DorkRecord> {
    if draft.text.trim().is_empty() {
        return Err(DorkError::EmptyText);
    }
    if contains_text(records, &draft.text) {
        return Err(DorkError::Duplicate);
    }

    let mut id = now.millis();
    if records.iter().any(|r| r.id == id) {
        id = records.iter().map(|r| r.id).max().unwrap_or(id) + 1;
    }

    let record = DorkRecord {
        id,
        text: draft.text,
        tags: draft.tags,
        created_at: now.to_iso(),
        usage_count: draft.usage_count,
        last_used: None,
        source: draft.source,
    };
    records.insert(0, record.clone());
    Ok(record)
}

/// What a fresh install has to write
///
/// Seeding happens only when no collection exists yet, and even then an
/// existing `settings` value is left alone.
#[derive(Debug, Clone, PartialEq)]
pub struct InstallSeed {
    pub dorks: Option<Vec<DorkRecord>>,
    pub settings: Option<Settings>,
}

impl InstallSeed {
    pub fn plan(has_dorks: bool, has_settings: bool) -> InstallSeed {
        if has_dorks {
            return InstallSeed { dorks: None, settings: None };
        }
        InstallSeed {
            dorks: Some(Vec::new()),
            settings: (!has_settings).then(Settings::default),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dorks.is_none() && self.settings.is_none()
    }
}

/// Full collection plus the ids currently passing the search filter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DorkStore {
    dorks: Vec<DorkRecord>,
    filtered: Vec<DorkId>,
    search_term: String,
}

impl DorkStore {
    pub fn new(dorks: Vec<DorkRecord>) -> Self {
        let filtered = dorks.iter().map(|d| d.id).collect();
        DorkStore {
            dorks,
            filtered,
            search_term: String::new(),
        }
    }

    /// Full collection, most recent first
    pub fn records(&self) -> &[DorkRecord] {
        &self.dorks
    }

    pub fn filtered(&self) -> Vec<&DorkRecord> {
        self.filtered.iter().filter_map(|id| self.get(*id)).collect()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn get(&self, id: DorkId) -> Option<&DorkRecord> {
        self.dorks.iter().find(|d| d.id == id)
    }

    /// Create a manually entered record from raw form input
    pub fn add(&mut self, text: &str, tag_input: &str, now: Timestamp) -> Result<DorkRecord> {
        let text = text.trim();
        let tags = crate::operations::parse_tags(tag_input);
        let record = insert_unique(&mut self.dorks, NewDork::manual(text.to_string(), tags), now)?;
        self.filtered.insert(0, record.id);
        Ok(record)
    }

    /// Filter by case-insensitive match on text or any tag
    pub fn search(&mut self, term: &str) {
        self.search_term = term.to_string();

        if term.trim().is_empty() {
            self.filtered = self.dorks.iter().map(|d| d.id).collect();
            return;
        }

        let term = term.to_lowercase();
        self.filtered = self
            .dorks
            .iter()
            .filter(|d| {
                d.text.to_lowercase().contains(&term)
                    || d.tags.iter().any(|tag| tag.to_lowercase().contains(&term))
            })
            .map(|d| d.id)
            .collect();
    }

    pub fn clear_search(&mut self) {
        self.search("");
    }

    /// Count one more use; `lastUsed` never precedes `createdAt`
    pub fn record_use(&mut self, id: DorkId, now: Timestamp) -> Option<&DorkRecord> {
        self.dorks.iter_mut().find(|d| d.id == id).map(|dork| {
            let used_at = dork.created().map_or(now, |created| created.max(now));
            dork.usage_count = dork.usage_count.saturating_add(1);
            dork.last_used = Some(used_at.to_iso());
            &*dork
        })
    }

    pub fn remove(&mut self, id: DorkId) -> bool {
        let len_before = self.dorks.len();
        self.dorks.retain(|d| d.id != id);
        self.filtered.retain(|f| *f != id);
        self.dorks.len() < len_before
    }

    /// "3 saved dorks" or, while filtering, "1 of 3 dorks"
    pub fn count_label(&self) -> String {
        let count = self.filtered.len();
        let total = self.dorks.len();
        let plural = |n: usize| if n == 1 { "" } else { "s" };

        if count == total {
            format!("{} saved dork{}", count, plural(count))
        } else {
            format!("{} of {} dork{}", count, total, plural(total))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dork::DorkSource;

    const T0: u64 = 1698508200000;

    fn store_with(texts: &[(&str, &str)]) -> DorkStore {
        let mut store = DorkStore::default();
        for (i, (text, tags)) in texts.iter().enumerate() {
            store.add(text, tags, Timestamp::from_millis(T0 + i as u64)).unwrap();
        }
        store
    }

    fn texts(records: &[&DorkRecord]) -> Vec<String> {
        records.iter().map(|r| r.text.clone()).collect()
    }

    #[test]
    fn test_store_new_shows_everything() {
        let store = store_with(&[("site:a.com", ""), ("site:b.com", "")]);
        let reloaded = DorkStore::new(store.records().to_vec());

        assert_eq!(texts(&reloaded.filtered()), vec!["site:b.com", "site:a.com"]);
    }

    #[test]
    fn test_add_trims_and_parses_tags() {
        let mut store = DorkStore::default();

        let record = store.add("  intitle:index.of  ", "recon, ,files ", Timestamp::from_millis(T0)).unwrap();

        assert_eq!(record.text, "intitle:index.of");
        assert_eq!(record.tags, vec!["recon", "files"]);
        assert_eq!(record.usage_count, 0);
        assert_eq!(record.source, None);
        assert_eq!(record.id, T0);
        assert_eq!(record.created_at, "2023-10-28T15:50:00.000Z");
    }

    #[test]
    fn test_add_accepts_any_text() {
        let mut store = DorkStore::default();
        assert!(store.add("just words", "", Timestamp::from_millis(T0)).is_ok());
    }

    #[test]
    fn test_add_rejects_empty() {
        let mut store = DorkStore::default();

        assert_eq!(store.add("   ", "tag", Timestamp::from_millis(T0)), Err(DorkError::EmptyText));
        assert!(store.records().is_empty());
    }

    #[test]
    fn test_add_rejects_duplicate_after_trim() {
        let mut store = DorkStore::default();
        store.add("site:example.com", "", Timestamp::from_millis(T0)).unwrap();

        let second = store.add(" site:example.com ", "other", Timestamp::from_millis(T0 + 1));

        assert_eq!(second, Err(DorkError::Duplicate));
        assert_eq!(store.records().len(), 1);
        assert_eq!(store.filtered().len(), 1);
    }

    #[test]
    fn test_add_prepends() {
        let store = store_with(&[("first:1", ""), ("second:2", "")]);
        assert_eq!(store.records()[0].text, "second:2");
        assert_eq!(store.filtered()[0].text, "second:2");
    }

    #[test]
    fn test_same_millisecond_ids_stay_unique() {
        let mut store = DorkStore::default();
        let a = store.add("a:1", "", Timestamp::from_millis(T0)).unwrap();
        let b = store.add("b:2", "", Timestamp::from_millis(T0)).unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(b.id, T0 + 1);
    }

    #[test]
    fn test_search_matches_text_or_tag() {
        let mut store = store_with(&[("site:a.com", "recon"), ("filetype:pdf", "Docs"), ("inurl:admin", "")]);

        store.search("DOCS");
        assert_eq!(texts(&store.filtered()), vec!["filetype:pdf"]);

        store.search("site");
        assert_eq!(texts(&store.filtered()), vec!["site:a.com"]);

        store.search("nothing-here");
        assert!(store.filtered().is_empty());
    }

    #[test]
    fn test_empty_search_restores_order() {
        let mut store = store_with(&[("a:1", ""), ("b:2", ""), ("c:3", "")]);
        store.search("b");
        store.search("");

        assert_eq!(texts(&store.filtered()), vec!["c:3", "b:2", "a:1"]);

        store.search("a");
        store.search("   ");
        assert_eq!(store.filtered().len(), 3);
    }

    #[test]
    fn test_remove_from_both_views() {
        let mut store = store_with(&[("site:a.com", "x"), ("site:b.com", "x")]);
        store.search("x");
        let id = store.records()[0].id;

        assert!(store.remove(id));

        assert!(store.get(id).is_none());
        assert_eq!(texts(&store.filtered()), vec!["site:a.com"]);
        assert_eq!(store.records().len(), 1);
    }

    #[test]
    fn test_remove_nonexistent_is_noop() {
        let mut store = store_with(&[("site:a.com", "")]);
        let before = store.clone();

        assert!(!store.remove(42));
        assert_eq!(store, before);
    }

    #[test]
    fn test_record_use_is_monotonic() {
        let mut store = store_with(&[("site:a.com", "")]);
        let id = store.records()[0].id;

        let first = store.record_use(id, Timestamp::from_millis(T0 + 1000)).unwrap().clone();
        assert_eq!(first.usage_count, 1);
        assert!(first.last_used.clone().unwrap() >= first.created_at);

        let second = store.record_use(id, Timestamp::from_millis(T0 + 2000)).unwrap().clone();
        assert_eq!(second.usage_count, 2);
        assert!(second.last_used > first.last_used);
    }

    #[test]
    fn test_record_use_never_before_creation() {
        let mut store = store_with(&[("site:a.com", "")]);
        let id = store.records()[0].id;

        let used = store.record_use(id, Timestamp::from_millis(T0 - 5000)).unwrap();

        assert_eq!(used.last_used.as_deref(), Some(used.created_at.as_str()));
    }

    #[test]
    fn test_record_use_unknown_id() {
        let mut store = store_with(&[("site:a.com", "")]);
        assert!(store.record_use(7, Timestamp::from_millis(T0)).is_none());
    }

    #[test]
    fn test_count_label() {
        let mut store = store_with(&[("a:1", "")]);
        assert_eq!(store.count_label(), "1 saved dork");

        store.add("b:2", "", Timestamp::from_millis(T0 + 10)).unwrap();
        assert_eq!(store.count_label(), "2 saved dorks");

        store.search("a:");
        assert_eq!(store.count_label(), "1 of 2 dorks");
    }

    #[test]
    fn test_insert_unique_keeps_text_verbatim() {
        let mut records: Vec<DorkRecord> = Vec::new();

        let record = insert_unique(
            &mut records,
            NewDork::from_context_menu(" site:a.com ".to_string()),
            Timestamp::from_millis(T0),
        )
        .unwrap();

        assert_eq!(record.text, " site:a.com ");
        assert_eq!(record.source, Some(DorkSource::ContextMenu));
        assert_eq!(
            insert_unique(&mut records, NewDork::auto_detected(" site:a.com ".to_string()), Timestamp::from_millis(T0)),
            Err(DorkError::Duplicate)
        );
    }

    #[test]
    fn test_install_seed_never_overwrites() {
        let fresh = InstallSeed::plan(false, false);
        assert_eq!(fresh.dorks, Some(Vec::new()));
        assert_eq!(fresh.settings, Some(Settings::default()));

        let existing = InstallSeed::plan(true, true);
        assert!(existing.is_empty());

        let keeps_settings = InstallSeed::plan(false, true);
        assert_eq!(keeps_settings.dorks, Some(Vec::new()));
        assert_eq!(keeps_settings.settings, None);
    }

    #[test]
    fn test_install_seed_skipped_when_collection_exists() {
        let seed = InstallSeed::plan(true, false);
        assert!(seed.is_empty());
        assert_eq!(seed.settings, None);
    }
}
