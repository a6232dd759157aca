use std::collections::HashMap;

use chrono::NaiveDate;

use crate::selection_engine::models::CandidateItem;
use crate::selection_engine::storage::StoragePort;

/// Storage key for the recency map. One flat JSON object
/// `{ "<itemId>": "YYYY-MM-DD", … }` lives under it.
pub const RECENT_KEY: &str = "note_recent_shown_ids_v1";

const DATE_FMT: &str = "%Y-%m-%d";

/// Persisted map of item id → last-shown date, read for cooldown checks and
/// written only by an explicit "mark shown".
///
/// Every read re-parses the stored JSON; corrupt or missing state reads as an
/// empty map. Writes are last-write-wins per id.
pub struct RecencyStore<S: StoragePort> {
    store: S,
    key: String,
}

impl<S: StoragePort> RecencyStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, RECENT_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        RecencyStore {
            store,
            key: key.into(),
        }
    }

    fn read_map(&self) -> HashMap<String, String> {
        self.store
            .get(&self.key)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    /// Overwrite the last-shown date for each id.
    pub fn mark_shown<I: AsRef<str>>(&mut self, ids: &[I], date: NaiveDate) {
        if ids.is_empty() {
            return;
        }
        let mut map = self.read_map();
        let iso = date.format(DATE_FMT).to_string();
        for id in ids {
            map.insert(id.as_ref().to_string(), iso.clone());
        }
        if let Ok(raw) = serde_json::to_string(&map) {
            self.store.set(&self.key, &raw);
        }
        log::trace!("marked {} item(s) shown on {iso}", ids.len());
    }

    /// Last recorded shown date for `id`, if any. Unparseable entries read
    /// as absent.
    pub fn last_shown(&self, id: &str) -> Option<NaiveDate> {
        self.read_map()
            .get(id)
            .and_then(|s| NaiveDate::parse_from_str(s, DATE_FMT).ok())
    }

    /// True iff the item has a cooldown, a prior shown date, and
    /// `0 ≤ days_since(last, today) < cooldown_days`.
    pub fn is_in_cooldown(&self, item: &CandidateItem, today: NaiveDate) -> bool {
        if item.cooldown_days == 0 {
            return false;
        }
        let Some(last) = self.last_shown(&item.id) else {
            return false;
        };
        let days = (today - last).num_days();
        days >= 0 && days < i64::from(item.cooldown_days)
    }
}
