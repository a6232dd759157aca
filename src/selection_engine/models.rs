use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default deck length when the caller does not ask for one.
pub const DEFAULT_LIMIT: usize = 50;

fn default_weight() -> f64 {
    1.0
}

fn default_max_per_deck() -> u32 {
    1
}

// ---------------------------------------------------------------------------
// Candidate items
// ---------------------------------------------------------------------------

/// One candidate message as stored in the dataset.
///
/// The engine only reads the scheduling fields below; everything else the
/// data layer attaches (text, icon, author, …) rides along untouched in
/// `extra` and is ignored by selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateItem {
    /// Unique within the dataset.
    pub id: String,
    /// Sampling weight, ≥ 0. Negative or non-finite values are read as 0.
    #[serde(default = "default_weight")]
    pub weight: f64,
    /// Minimum days since last shown before the item is eligible again.
    #[serde(default)]
    pub cooldown_days: u32,
    /// Inclusive lower date bound, day granularity.
    #[serde(default)]
    pub start_at: Option<NaiveDate>,
    /// Inclusive upper date bound, day granularity.
    #[serde(default)]
    pub end_at: Option<NaiveDate>,
    /// Pinned items bypass weighted selection and surface first.
    #[serde(default)]
    pub pin: bool,
    /// Tie-break among pinned items, ascending.
    #[serde(default)]
    pub order: f64,
    /// Cap on how often this id may appear in a single deck. 0 reads as 1.
    #[serde(default = "default_max_per_deck")]
    pub max_per_deck: u32,
    /// Category tags ("kalmte", "valentine", …) used by the category filter.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Opaque fields owned by the data layer.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CandidateItem {
    /// A plain item with all scheduling fields at their defaults.
    pub fn new(id: impl Into<String>) -> Self {
        CandidateItem {
            id: id.into(),
            weight: default_weight(),
            cooldown_days: 0,
            start_at: None,
            end_at: None,
            pin: false,
            order: 0.0,
            max_per_deck: default_max_per_deck(),
            tags: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_cooldown(mut self, days: u32) -> Self {
        self.cooldown_days = days;
        self
    }

    pub fn with_window(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_at = start;
        self.end_at = end;
        self
    }

    pub fn pinned(mut self, order: f64) -> Self {
        self.pin = true;
        self.order = order;
        self
    }

    pub fn with_cap(mut self, max_per_deck: u32) -> Self {
        self.max_per_deck = max_per_deck;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Effective per-deck cap; a stored 0 means 1.
    pub fn cap(&self) -> u32 {
        self.max_per_deck.max(1)
    }
}

// ---------------------------------------------------------------------------
// Build / navigation options
// ---------------------------------------------------------------------------

/// Options for one deck build.
#[derive(Debug, Clone)]
pub struct DeckOptions {
    /// Active category filter; `None` lets every item through.
    pub category: Option<String>,
    /// Maximum deck length.
    pub limit: usize,
    /// Fixed RNG seed for a reproducible ordering; `None` draws from entropy.
    pub seed: Option<u64>,
    /// Whether pinned items are included (ahead of the sampled ones).
    pub include_pinned_first: bool,
    /// The build date. Drives the date window, cooldown, and seasonal boosts.
    pub today: NaiveDate,
}

impl Default for DeckOptions {
    fn default() -> Self {
        DeckOptions {
            category: None,
            limit: DEFAULT_LIMIT,
            seed: None,
            include_pinned_first: true,
            today: Local::now().date_naive(),
        }
    }
}

/// Options for [`Navigator::push`](crate::Navigator::push).
#[derive(Debug, Clone, Copy)]
pub struct PushOptions {
    /// Record the item as shown in the recency store.
    pub mark: bool,
    /// Move the pointer to the pushed item.
    pub advance: bool,
}

impl Default for PushOptions {
    fn default() -> Self {
        PushOptions {
            mark: true,
            advance: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_deserializes_from_dataset_shape() {
        let raw = r#"{
            "id": "note_001",
            "weight": 2.5,
            "cooldownDays": 7,
            "startAt": "2026-02-01",
            "endAt": "2026-02-28",
            "pin": true,
            "order": 3,
            "maxPerDeck": 2,
            "tags": ["valentine", "liefde"],
            "icon": "💛",
            "text": "Je bent genoeg."
        }"#;
        let item: CandidateItem = serde_json::from_str(raw).expect("valid item JSON");
        assert_eq!(item.id, "note_001");
        assert_eq!(item.weight, 2.5);
        assert_eq!(item.cooldown_days, 7);
        assert_eq!(item.start_at, NaiveDate::from_ymd_opt(2026, 2, 1));
        assert_eq!(item.end_at, NaiveDate::from_ymd_opt(2026, 2, 28));
        assert!(item.pin);
        assert_eq!(item.order, 3.0);
        assert_eq!(item.max_per_deck, 2);
        assert!(item.has_tag("valentine"));
        // Opaque fields survive untouched.
        assert_eq!(item.extra["icon"], "💛");
    }

    #[test]
    fn missing_fields_take_defaults() {
        let item: CandidateItem = serde_json::from_str(r#"{"id":"bare"}"#).expect("bare item");
        assert_eq!(item.weight, 1.0);
        assert_eq!(item.cooldown_days, 0);
        assert!(item.start_at.is_none() && item.end_at.is_none());
        assert!(!item.pin);
        assert_eq!(item.max_per_deck, 1);
        assert!(item.tags.is_empty());
    }

    #[test]
    fn cap_treats_zero_as_one() {
        let item = CandidateItem::new("x").with_cap(0);
        assert_eq!(item.cap(), 1);
        assert_eq!(CandidateItem::new("y").with_cap(3).cap(), 3);
    }
}
