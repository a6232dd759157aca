//! # note_deck
//!
//! A "note of the day" selection-and-navigation engine.
//!
//! Given a pool of candidate messages with weights, eligibility windows, and
//! pinning rules, the engine repeatedly picks what to show next, avoids
//! over-repeating recently shown items, and lets the user step backward and
//! forward through what they have already seen — like browser history.
//!
//! ## How it works
//!
//! 1. Build a [`Deck`] with [`build_deck`] (or [`build_daily_deck`] for a
//!    seed derived from the calendar day): candidates are filtered by
//!    category, date window, and cooldown, pinned items are sorted to the
//!    front, and the rest is ordered by an Efraimidis–Spirakis weighted
//!    shuffle.
//! 2. Hand the deck to a [`Navigator`] scoped to one (language, category)
//!    context. `next()` draws unseen deck items and records them as shown in
//!    the [`RecencyStore`]; `prev()`/`next()` replay the trail; pushing while
//!    back in the trail discards the abandoned forward branch.
//!
//! Persistence goes through the [`StoragePort`] get/set contract — the engine
//! never touches a concrete storage API, and corrupt persisted state silently
//! resets instead of erroring.
//!
//! ## Key properties
//!
//! - **Deterministic**: a fixed seed reproduces the exact deck order; the
//!   daily seed keeps one day's order stable per context.
//! - **Total**: no operation panics or returns an error. Worst case is an
//!   empty or repeating deck, surfaced as `None`.
//! - **Weight-proportional**: higher-weight items tend to rank earlier;
//!   zero-weight items sink to the bottom but are never dropped outright.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use note_deck::{
//!     build_deck, CandidateItem, DeckOptions, MemoryStore, Navigator, RecencyStore,
//! };
//!
//! let candidates = vec![
//!     CandidateItem::new("steady"),
//!     CandidateItem::new("favourite").with_weight(5.0),
//!     CandidateItem::new("opening").pinned(1.0),
//! ];
//!
//! let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
//! let mut recency = RecencyStore::new(MemoryStore::new());
//! let opts = DeckOptions { limit: 10, seed: Some(42), today, ..DeckOptions::default() };
//! let deck = build_deck(&candidates, &opts, &recency);
//! assert_eq!(deck[0].id, "opening"); // pinned items lead
//!
//! let mut nav = Navigator::new("en", "all", deck, MemoryStore::new());
//! let first = nav.next(&mut recency, today);
//! assert!(first.is_some());
//! assert!(!nav.has_prev());
//! let back = nav.prev(); // no-op at the start of the trail
//! assert_eq!(back.map(|m| m.id), first.map(|m| m.id));
//! ```

pub mod selection_engine;

// Convenience re-exports so callers can use `note_deck::build_deck` directly
// without reaching into `selection_engine::`.
pub use selection_engine::{
    build_daily_deck, build_deck, compute_weight, context_key, daily_seed, filter_eligible,
    rng_for_seed, sanitize_weight, weighted_shuffle, CandidateItem, Deck, DeckOptions,
    EligibilityContext, MemoryStore, NavigationState, Navigator, PushOptions, RecencyStore,
    StoragePort, DEFAULT_LIMIT, HISTORY_PREFIX, RECENT_KEY,
};
