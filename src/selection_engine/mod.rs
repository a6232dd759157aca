//! Core selection engine — deck building, weighted sampling, and history
//! navigation.
//!
//! ## Module overview
//!
//! | Module        | Purpose |
//! |---------------|---------|
//! | `models`      | Shared types: candidate items, build/push options |
//! | `storage`     | `StoragePort` get/set contract + in-memory backend |
//! | `recency`     | Persisted id → last-shown map, cooldown checks |
//! | `seed`        | Daily seed hashing and RNG construction |
//! | `sampler`     | Efraimidis–Spirakis weighted permutation |
//! | `eligibility` | Category, date-window, and cooldown filtering |
//! | `deck`        | `build_deck()` orchestration and the `Deck` alias |
//! | `navigator`   | Back/forward trail with branch truncation |

pub mod deck;
pub mod eligibility;
pub mod models;
pub mod navigator;
pub mod recency;
pub mod sampler;
pub mod seed;
pub mod storage;

// Re-export the public API surface so callers can use
// `selection_engine::build_deck` without reaching into sub-modules.
pub use deck::{build_daily_deck, build_deck, Deck};
pub use eligibility::{compute_weight, filter_eligible, EligibilityContext};
pub use models::{CandidateItem, DeckOptions, PushOptions, DEFAULT_LIMIT};
pub use navigator::{context_key, NavigationState, Navigator, HISTORY_PREFIX};
pub use recency::{RecencyStore, RECENT_KEY};
pub use sampler::{sanitize_weight, weighted_shuffle};
pub use seed::{daily_seed, rng_for_seed};
pub use storage::{MemoryStore, StoragePort};
