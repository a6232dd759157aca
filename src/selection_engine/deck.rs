use std::collections::HashMap;

use chrono::NaiveDate;

use crate::selection_engine::eligibility::{compute_weight, filter_eligible, EligibilityContext};
use crate::selection_engine::models::{CandidateItem, DeckOptions};
use crate::selection_engine::recency::RecencyStore;
use crate::selection_engine::sampler::weighted_shuffle;
use crate::selection_engine::seed::{daily_seed, rng_for_seed};
use crate::selection_engine::storage::StoragePort;

/// An ordered, immutable snapshot of items built for one
/// (category, limit, seed) combination. Consumed by a [`Navigator`].
///
/// [`Navigator`]: crate::Navigator
pub type Deck = Vec<CandidateItem>;

/// Build a deck: filter, partition pinned/normal, weighted-shuffle the normal
/// items, enforce per-item caps while appending, truncate to the limit.
///
/// The category filter is a soft preference: when it matches nothing, the
/// build retries without it (date window and cooldown still apply) instead of
/// returning an empty deck. Deterministic given the same seed, candidates,
/// and recency snapshot.
pub fn build_deck<S: StoragePort>(
    candidates: &[CandidateItem],
    opts: &DeckOptions,
    recency: &RecencyStore<S>,
) -> Deck {
    let ctx = EligibilityContext {
        category: opts.category.as_deref(),
        today: opts.today,
    };
    let mut base = filter_eligible(candidates, &ctx, recency);
    if base.is_empty() && ctx.category.is_some() {
        log::debug!(
            "category {:?} matched nothing, falling back to the full pool",
            ctx.category
        );
        let relaxed = EligibilityContext {
            category: None,
            today: opts.today,
        };
        base = filter_eligible(candidates, &relaxed, recency);
    }

    let (mut pinned, normal): (Vec<_>, Vec<_>) = base.into_iter().partition(|m| m.pin);
    pinned.sort_by(|a, b| a.order.total_cmp(&b.order));

    let mut rng = rng_for_seed(opts.seed);
    let shuffled = weighted_shuffle(&normal, |m| compute_weight(m, opts.today), &mut rng);

    let ordered: Vec<CandidateItem> = if opts.include_pinned_first {
        pinned.into_iter().chain(shuffled).collect()
    } else {
        shuffled
    };

    let mut counts: HashMap<String, u32> = HashMap::new();
    let mut deck: Deck = Vec::new();
    for item in ordered {
        if deck.len() >= opts.limit {
            break;
        }
        let count = counts.entry(item.id.clone()).or_insert(0);
        if *count < item.cap() {
            *count += 1;
            deck.push(item);
        }
    }

    log::debug!(
        "built deck of {} item(s) (limit {}, category {:?}, seed {:?})",
        deck.len(),
        opts.limit,
        opts.category,
        opts.seed
    );
    deck
}

/// Deck for one (language, category) context on one calendar day: same
/// inputs, same order, all day long. Pinned items lead.
pub fn build_daily_deck<S: StoragePort>(
    candidates: &[CandidateItem],
    lang: &str,
    category: &str,
    limit: usize,
    today: NaiveDate,
    recency: &RecencyStore<S>,
) -> Deck {
    let opts = DeckOptions {
        category: if category.is_empty() {
            None
        } else {
            Some(category.to_string())
        },
        limit,
        seed: Some(daily_seed(lang, category, today)),
        include_pinned_first: true,
        today,
    };
    build_deck(candidates, &opts, recency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection_engine::storage::MemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    fn opts(limit: usize, seed: u64) -> DeckOptions {
        DeckOptions {
            limit,
            seed: Some(seed),
            today: date(2026, 8, 25),
            ..DeckOptions::default()
        }
    }

    fn ids(deck: &Deck) -> Vec<&str> {
        deck.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn deck_length_is_min_of_limit_and_eligible() {
        let candidates: Vec<CandidateItem> =
            (0..10).map(|i| CandidateItem::new(format!("n{i}"))).collect();
        let recency = RecencyStore::new(MemoryStore::new());
        assert_eq!(build_deck(&candidates, &opts(4, 1), &recency).len(), 4);
        assert_eq!(build_deck(&candidates, &opts(25, 1), &recency).len(), 10);
        assert_eq!(build_deck(&candidates, &opts(0, 1), &recency).len(), 0);
    }

    #[test]
    fn pinned_items_lead_in_manual_order() {
        let candidates = vec![
            CandidateItem::new("n1"),
            CandidateItem::new("p_late").pinned(9.0),
            CandidateItem::new("n2"),
            CandidateItem::new("p_early").pinned(1.0),
        ];
        let recency = RecencyStore::new(MemoryStore::new());
        for seed in [1u64, 42, 999] {
            let deck = build_deck(&candidates, &opts(10, seed), &recency);
            assert_eq!(&ids(&deck)[..2], &["p_early", "p_late"], "seed={seed}");
        }
    }

    #[test]
    fn pinned_items_are_dropped_when_flag_is_off() {
        let candidates = vec![CandidateItem::new("p").pinned(0.0), CandidateItem::new("n")];
        let recency = RecencyStore::new(MemoryStore::new());
        let built = build_deck(
            &candidates,
            &DeckOptions {
                include_pinned_first: false,
                seed: Some(1),
                today: date(2026, 8, 25),
                ..DeckOptions::default()
            },
            &recency,
        );
        assert_eq!(ids(&built), vec!["n"]);
    }

    #[test]
    fn max_per_deck_caps_duplicate_ids() {
        // The dataset may list the same id more than once; the cap bounds how
        // many copies one deck may carry.
        let mut twice = CandidateItem::new("dup").with_cap(2);
        twice.weight = 3.0;
        let candidates = vec![
            twice.clone(),
            twice.clone(),
            twice,
            CandidateItem::new("once"),
            CandidateItem::new("once"),
        ];
        let recency = RecencyStore::new(MemoryStore::new());
        let deck = build_deck(&candidates, &opts(10, 5), &recency);
        let dup_count = deck.iter().filter(|m| m.id == "dup").count();
        let once_count = deck.iter().filter(|m| m.id == "once").count();
        assert_eq!(dup_count, 2);
        assert_eq!(once_count, 1);
    }

    #[test]
    fn category_starvation_falls_back_to_full_pool() {
        let candidates = vec![
            CandidateItem::new("a").with_tag("kalmte"),
            CandidateItem::new("b").with_tag("kalmte"),
        ];
        let recency = RecencyStore::new(MemoryStore::new());
        let built = build_deck(
            &candidates,
            &DeckOptions {
                category: Some("nonexistent".to_string()),
                seed: Some(1),
                today: date(2026, 8, 25),
                ..DeckOptions::default()
            },
            &recency,
        );
        assert_eq!(built.len(), 2);
    }

    #[test]
    fn fallback_still_respects_cooldown() {
        let candidates = vec![
            CandidateItem::new("cooling").with_cooldown(10).with_tag("kalmte"),
            CandidateItem::new("ready").with_tag("kalmte"),
        ];
        let mut recency = RecencyStore::new(MemoryStore::new());
        recency.mark_shown(&["cooling"], date(2026, 8, 24));
        let built = build_deck(
            &candidates,
            &DeckOptions {
                category: Some("nonexistent".to_string()),
                seed: Some(1),
                today: date(2026, 8, 25),
                ..DeckOptions::default()
            },
            &recency,
        );
        assert_eq!(ids(&built), vec!["ready"]);
    }

    #[test]
    fn same_seed_same_deck() {
        let candidates: Vec<CandidateItem> = (0..30)
            .map(|i| CandidateItem::new(format!("n{i}")).with_weight((i % 5 + 1) as f64))
            .collect();
        let recency = RecencyStore::new(MemoryStore::new());
        let a = build_deck(&candidates, &opts(30, 1234), &recency);
        let b = build_deck(&candidates, &opts(30, 1234), &recency);
        let c = build_deck(&candidates, &opts(30, 4321), &recency);
        assert_eq!(ids(&a), ids(&b));
        assert_ne!(ids(&a), ids(&c));
    }

    #[test]
    fn daily_deck_is_stable_within_a_day() {
        let candidates: Vec<CandidateItem> =
            (0..20).map(|i| CandidateItem::new(format!("n{i}"))).collect();
        let recency = RecencyStore::new(MemoryStore::new());
        let today = date(2026, 8, 25);
        let a = build_daily_deck(&candidates, "nl", "kalmte", 20, today, &recency);
        let b = build_daily_deck(&candidates, "nl", "kalmte", 20, today, &recency);
        assert_eq!(ids(&a), ids(&b));

        let next_day = build_daily_deck(&candidates, "nl", "kalmte", 20, date(2026, 8, 26), &recency);
        assert_ne!(ids(&a), ids(&next_day), "a new day should reshuffle");
    }
}
