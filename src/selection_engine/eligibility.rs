use chrono::{Datelike, NaiveDate};

use crate::selection_engine::models::CandidateItem;
use crate::selection_engine::recency::RecencyStore;
use crate::selection_engine::sampler::sanitize_weight;
use crate::selection_engine::storage::StoragePort;

/// Inputs for one eligibility pass.
#[derive(Debug, Clone, Copy)]
pub struct EligibilityContext<'a> {
    /// Active category filter; `None` lets every item through.
    pub category: Option<&'a str>,
    pub today: NaiveDate,
}

/// Narrow `candidates` to the items eligible under `ctx`.
///
/// An item passes when it matches the active category (if any), `today` falls
/// inside its date window, and it is not cooling down. Reads the recency
/// store, never writes it.
pub fn filter_eligible<S: StoragePort>(
    candidates: &[CandidateItem],
    ctx: &EligibilityContext<'_>,
    recency: &RecencyStore<S>,
) -> Vec<CandidateItem> {
    candidates
        .iter()
        .filter(|m| matches_category(m, ctx.category))
        .filter(|m| in_date_window(m, ctx.today))
        .filter(|m| !recency.is_in_cooldown(m, ctx.today))
        .cloned()
        .collect()
}

/// With no active category every item matches; otherwise the item must carry
/// the category among its tags.
pub fn matches_category(item: &CandidateItem, category: Option<&str>) -> bool {
    match category {
        Some(cat) => item.has_tag(cat),
        None => true,
    }
}

/// Inclusive date window at day granularity; absent bounds are open.
pub fn in_date_window(item: &CandidateItem, today: NaiveDate) -> bool {
    if let Some(start) = item.start_at {
        if today < start {
            return false;
        }
    }
    if let Some(end) = item.end_at {
        if today > end {
            return false;
        }
    }
    true
}

/// Sampling weight for one build day: the sanitized base weight with the
/// seasonal boosts applied (Feb 14 doubles `valentine`-tagged items, Dec 31
/// gives `newyear`-tagged items ×1.5).
pub fn compute_weight(item: &CandidateItem, today: NaiveDate) -> f64 {
    let mut w = sanitize_weight(item.weight);
    if today.month() == 2 && today.day() == 14 && item.has_tag("valentine") {
        w *= 2.0;
    }
    if today.month() == 12 && today.day() == 31 && item.has_tag("newyear") {
        w *= 1.5;
    }
    w
}
