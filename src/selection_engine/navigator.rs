use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::selection_engine::deck::Deck;
use crate::selection_engine::models::{CandidateItem, PushOptions};
use crate::selection_engine::recency::RecencyStore;
use crate::selection_engine::storage::StoragePort;

/// Prefix for per-context history keys in session storage.
pub const HISTORY_PREFIX: &str = "note_hist_";

/// Storage key for one (language, category) context.
pub fn context_key(lang: &str, category: &str) -> String {
    format!("{HISTORY_PREFIX}{lang}__{category}")
}

/// Persisted trail of viewed items plus a pointer into it.
///
/// `idx` is `-1` when the stack is empty, else an index into `stack`.
/// Serialized as `{ "stack": [...], "idx": n }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationState {
    pub stack: Vec<CandidateItem>,
    pub idx: i64,
}

impl Default for NavigationState {
    fn default() -> Self {
        NavigationState {
            stack: Vec::new(),
            idx: -1,
        }
    }
}

/// Back/forward traversal over viewed items, browser-history style, scoped
/// to one (language, category) context.
///
/// Going back replays the trail; going forward past its head draws the next
/// unseen item from the bound deck and records it as shown. Pushing while
/// back in the trail discards the abandoned forward branch. Every operation
/// is total: with no deck or an empty pool the answer is `None`, never a
/// panic.
///
/// State is persisted through the session storage handle on every mutation
/// and reloaded on construction, so a navigator rebuilt mid-session resumes
/// where the user left off.
pub struct Navigator<S: StoragePort> {
    lang: String,
    category: String,
    deck: Deck,
    state: NavigationState,
    session: S,
}

impl<S: StoragePort> Navigator<S> {
    /// Bind a deck to a context, restoring any persisted trail for it.
    /// Corrupt persisted state silently resets to empty.
    pub fn new(
        lang: impl Into<String>,
        category: impl Into<String>,
        deck: Deck,
        session: S,
    ) -> Self {
        let lang = lang.into();
        let category = category.into();
        let state = session
            .get(&context_key(&lang, &category))
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        Navigator {
            lang,
            category,
            deck,
            state,
            session,
        }
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// The session storage handle this navigator persists through.
    pub fn session_store(&self) -> &S {
        &self.session
    }

    fn persist(&mut self) {
        if let Ok(raw) = serde_json::to_string(&self.state) {
            self.session
                .set(&context_key(&self.lang, &self.category), &raw);
        }
    }

    pub fn has_prev(&self) -> bool {
        self.state.idx > 0
    }

    pub fn has_next(&self) -> bool {
        self.state.idx >= 0 && self.state.idx < self.state.stack.len() as i64 - 1
    }

    /// The item under the pointer, or `None` when the trail is empty.
    pub fn current(&self) -> Option<&CandidateItem> {
        if self.state.idx < 0 {
            return None;
        }
        self.state.stack.get(self.state.idx as usize)
    }

    /// Step back in the trail. No-op at the start; always answers the item
    /// now under the pointer.
    pub fn prev(&mut self) -> Option<CandidateItem> {
        if self.has_prev() {
            self.state.idx -= 1;
            self.persist();
        }
        self.current().cloned()
    }

    /// Step forward: replay the trail if there is anything ahead, otherwise
    /// draw the first deck item not yet in the trail and push it (marking it
    /// shown on `today`). An exhausted deck falls back to its first item,
    /// repeats allowed; an empty deck leaves the trail untouched.
    pub fn next<R: StoragePort>(
        &mut self,
        recency: &mut RecencyStore<R>,
        today: NaiveDate,
    ) -> Option<CandidateItem> {
        if self.has_next() {
            self.state.idx += 1;
            self.persist();
            return self.current().cloned();
        }
        let fresh = {
            let seen: HashSet<&str> = self.state.stack.iter().map(|m| m.id.as_str()).collect();
            self.deck
                .iter()
                .find(|m| !seen.contains(m.id.as_str()))
                .or_else(|| self.deck.first())
                .cloned()
        };
        match fresh {
            Some(item) => self.push(item, PushOptions::default(), recency, today),
            None => self.current().cloned(),
        }
    }

    /// Append an item to the trail. Pushing while back in the trail first
    /// truncates the abandoned forward branch, like browser history.
    pub fn push<R: StoragePort>(
        &mut self,
        item: CandidateItem,
        opts: PushOptions,
        recency: &mut RecencyStore<R>,
        today: NaiveDate,
    ) -> Option<CandidateItem> {
        if self.state.idx < self.state.stack.len() as i64 - 1 {
            let keep = (self.state.idx + 1).max(0) as usize;
            self.state.stack.truncate(keep);
        }
        let id = item.id.clone();
        self.state.stack.push(item);
        if opts.advance {
            self.state.idx = self.state.stack.len() as i64 - 1;
        }
        self.persist();
        if opts.mark {
            recency.mark_shown(&[id.as_str()], today);
        }
        self.current().cloned()
    }

    /// Swap in a new deck and clear the trail. Used whenever the active
    /// filter or context changes.
    pub fn reset_with_deck(&mut self, deck: Deck) {
        log::debug!(
            "history reset for {}__{} ({} deck item(s))",
            self.lang,
            self.category,
            deck.len()
        );
        self.deck = deck;
        self.state = NavigationState::default();
        self.persist();
    }
}
