//! Merge of a local snapshot with a freshly fetched remote window.
//!
//! The remote window is bounded and possibly stale, so absence from a fetch
//! never deletes anything. Only a shared id with different content produces a
//! conflict, and the remote version is kept until someone overrides it.

use std::collections::{HashMap, HashSet};

use crate::models::{Conflict, Quote, QuoteId};

/// Result of one merge: the new canonical collection and the divergent pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Deduplicated collection, most recently updated first
    pub quotes: Vec<Quote>,
    /// Ids present on both sides with different text or author
    pub conflicts: Vec<Conflict>,
}

/// Merge `local` with `remote`.
///
/// Each input must already have unique ids.
#[must_use]
pub fn merge(local: &[Quote], remote: &[Quote]) -> MergeOutcome {
    let mut local_by_id: HashMap<&QuoteId, &Quote> =
        local.iter().map(|quote| (&quote.id, quote)).collect();

    let mut quotes = Vec::with_capacity(local.len() + remote.len());
    let mut conflicts = Vec::new();

    for remote_quote in remote {
        if let Some(local_quote) = local_by_id.remove(&remote_quote.id) {
            if !local_quote.same_content(remote_quote) {
                conflicts.push(Conflict {
                    id: remote_quote.id.clone(),
                    local: local_quote.clone(),
                    remote: remote_quote.clone(),
                });
            }
        }
        quotes.push(remote_quote.clone());
    }

    // Local order is preserved for what the fetch did not cover
    quotes.extend(
        local
            .iter()
            .filter(|quote| local_by_id.contains_key(&quote.id))
            .cloned(),
    );

    quotes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

    tracing::debug!(
        local = local.len(),
        remote = remote.len(),
        merged = quotes.len(),
        conflicts = conflicts.len(),
        "Merged quote collections"
    );

    MergeOutcome { quotes, conflicts }
}

/// Re-apply store changes made after `snapshot` was taken on top of `outcome`.
///
/// An id counts as touched when `current` added it, changed it, or dropped it
/// relative to `snapshot`. Touched ids keep their `current` state and lose any
/// conflict; the next pass merges them against the remote again.
#[must_use]
pub fn carry_forward(outcome: MergeOutcome, snapshot: &[Quote], current: &[Quote]) -> MergeOutcome {
    let before: HashMap<&QuoteId, &Quote> =
        snapshot.iter().map(|quote| (&quote.id, quote)).collect();
    let now: HashSet<&QuoteId> = current.iter().map(|quote| &quote.id).collect();

    let mut touched: HashSet<QuoteId> = current
        .iter()
        .filter(|quote| before.get(&quote.id).is_none_or(|old| **old != **quote))
        .map(|quote| quote.id.clone())
        .collect();
    touched.extend(
        snapshot
            .iter()
            .filter(|quote| !now.contains(&quote.id))
            .map(|quote| quote.id.clone()),
    );

    if touched.is_empty() {
        return outcome;
    }

    let MergeOutcome {
        mut quotes,
        mut conflicts,
    } = outcome;
    quotes.retain(|quote| !touched.contains(&quote.id));
    quotes.extend(
        current
            .iter()
            .filter(|quote| touched.contains(&quote.id))
            .cloned(),
    );
    quotes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    conflicts.retain(|conflict| !touched.contains(&conflict.id));

    tracing::debug!(touched = touched.len(), "Kept store changes made during fetch");

    MergeOutcome { quotes, conflicts }
}
