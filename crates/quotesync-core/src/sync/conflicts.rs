//! Pending conflicts from the latest merge pass and their manual resolution.

use crate::models::{Choice, Conflict, Quote, QuoteId};

/// Conflicts raised by the most recent merge pass.
///
/// Each pass replaces the whole list; unresolved conflicts from an earlier
/// pass are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConflictSet {
    pending: Vec<Conflict>,
}

impl ConflictSet {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Replace the pending list with the conflicts of a new pass.
    pub fn replace(&mut self, conflicts: Vec<Conflict>) {
        self.pending = conflicts;
    }

    /// Read-only view of the pending conflicts.
    #[must_use]
    pub fn pending(&self) -> &[Conflict] {
        &self.pending
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &QuoteId) -> bool {
        self.pending.iter().any(|conflict| &conflict.id == id)
    }

    /// Apply a decision for `id` to `quotes`.
    ///
    /// The chosen version is stamped with `now` and the matching origin and
    /// replaces the record with the same id (or is prepended if that record
    /// was deleted meanwhile). Returns `None` when `id` is not pending, e.g. a
    /// second click on an already resolved conflict.
    pub fn resolve(
        &mut self,
        id: &QuoteId,
        choice: Choice,
        mut quotes: Vec<Quote>,
        now: i64,
    ) -> Option<Vec<Quote>> {
        let index = self
            .pending
            .iter()
            .position(|conflict| &conflict.id == id)?;
        let conflict = self.pending.remove(index);

        let chosen = Quote {
            updated_at: now,
            origin: choice.origin(),
            ..conflict.version(choice).clone()
        };

        if let Some(slot) = quotes.iter_mut().find(|quote| &quote.id == id) {
            *slot = chosen;
        } else {
            quotes.insert(0, chosen);
        }

        tracing::info!("Resolved conflict for quote {id}: kept {choice}");
        Some(quotes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Origin;
    use crate::sync::merge;
    use pretty_assertions::assert_eq;

    fn scenario() -> (Vec<Quote>, Vec<Quote>) {
        let local = vec![Quote {
            id: QuoteId::Remote(1),
            text: "A".to_string(),
            author: "X".to_string(),
            updated_at: 10,
            origin: Origin::Local,
        }];
        let remote = vec![Quote {
            id: QuoteId::Remote(1),
            text: "B".to_string(),
            author: "X".to_string(),
            updated_at: 20,
            origin: Origin::Remote,
        }];
        (local, remote)
    }

    fn merged_set() -> (ConflictSet, Vec<Quote>, Vec<Quote>) {
        let (local, remote) = scenario();
        let outcome = merge(&local, &remote);
        let mut conflicts = ConflictSet::new();
        conflicts.replace(outcome.conflicts);
        (conflicts, outcome.quotes, remote)
    }

    #[test]
    fn resolve_local_restores_local_version() {
        let (mut conflicts, quotes, _) = merged_set();

        let resolved = conflicts
            .resolve(&QuoteId::Remote(1), Choice::Local, quotes, 99)
            .unwrap();

        assert_eq!(
            resolved,
            vec![Quote {
                id: QuoteId::Remote(1),
                text: "A".to_string(),
                author: "X".to_string(),
                updated_at: 99,
                origin: Origin::Local,
            }]
        );
        assert!(conflicts.pending().is_empty());
    }

    #[test]
    fn resolve_remote_stamps_and_keeps_remote_origin() {
        let (mut conflicts, quotes, _) = merged_set();

        let resolved = conflicts
            .resolve(&QuoteId::Remote(1), Choice::Remote, quotes, 77)
            .unwrap();

        assert_eq!(resolved[0].text, "B");
        assert_eq!(resolved[0].updated_at, 77);
        assert_eq!(resolved[0].origin, Origin::Remote);
    }

    #[test]
    fn resolve_unknown_id_is_noop() {
        let (mut conflicts, quotes, _) = merged_set();

        assert!(conflicts
            .resolve(&QuoteId::Remote(42), Choice::Local, quotes.clone(), 1)
            .is_none());
        assert_eq!(conflicts.pending().len(), 1);

        conflicts
            .resolve(&QuoteId::Remote(1), Choice::Local, quotes.clone(), 2)
            .unwrap();
        // Second click on the same conflict
        assert!(conflicts
            .resolve(&QuoteId::Remote(1), Choice::Remote, quotes, 3)
            .is_none());
    }

    #[test]
    fn resolve_reinserts_deleted_record() {
        let (mut conflicts, _, _) = merged_set();
        let other = Quote::new_local("Other", None, 5);

        let resolved = conflicts
            .resolve(&QuoteId::Remote(1), Choice::Local, vec![other.clone()], 6)
            .unwrap();
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].id, QuoteId::Remote(1));
        assert_eq!(resolved[1], other);
    }

    #[test]
    fn replace_discards_previous_conflicts() {
        let (mut conflicts, _, _) = merged_set();
        assert!(conflicts.contains(&QuoteId::Remote(1)));

        conflicts.replace(Vec::new());
        assert!(conflicts.is_empty());
    }

    #[test]
    fn resolution_is_not_remembered_across_passes() {
        let (mut conflicts, quotes, remote) = merged_set();
        let resolved = conflicts
            .resolve(&QuoteId::Remote(1), Choice::Local, quotes, 30)
            .unwrap();

        let next = merge(&resolved, &remote);
        assert_eq!(next.conflicts.len(), 1);
        assert_eq!(next.quotes[0].text, "B");
    }
}
