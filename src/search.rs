use crate::error::SourceError;
use crate::model::RecipeSummary;
use crate::source::RecipeSource;
use log::debug;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one dispatched search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    pub term: String,
}

/// Tracks the latest dispatched search so late responses to older queries
/// can be discarded instead of overwriting newer results.
#[derive(Debug, Default)]
pub struct SearchSession {
    latest: AtomicU64,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new query; it supersedes every earlier ticket
    pub fn dispatch(&self, term: &str) -> SearchTicket {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        SearchTicket {
            seq,
            term: term.to_string(),
        }
    }

    pub fn is_current(&self, ticket: &SearchTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.seq
    }

    /// Pass `value` through only if `ticket` is still the latest query
    pub fn accept<T>(&self, ticket: &SearchTicket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            debug!(
                "Discarding stale response for '{}' (seq {})",
                ticket.term, ticket.seq
            );
            None
        }
    }

    /// Dispatch, await and filter a search in one call.
    ///
    /// Returns `Ok(None)` when a newer search was dispatched while this one
    /// was in flight, whatever its outcome.
    pub async fn search<R>(
        &self,
        source: &R,
        term: &str,
    ) -> Result<Option<Vec<RecipeSummary>>, SourceError>
    where
        R: RecipeSource + ?Sized,
    {
        let ticket = self.dispatch(term);
        let result = source.search_recipes(term).await;
        match self.accept(&ticket, result) {
            Some(result) => result.map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_ticket_supersedes() {
        let session = SearchSession::new();
        let first = session.dispatch("beef");
        let second = session.dispatch("chicken");

        assert_eq!(session.accept(&first, 1), None);
        assert_eq!(session.accept(&second, 2), Some(2));
        assert!(second.seq > first.seq);
    }
}
