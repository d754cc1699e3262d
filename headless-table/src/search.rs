//! Free-text search

use std::time::Instant;

use crate::column::TableColumn;
use crate::deferred::CommitPolicy;
use crate::deferred::Deferred;
use crate::model::Row;

/// `true` if `query` is empty or any searchable column's search function
/// accepts the row.
pub fn matches<'a, R: 'a>(
    row: &Row<R>,
    query: &str,
    columns: impl IntoIterator<Item = &'a TableColumn<R>>,
) -> bool {
    query.is_empty()
        || columns
            .into_iter()
            .any(|column| column.searchable && (column.search_fn)(query, row))
}

/// The search query as typed and as applied.
///
/// [`query`](Self::query) echoes input right away; the projection uses
/// [`deferred_query`](Self::deferred_query).
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    inner: Deferred<String>,
}

impl SearchQuery {
    pub fn new(policy: CommitPolicy) -> Self {
        Self {
            inner: Deferred::new(String::new(), policy),
        }
    }

    /// Sets the query. Returns `true` if the applied query changed.
    pub fn set(&mut self, query: impl Into<String>) -> bool {
        self.inner.set(query.into())
    }

    pub fn set_at(&mut self, query: impl Into<String>, now: Instant) -> bool {
        self.inner.set_at(query.into(), now)
    }

    /// The latest input.
    pub fn query(&self) -> &str {
        self.inner.immediate()
    }

    /// The query the projection applies.
    pub fn deferred_query(&self) -> &str {
        self.inner.committed()
    }

    pub fn flush(&mut self) -> bool {
        self.inner.flush()
    }

    pub fn flush_due(&mut self, now: Instant) -> bool {
        self.inner.flush_due(now)
    }

    pub fn is_pending(&self) -> bool {
        self.inner.is_pending()
    }

    pub fn policy(&self) -> CommitPolicy {
        self.inner.policy()
    }

    pub fn set_policy(&mut self, policy: CommitPolicy) {
        self.inner.set_policy(policy);
    }
}
