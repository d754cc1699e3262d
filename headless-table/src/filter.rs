//! Predicate filters with MUST/SHOULD chaining

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::model::Row;

/// How a filter combines with the others.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChainAs {
    #[default]
    Must,
    Should,
}

/// Row predicate of a filter.
pub type Operator<R> = Arc<dyn Fn(&Row<R>) -> bool + Send + Sync>;

/// A named row predicate.
///
/// # Example
///
/// ```
/// use headless_table::filter::{ChainAs, Filter};
/// use headless_table::model::{Record, RowData, Value};
///
/// let vip = Filter::<Record>::new(|row| row.data.field("vip") == Value::Bool(true))
///     .with_id("vip")
///     .with_column_id("vip");
/// let adult = Filter::<Record>::should(|row| {
///     row.data.field("age").to_f64().is_some_and(|age| age >= 18.0)
/// });
/// assert_eq!(adult.chain_as, Some(ChainAs::Should));
/// # let _ = vip;
/// ```
pub struct Filter<R> {
    /// Assigned a UUID v4 when added without one.
    pub id: Option<String>,
    /// Links the filter to a column for UIs. The engine doesn't read it.
    pub column_id: Option<String>,
    pub operator: Operator<R>,
    /// `None` means [`ChainAs::Must`].
    pub chain_as: Option<ChainAs>,
}

impl<R> Filter<R> {
    /// Creates a filter; it chains as MUST unless configured otherwise.
    pub fn new(operator: impl Fn(&Row<R>) -> bool + Send + Sync + 'static) -> Self {
        Self {
            id: None,
            column_id: None,
            operator: Arc::new(operator),
            chain_as: None,
        }
    }

    /// Creates a MUST filter.
    pub fn must(operator: impl Fn(&Row<R>) -> bool + Send + Sync + 'static) -> Self {
        Self::new(operator).with_chain_as(ChainAs::Must)
    }

    /// Creates a SHOULD filter.
    pub fn should(operator: impl Fn(&Row<R>) -> bool + Send + Sync + 'static) -> Self {
        Self::new(operator).with_chain_as(ChainAs::Should)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_column_id(mut self, column_id: impl Into<String>) -> Self {
        self.column_id = Some(column_id.into());
        self
    }

    pub fn with_chain_as(mut self, chain_as: ChainAs) -> Self {
        self.chain_as = Some(chain_as);
        self
    }

    /// The effective chaining.
    pub fn chaining(&self) -> ChainAs {
        self.chain_as.unwrap_or_default()
    }

    /// Evaluates the predicate.
    pub fn test(&self, row: &Row<R>) -> bool {
        (self.operator)(row)
    }
}

impl<R> Clone for Filter<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            column_id: self.column_id.clone(),
            operator: Arc::clone(&self.operator),
            chain_as: self.chain_as,
        }
    }
}

impl<R> fmt::Debug for Filter<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("id", &self.id)
            .field("column_id", &self.column_id)
            .field("chain_as", &self.chain_as)
            .finish_non_exhaustive()
    }
}

/// The filters of a table, in insertion order.
pub struct Filters<R> {
    filters: Vec<Filter<R>>,
}

impl<R> Default for Filters<R> {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
        }
    }
}

impl<R> Clone for Filters<R> {
    fn clone(&self) -> Self {
        Self {
            filters: self.filters.clone(),
        }
    }
}

impl<R> fmt::Debug for Filters<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.filters).finish()
    }
}

impl<R> Filters<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a filter, filling in a missing id and chaining. Returns the
    /// filter's id.
    pub fn add_filter(&mut self, mut filter: Filter<R>) -> String {
        let id = filter
            .id
            .take()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        filter.id = Some(id.clone());
        filter.chain_as = Some(filter.chaining());
        self.filters.push(filter);
        log::debug!("Added filter {id}");
        id
    }

    /// Replaces the first filter with the same id, keeping its position.
    /// Filters without an id or with an unknown id are ignored.
    pub fn update_filter(&mut self, mut filter: Filter<R>) -> bool {
        let Some(id) = filter.id.clone() else {
            return false;
        };
        let Some(slot) = self
            .filters
            .iter_mut()
            .find(|f| f.id.as_deref() == Some(id.as_str()))
        else {
            return false;
        };
        filter.chain_as = Some(filter.chaining());
        *slot = filter;
        log::debug!("Updated filter {id}");
        true
    }

    /// Removes every filter with the given id.
    pub fn remove_filter(&mut self, id: &str) -> bool {
        let before = self.filters.len();
        self.filters.retain(|f| f.id.as_deref() != Some(id));
        let removed = self.filters.len() != before;
        if removed {
            log::debug!("Removed filter {id}");
        }
        removed
    }

    pub fn clear(&mut self) {
        self.filters.clear();
    }

    pub fn filters(&self) -> &[Filter<R>] {
        &self.filters
    }

    pub fn filter(&self, id: &str) -> Option<&Filter<R>> {
        self.filters.iter().find(|f| f.id.as_deref() == Some(id))
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// `(no MUST filters OR all MUST pass) OR any SHOULD passes`.
    ///
    /// The rule is an inclusive OR: a passing SHOULD filter admits a row even
    /// when a MUST filter rejects it, and SHOULD filters can't narrow a
    /// result that the MUST filters already admit.
    pub fn matches(&self, row: &Row<R>) -> bool {
        let mut must = self
            .filters
            .iter()
            .filter(|f| f.chaining() == ChainAs::Must)
            .peekable();
        let must_pass = must.peek().is_none() || must.all(|f| f.test(row));

        must_pass
            || self
                .filters
                .iter()
                .filter(|f| f.chaining() == ChainAs::Should)
                .any(|f| f.test(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(n: i64) -> Row<i64> {
        Row::new(n.to_string(), n)
    }

    #[test]
    fn test_add_assigns_defaults() {
        let mut filters = Filters::new();
        let id = filters.add_filter(Filter::new(|r: &Row<i64>| *r.data > 0));
        assert!(Uuid::parse_str(&id).is_ok());
        assert_eq!(filters.filter(&id).unwrap().chain_as, Some(ChainAs::Must));

        let named = filters.add_filter(Filter::should(|_: &Row<i64>| true).with_id("x"));
        assert_eq!(named, "x");
        assert_eq!(filters.len(), 2);
    }

    #[test]
    fn test_update_in_place_and_unknown_ids() {
        let mut filters = Filters::new();
        filters.add_filter(Filter::new(|_: &Row<i64>| true).with_id("a"));
        filters.add_filter(Filter::new(|_: &Row<i64>| true).with_id("b"));

        assert!(filters.update_filter(Filter::new(|_: &Row<i64>| false).with_id("a")));
        assert_eq!(filters.filters()[0].id.as_deref(), Some("a"));
        assert!(!filters.filters()[0].test(&row(1)));

        assert!(!filters.update_filter(Filter::new(|_: &Row<i64>| false).with_id("zzz")));
        assert!(!filters.update_filter(Filter::new(|_: &Row<i64>| false)));
        assert!(!filters.remove_filter("zzz"));
        assert_eq!(filters.len(), 2);
    }

    #[test]
    fn test_no_filters_match_everything() {
        assert!(Filters::<i64>::new().matches(&row(1)));
    }

    #[test]
    fn test_must_filters_are_anded() {
        let mut filters = Filters::new();
        filters.add_filter(Filter::must(|r: &Row<i64>| *r.data > 0));
        filters.add_filter(Filter::must(|r: &Row<i64>| *r.data % 2 == 0));
        assert!(filters.matches(&row(2)));
        assert!(!filters.matches(&row(3)));
        assert!(!filters.matches(&row(-2)));
    }

    #[test]
    fn test_should_alone_never_rejects() {
        // With no MUST filters the first clause is already true.
        let mut filters = Filters::new();
        filters.add_filter(Filter::should(|_: &Row<i64>| false));
        assert!(filters.matches(&row(1)));
    }

    #[test]
    fn test_passing_should_overrides_failing_must() {
        let mut filters = Filters::new();
        filters.add_filter(Filter::must(|r: &Row<i64>| *r.data > 10));
        filters.add_filter(Filter::should(|r: &Row<i64>| *r.data == 3));
        assert!(filters.matches(&row(3)));
        assert!(filters.matches(&row(11)));
        assert!(!filters.matches(&row(4)));
    }
}
