//! Row selection state
//!
//! Selection is keyed by row id and independent of search, filters and
//! sorting: a selected row that is filtered out stays selected and shows up
//! selected again once it reappears.

use std::collections::HashSet;

/// Anything that may or may not name a row: ids, and `Option`s of ids.
/// `None` entries in batch operations are skipped.
pub trait MaybeRowId {
    fn row_id(&self) -> Option<&str>;
}

impl MaybeRowId for str {
    fn row_id(&self) -> Option<&str> {
        Some(self)
    }
}

impl MaybeRowId for String {
    fn row_id(&self) -> Option<&str> {
        Some(self)
    }
}

impl<T: MaybeRowId + ?Sized> MaybeRowId for &T {
    fn row_id(&self) -> Option<&str> {
        (**self).row_id()
    }
}

impl<T: MaybeRowId> MaybeRowId for Option<T> {
    fn row_id(&self) -> Option<&str> {
        self.as_ref().and_then(|id| id.row_id())
    }
}

/// Ids of the selected rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: HashSet<String>,
}

impl Selection {
    /// Nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects one row. Returns `true` if it wasn't selected before.
    pub fn select(&mut self, id: &str) -> bool {
        self.selected.insert(id.to_string())
    }

    /// Deselects one row. Returns `true` if it was selected.
    pub fn deselect(&mut self, id: &str) -> bool {
        self.selected.remove(id)
    }

    /// Selects several rows, skipping `None` entries. Returns the ids that
    /// were not selected before.
    pub fn select_multiple<I>(&mut self, ids: I) -> Vec<String>
    where
        I: IntoIterator,
        I::Item: MaybeRowId,
    {
        let mut added = Vec::new();
        for id in ids {
            if let Some(id) = id.row_id()
                && self.selected.insert(id.to_string())
            {
                added.push(id.to_string());
            }
        }
        added
    }

    /// Deselects several rows, skipping `None` entries. Returns the ids that
    /// were selected before.
    pub fn deselect_multiple<I>(&mut self, ids: I) -> Vec<String>
    where
        I: IntoIterator,
        I::Item: MaybeRowId,
    {
        let mut removed = Vec::new();
        for id in ids {
            if let Some(id) = id.row_id()
                && self.selected.remove(id)
            {
                removed.push(id.to_string());
            }
        }
        removed
    }

    /// Selects every id in `known_ids`, including rows hidden by search or
    /// filters.
    pub fn select_all<I>(&mut self, known_ids: I) -> Vec<String>
    where
        I: IntoIterator,
        I::Item: MaybeRowId,
    {
        self.select_multiple(known_ids)
    }

    /// Empties the selection, returning what it held.
    pub fn deselect_all(&mut self) -> Vec<String> {
        self.selected.drain().collect()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// `true` if at least one row is selected.
    pub fn has_selected_rows(&self) -> bool {
        !self.selected.is_empty()
    }

    /// `true` if the selection holds as many ids as there are known rows.
    pub fn all_selected(&self, known_count: usize) -> bool {
        self.selected.len() == known_count
    }

    /// The selected ids.
    pub fn selected_row_ids(&self) -> &HashSet<String> {
        &self.selected
    }

    /// The selected ids in ascending order.
    pub fn sorted_ids(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Drops ids that are no longer known. Returns the dropped ids.
    pub fn retain_known<'a>(&mut self, known_ids: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let known: HashSet<&str> = known_ids.into_iter().collect();
        let stale: Vec<String> = self
            .selected
            .iter()
            .filter(|id| !known.contains(id.as_str()))
            .cloned()
            .collect();
        for id in &stale {
            self.selected.remove(id);
        }
        stale
    }
}
