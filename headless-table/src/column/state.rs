//! Normalized column state

use super::SortDirection;
use super::TableColumn;
use super::next_sorting_direction;

/// The normalized columns of a table.
///
/// Mutations address columns by id; unknown ids leave the state unchanged
/// and return `false`.
#[derive(Debug)]
pub struct Columns<R> {
    columns: Vec<TableColumn<R>>,
}

impl<R> Clone for Columns<R> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
        }
    }
}

impl<R> Default for Columns<R> {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
        }
    }
}

impl<R> Columns<R> {
    pub fn new(columns: Vec<TableColumn<R>>) -> Self {
        Self { columns }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == id)
    }

    fn update(&mut self, id: &str, f: impl FnOnce(&mut TableColumn<R>)) -> bool {
        match self.position(id) {
            Some(index) => {
                f(&mut self.columns[index]);
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    pub fn hide_column(&mut self, id: &str) -> bool {
        self.update(id, |c| c.hidden = true)
    }

    pub fn show_column(&mut self, id: &str) -> bool {
        self.update(id, |c| c.hidden = false)
    }

    pub fn toggle_column_visibility(&mut self, id: &str) -> bool {
        self.update(id, |c| c.hidden = !c.hidden)
    }

    // =========================================================================
    // Ordering
    // =========================================================================

    /// Exchanges the `order` values of two columns. Other columns keep
    /// theirs.
    pub fn swap_column_order(&mut self, id1: &str, id2: &str) -> bool {
        let (Some(a), Some(b)) = (self.position(id1), self.position(id2)) else {
            return false;
        };
        let order_a = self.columns[a].order;
        self.columns[a].order = self.columns[b].order;
        self.columns[b].order = order_a;
        true
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    /// Sorts by one column: sets its direction and clears every other
    /// column's.
    pub fn sort(&mut self, id: &str, direction: Option<SortDirection>) -> bool {
        let Some(target) = self.position(id) else {
            return false;
        };
        for (index, column) in self.columns.iter_mut().enumerate() {
            column.sorting_direction = if index == target { direction } else { None };
        }
        true
    }

    /// Advances a column through `None → Asc → Desc → None`, clearing every
    /// other column's direction.
    pub fn toggle_sort(&mut self, id: &str) -> bool {
        let Some(target) = self.position(id) else {
            return false;
        };
        let next = next_sorting_direction(self.columns[target].sorting_direction);
        self.sort(id, next)
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// All columns in declaration order.
    pub fn all_columns(&self) -> &[TableColumn<R>] {
        &self.columns
    }

    /// Columns not hidden, in declaration order.
    pub fn visible_columns(&self) -> Vec<&TableColumn<R>> {
        self.columns.iter().filter(|c| !c.hidden).collect()
    }

    /// Columns not hidden, sorted by `order` (stable for equal values).
    pub fn ordered_visible_columns(&self) -> Vec<&TableColumn<R>> {
        let mut visible = self.visible_columns();
        visible.sort_by_key(|c| c.order);
        visible
    }

    pub fn column(&self, id: &str) -> Option<&TableColumn<R>> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// The column currently sorted by, if any.
    pub fn sorted_column(&self) -> Option<&TableColumn<R>> {
        self.columns.iter().find(|c| c.sorting_direction.is_some())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TableColumn<R>> {
        self.columns.iter()
    }
}

impl<R> From<Vec<TableColumn<R>>> for Columns<R> {
    fn from(columns: Vec<TableColumn<R>>) -> Self {
        Self::new(columns)
    }
}
