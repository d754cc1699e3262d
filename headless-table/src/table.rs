//! Table orchestrator
//!
//! [`Table`] owns every piece of table state and derives the row projection
//! on demand:
//!
//! ```text
//! raw rows -> ids -> selected overlay -> search -> filters -> sort -> page
//! ```
//!
//! Nothing is cached between reads; [`Table::rows`] and [`Table::page`]
//! recompute from the current state every time.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use crate::column::Column;
use crate::column::Columns;
use crate::column::SortDirection;
use crate::column::TableColumn;
use crate::column::normalize_columns;
use crate::deferred::CommitPolicy;
use crate::filter::Filter;
use crate::filter::Filters;
use crate::model::IdFn;
use crate::model::Row;
use crate::model::RowData;
use crate::model::assign_ids;
use crate::options::DetailsPanelType;
use crate::options::Options;
use crate::pagination::PageNumber;
use crate::pagination::Pagination;
use crate::search;
use crate::search::SearchQuery;
use crate::selection::MaybeRowId;
use crate::selection::Selection;
use crate::sort::sort_rows;
use crate::state::State;

/// A [`Table`] shared between a host and its views. Every mutation through
/// [`State::update`] marks the handle dirty.
pub type TableHandle<R> = State<Table<R>>;

/// Assigns ids to `raw_rows` and applies search, filters and sorting, in
/// that order.
///
/// Ids are freshly generated on every call; [`Table`] keeps them stable
/// across projections instead.
pub fn project_rows<R>(
    raw_rows: &[Arc<R>],
    columns: &Columns<R>,
    search_query: &str,
    filters: &Filters<R>,
    id_fn: &IdFn<R>,
) -> Vec<Row<R>> {
    derive(assign_ids(raw_rows, id_fn), columns, search_query, filters)
}

fn derive<R>(
    rows: impl IntoIterator<Item = Row<R>>,
    columns: &Columns<R>,
    search_query: &str,
    filters: &Filters<R>,
) -> Vec<Row<R>> {
    let mut rows: Vec<Row<R>> = rows
        .into_iter()
        .filter(|row| search::matches(row, search_query, columns.iter()))
        .filter(|row| filters.matches(row))
        .collect();
    sort_rows(&mut rows, columns);
    rows
}

// =============================================================================
// Details panel
// =============================================================================

/// Rows whose details panel is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailsPanel {
    panel_type: DetailsPanelType,
    open: HashSet<String>,
}

impl DetailsPanel {
    pub fn new(panel_type: DetailsPanelType) -> Self {
        Self {
            panel_type,
            open: HashSet::new(),
        }
    }

    pub fn panel_type(&self) -> DetailsPanelType {
        self.panel_type
    }

    /// Switching to [`DetailsPanelType::Single`] closes every panel.
    pub fn set_panel_type(&mut self, panel_type: DetailsPanelType) {
        if panel_type == DetailsPanelType::Single && self.panel_type != panel_type {
            self.open.clear();
        }
        self.panel_type = panel_type;
    }

    /// Opens the panel of `id`. In single mode any other panel closes.
    pub fn open(&mut self, id: &str) -> bool {
        if self.open.contains(id) {
            return false;
        }
        if self.panel_type == DetailsPanelType::Single {
            self.open.clear();
        }
        self.open.insert(id.to_string())
    }

    pub fn close(&mut self, id: &str) -> bool {
        self.open.remove(id)
    }

    /// Returns whether the panel is open afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if !self.close(id) {
            self.open(id);
        }
        self.is_open(id)
    }

    pub fn close_all(&mut self) {
        self.open.clear();
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.open.contains(id)
    }

    pub fn open_ids(&self) -> &HashSet<String> {
        &self.open
    }
}

// =============================================================================
// Page view
// =============================================================================

/// Snapshot of the current page.
#[derive(Debug, Clone)]
pub struct PageView<R> {
    pub page_rows: Vec<Row<R>>,
    pub current_page: usize,
    pub page_count: usize,
    pub page_size: usize,
    /// Number of rows in the whole projection, not just this page.
    pub all_rows_count: usize,
}

// =============================================================================
// Table
// =============================================================================

/// In-memory table state.
///
/// # Example
///
/// ```
/// use headless_table::column::{Column, SortDirection};
/// use headless_table::filter::Filter;
/// use headless_table::model::{Record, Row, RowData, Value};
/// use headless_table::{Options, Table};
///
/// let mut table = Table::new(
///     Options::default(),
///     vec![
///         Column::string("name"),
///         Column::number("age").with_sorting(SortDirection::Desc),
///     ],
///     vec![
///         Record::new().set("name", "ada").set("age", 36),
///         Record::new().set("name", "alan").set("age", 41),
///         Record::new().set("name", "grace").set("age", 85),
///     ],
/// );
///
/// table.add_filter(Filter::new(|row: &Row<Record>| {
///     row.data.field("age").to_f64() < Some(50.0)
/// }));
/// table.set_search_query("a");
///
/// let names: Vec<Value> = table.rows().iter().map(|row| row.data.field("name")).collect();
/// assert_eq!(names, [Value::from("alan"), Value::from("ada")]);
/// ```
pub struct Table<R> {
    options: Options<R>,
    raw_columns: Vec<Column<R>>,
    columns: Columns<R>,
    raw_rows: Vec<Arc<R>>,
    rows: Vec<Row<R>>,
    search: SearchQuery,
    filters: Filters<R>,
    selection: Selection,
    pagination: Pagination,
    details: DetailsPanel,
}

impl<R> Clone for Table<R> {
    fn clone(&self) -> Self {
        Self {
            options: self.options.clone(),
            raw_columns: self.raw_columns.clone(),
            columns: self.columns.clone(),
            raw_rows: self.raw_rows.clone(),
            rows: self.rows.clone(),
            search: self.search.clone(),
            filters: self.filters.clone(),
            selection: self.selection.clone(),
            pagination: self.pagination,
            details: self.details.clone(),
        }
    }
}

impl<R: std::fmt::Debug> std::fmt::Debug for Table<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("options", &self.options)
            .field("columns", &self.columns)
            .field("rows", &self.rows.len())
            .field("search", &self.search)
            .field("filters", &self.filters)
            .field("selection", &self.selection)
            .field("pagination", &self.pagination)
            .field("details", &self.details)
            .finish()
    }
}

impl<R: RowData + 'static> Table<R> {
    /// Creates a table, normalizing `columns` and assigning row ids.
    pub fn new(
        options: Options<R>,
        columns: Vec<Column<R>>,
        rows: impl IntoIterator<Item = R>,
    ) -> Self {
        let pagination = Pagination::new(
            options.pagination.current_page,
            options.pagination.page_size,
        );
        let details = DetailsPanel::new(options.rows.details_panel_type);
        let mut table = Self {
            options,
            raw_columns: Vec::new(),
            columns: Columns::default(),
            raw_rows: Vec::new(),
            rows: Vec::new(),
            search: SearchQuery::default(),
            filters: Filters::new(),
            selection: Selection::new(),
            pagination,
            details,
        };
        table.set_columns(columns);
        table.set_rows(rows);
        table
    }

    /// Sets the initial search query.
    pub fn with_search_query(mut self, query: impl Into<String>) -> Self {
        self.search.set(query);
        self.search.flush();
        self
    }

    /// Adds initial filters.
    pub fn with_filters(mut self, filters: impl IntoIterator<Item = Filter<R>>) -> Self {
        for filter in filters {
            self.filters.add_filter(filter);
        }
        self
    }

    /// Sets when typed search input reaches the projection.
    pub fn with_search_policy(mut self, policy: CommitPolicy) -> Self {
        self.search.set_policy(policy);
        self
    }

    /// Wraps the table in a shared handle.
    pub fn into_handle(self) -> TableHandle<R> {
        State::new(self)
    }

    pub fn options(&self) -> &Options<R> {
        &self.options
    }

    /// Replaces the options. Columns are re-normalized. Row ids are only
    /// regenerated when the id generator changes; selection and pagination
    /// keep their state.
    pub fn set_options(&mut self, options: Options<R>) {
        let same_ids = self.options.rows.same_id_fn(&options.rows);
        self.details.set_panel_type(options.rows.details_panel_type);
        self.options = options;
        self.normalize();
        if !same_ids {
            self.assign_row_ids();
        }
        log::debug!("Options replaced");
    }

    // =========================================================================
    // Columns
    // =========================================================================

    /// Replaces the columns. Visibility, order and sorting are reset to what
    /// the new columns declare.
    pub fn set_columns(&mut self, columns: Vec<Column<R>>) {
        self.raw_columns = columns;
        self.normalize();
    }

    fn normalize(&mut self) {
        self.columns = normalize_columns(&self.raw_columns, &self.options.internationalization).into();
    }

    pub fn columns(&self) -> &Columns<R> {
        &self.columns
    }

    pub fn column(&self, id: &str) -> Option<&TableColumn<R>> {
        self.columns.column(id)
    }

    pub fn visible_columns(&self) -> Vec<&TableColumn<R>> {
        self.columns.ordered_visible_columns()
    }

    pub fn hide_column(&mut self, id: &str) -> bool {
        self.columns.hide_column(id)
    }

    pub fn show_column(&mut self, id: &str) -> bool {
        self.columns.show_column(id)
    }

    pub fn toggle_column_visibility(&mut self, id: &str) -> bool {
        self.columns.toggle_column_visibility(id)
    }

    pub fn swap_column_order(&mut self, id1: &str, id2: &str) -> bool {
        self.columns.swap_column_order(id1, id2)
    }

    /// Sorts by column `id`, or clears sorting with `None`. Other columns
    /// lose their direction.
    pub fn sort(&mut self, id: &str, direction: Option<SortDirection>) -> bool {
        self.columns.sort(id, direction)
    }

    pub fn toggle_sort(&mut self, id: &str) -> bool {
        self.columns.toggle_sort(id)
    }

    // =========================================================================
    // Rows
    // =========================================================================

    /// Replaces the row data and generates new ids.
    pub fn set_rows(&mut self, rows: impl IntoIterator<Item = R>) {
        self.raw_rows = rows.into_iter().map(Arc::new).collect();
        self.assign_row_ids();
    }

    /// Derives row ids and drops selected ids that no longer name a row.
    fn assign_row_ids(&mut self) {
        self.rows = assign_ids(&self.raw_rows, &self.options.rows.id_fn());
        let dropped = self
            .selection
            .retain_known(self.rows.iter().map(|row| row.id.as_str()));
        if !dropped.is_empty() {
            log::debug!("Deselected {} rows that no longer exist", dropped.len());
        }
        log::debug!("Derived {} rows", self.rows.len());
    }

    /// Replaces the row data only if it differs from the current data, so
    /// ids stay stable when equal rows are supplied again. Returns `true` if
    /// the rows were re-derived.
    pub fn update_rows(&mut self, rows: Vec<R>) -> bool
    where
        R: PartialEq,
    {
        let unchanged = rows.len() == self.raw_rows.len()
            && rows.iter().zip(&self.raw_rows).all(|(new, old)| new == &**old);
        if unchanged {
            log::trace!("Rows unchanged, keeping ids");
            return false;
        }
        self.set_rows(rows);
        true
    }

    /// The rows with ids, in input order, before search and filters.
    pub fn rows_with_ids(&self) -> &[Row<R>] {
        &self.rows
    }

    /// The projection: selection applied, then search, filters and sorting.
    pub fn rows(&self) -> Vec<Row<R>> {
        let annotated = self.rows.iter().map(|row| {
            let mut row = row.clone();
            row.selected = self.selection.is_selected(&row.id);
            row
        });
        let rows = derive(
            annotated,
            &self.columns,
            self.search.deferred_query(),
            &self.filters,
        );
        log::trace!("Projected {} of {} rows", rows.len(), self.rows.len());
        rows
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Sets the search query. Returns `true` if the applied query changed.
    pub fn set_search_query(&mut self, query: impl Into<String>) -> bool {
        let changed = self.search.set(query);
        log::debug!("Search query set to {:?}", self.search.query());
        changed
    }

    /// The latest input.
    pub fn search_query(&self) -> &str {
        self.search.query()
    }

    /// The query the projection uses.
    pub fn deferred_search_query(&self) -> &str {
        self.search.deferred_query()
    }

    /// Applies pending search input.
    pub fn flush(&mut self) -> bool {
        self.search.flush()
    }

    /// Applies pending search input whose debounce period has elapsed.
    pub fn flush_due(&mut self, now: Instant) -> bool {
        self.search.flush_due(now)
    }

    pub fn search(&self) -> &SearchQuery {
        &self.search
    }

    pub fn search_mut(&mut self) -> &mut SearchQuery {
        &mut self.search
    }

    // =========================================================================
    // Filters
    // =========================================================================

    pub fn filters(&self) -> &Filters<R> {
        &self.filters
    }

    /// Returns the id of the added filter.
    pub fn add_filter(&mut self, filter: Filter<R>) -> String {
        self.filters.add_filter(filter)
    }

    pub fn update_filter(&mut self, filter: Filter<R>) -> bool {
        self.filters.update_filter(filter)
    }

    pub fn remove_filter(&mut self, id: &str) -> bool {
        self.filters.remove_filter(id)
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn select(&mut self, id: &str) -> bool {
        self.selection.select(id)
    }

    pub fn deselect(&mut self, id: &str) -> bool {
        self.selection.deselect(id)
    }

    pub fn select_multiple<I>(&mut self, ids: I) -> Vec<String>
    where
        I: IntoIterator,
        I::Item: MaybeRowId,
    {
        self.selection.select_multiple(ids)
    }

    pub fn deselect_multiple<I>(&mut self, ids: I) -> Vec<String>
    where
        I: IntoIterator,
        I::Item: MaybeRowId,
    {
        self.selection.deselect_multiple(ids)
    }

    /// Selects every row, including rows hidden by search or filters.
    pub fn select_all(&mut self) -> Vec<String> {
        let added = self.selection.select_all(self.rows.iter().map(|row| row.id.as_str()));
        log::debug!("Selected all {} rows", self.rows.len());
        added
    }

    pub fn deselect_all(&mut self) -> Vec<String> {
        self.selection.deselect_all()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.is_selected(id)
    }

    pub fn selected_row_ids(&self) -> &HashSet<String> {
        self.selection.selected_row_ids()
    }

    pub fn has_selected_rows(&self) -> bool {
        self.selection.has_selected_rows()
    }

    /// `true` if as many ids are selected as there are rows.
    pub fn all_selected(&self) -> bool {
        self.selection.all_selected(self.rows.len())
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    pub fn current_page(&self) -> usize {
        self.pagination.current_page()
    }

    pub fn page_size(&self) -> usize {
        self.pagination.page_size()
    }

    /// Pages in the current projection.
    pub fn page_count(&self) -> usize {
        self.pagination.page_count(self.all_rows_count())
    }

    /// Rows in the current projection.
    pub fn all_rows_count(&self) -> usize {
        self.rows().len()
    }

    /// The rows of the current page.
    pub fn page_rows(&self) -> Vec<Row<R>> {
        self.page().page_rows
    }

    pub fn page(&self) -> PageView<R> {
        let rows = self.rows();
        let all_rows_count = rows.len();
        PageView {
            page_rows: self.pagination.page_rows(&rows).to_vec(),
            current_page: self.pagination.current_page(),
            page_count: self.pagination.page_count(all_rows_count),
            page_size: self.pagination.page_size(),
            all_rows_count,
        }
    }

    pub fn set_page(&mut self, page: impl PageNumber) -> bool {
        let total = self.all_rows_count();
        self.pagination.set_page(page, total)
    }

    pub fn next_page(&mut self) -> bool {
        let total = self.all_rows_count();
        self.pagination.next_page(total)
    }

    pub fn previous_page(&mut self) -> bool {
        let total = self.all_rows_count();
        self.pagination.previous_page(total)
    }

    pub fn first_page(&mut self) -> bool {
        let total = self.all_rows_count();
        self.pagination.first_page(total)
    }

    pub fn last_page(&mut self) -> bool {
        let total = self.all_rows_count();
        self.pagination.last_page(total)
    }

    /// Sets the page size and clamps the current page to the new page count.
    pub fn set_page_size(&mut self, size: impl PageNumber) -> bool {
        let total = self.all_rows_count();
        let changed = self.pagination.set_page_size(size, total);
        log::debug!(
            "Page size {} (page {} of {})",
            self.pagination.page_size(),
            self.pagination.current_page(),
            self.pagination.page_count(total)
        );
        changed
    }

    // =========================================================================
    // Details panel
    // =========================================================================

    pub fn open_details(&mut self, id: &str) -> bool {
        self.details.open(id)
    }

    pub fn close_details(&mut self, id: &str) -> bool {
        self.details.close(id)
    }

    pub fn toggle_details(&mut self, id: &str) -> bool {
        self.details.toggle(id)
    }

    pub fn is_details_open(&self, id: &str) -> bool {
        self.details.is_open(id)
    }

    pub fn details(&self) -> &DetailsPanel {
        &self.details
    }
}
