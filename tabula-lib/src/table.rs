//! DataTable host: owns state slots and turns user intents into new states.

use std::fmt;
use std::ops::Range;

use log::debug;

use crate::column::{Column, Columns};
use crate::config::TableConfig;
use crate::error::TableError;
use crate::model::TableRow;
use crate::query::{
    Direction, FilterState, Page, PaginationState, SortState, filter_with, paginate, sort,
};
use crate::selection::{CheckState, Selection};

/// Change notification callback.
pub type ChangeFn<S> = Box<dyn Fn(&S) + Send + Sync>;

/// One piece of table state and who owns it.
///
/// An uncontrolled slot stores every new state it is given. A controlled slot
/// only reports new states through its callback; its value changes when the
/// owner pushes a state back with one of the `DataTable::set_*` methods.
struct Slot<S> {
    value: S,
    controlled: bool,
    on_change: Option<ChangeFn<S>>,
}

impl<S: PartialEq> Slot<S> {
    fn new(value: S) -> Self {
        Self {
            value,
            controlled: false,
            on_change: None,
        }
    }

    /// Propose a new state. Returns true if it differed from the current one.
    fn commit(&mut self, next: S) -> bool {
        if next == self.value {
            return false;
        }
        if let Some(on_change) = &self.on_change {
            on_change(&next);
        }
        if !self.controlled {
            self.value = next;
        }
        true
    }
}

impl<S: fmt::Debug> fmt::Debug for Slot<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("value", &self.value)
            .field("controlled", &self.controlled)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

/// A data table: rows, columns and the sort/filter/pagination/selection state
/// that drives which rows are shown.
///
/// Every state can be left to the table (uncontrolled) or owned by the caller
/// (controlled). Either way, intents such as [`DataTable::activate_header`]
/// notify the matching `on_*_change` callback with the proposed state.
///
/// # Example
///
/// ```
/// use tabula_lib::model::Record;
/// use tabula_lib::{Column, DataTable};
///
/// let rows = vec![
///     Record::new("1").set("name", "Bob"),
///     Record::new("2").set("name", "Amy"),
///     Record::new("3").set("name", "Cid"),
/// ];
/// let mut table = DataTable::new(vec![Column::new("name", "Name")], rows).unwrap();
///
/// table.activate_header("name");
/// let view = table.view();
/// let keys: Vec<&str> = view.rows().iter().map(|r| r.key()).collect();
/// assert_eq!(keys, vec!["2", "1", "3"]);
/// assert_eq!(view.footer(), "Showing 1 to 3 of 3");
/// ```
#[derive(Debug)]
pub struct DataTable<T: TableRow> {
    rows: Vec<T>,
    columns: Columns<T>,
    config: TableConfig,
    sort: Slot<Option<SortState>>,
    filter: Slot<FilterState>,
    pagination: Slot<PaginationState>,
    selection: Slot<Selection<T::Key>>,
}

impl<T: TableRow> DataTable<T> {
    /// Create a table with the default config.
    pub fn new(columns: Vec<Column<T>>, rows: Vec<T>) -> Result<Self, TableError> {
        Self::with_config(columns, rows, TableConfig::default())
    }

    /// Create a table with a config.
    pub fn with_config(
        columns: Vec<Column<T>>,
        rows: Vec<T>,
        config: TableConfig,
    ) -> Result<Self, TableError> {
        config.validate()?;
        let columns = Columns::new(columns)?;
        let pagination = config.initial_pagination()?;
        let selection = Selection::new(config.selection_mode);

        Ok(Self {
            rows,
            columns,
            sort: Slot::new(None),
            filter: Slot::new(FilterState::default()),
            pagination: Slot::new(pagination),
            selection: Slot::new(selection),
            config,
        })
    }

    // -------------------------------------------------------------------------
    // Ownership and callbacks
    // -------------------------------------------------------------------------

    /// Take ownership of the sort state, seeded with `state`.
    pub fn control_sort(mut self, state: Option<SortState>) -> Self {
        self.sort.value = state;
        self.sort.controlled = true;
        self
    }

    /// Take ownership of the filter state, seeded with `state`.
    pub fn control_filter(mut self, state: FilterState) -> Self {
        self.filter.value = state;
        self.filter.controlled = true;
        self
    }

    /// Take ownership of the pagination state, seeded with `state`.
    pub fn control_pagination(mut self, state: PaginationState) -> Self {
        self.pagination.value = state;
        self.pagination.controlled = true;
        self
    }

    /// Take ownership of the selection, seeded with `selection`.
    pub fn control_selection(mut self, selection: Selection<T::Key>) -> Self {
        self.selection.value = selection;
        self.selection.controlled = true;
        self
    }

    /// Seed the uncontrolled sort state.
    pub fn default_sort(mut self, state: Option<SortState>) -> Self {
        self.sort.value = state;
        self
    }

    /// Seed the uncontrolled filter state.
    pub fn default_filter(mut self, state: FilterState) -> Self {
        self.filter.value = state;
        self
    }

    /// Seed the uncontrolled pagination state.
    pub fn default_pagination(mut self, state: PaginationState) -> Self {
        self.pagination.value = state;
        self
    }

    /// Called with every proposed sort state.
    pub fn on_sort_change(mut self, f: impl Fn(&Option<SortState>) + Send + Sync + 'static) -> Self {
        self.sort.on_change = Some(Box::new(f));
        self
    }

    /// Called with every proposed filter state.
    pub fn on_filter_change(mut self, f: impl Fn(&FilterState) + Send + Sync + 'static) -> Self {
        self.filter.on_change = Some(Box::new(f));
        self
    }

    /// Called with every proposed pagination state.
    pub fn on_pagination_change(
        mut self,
        f: impl Fn(&PaginationState) + Send + Sync + 'static,
    ) -> Self {
        self.pagination.on_change = Some(Box::new(f));
        self
    }

    /// Called with every proposed selection.
    pub fn on_selection_change(
        mut self,
        f: impl Fn(&Selection<T::Key>) + Send + Sync + 'static,
    ) -> Self {
        self.selection.on_change = Some(Box::new(f));
        self
    }

    // -------------------------------------------------------------------------
    // State pushed by the owner
    // -------------------------------------------------------------------------

    /// Replace the sort state without notifying.
    pub fn set_sort(&mut self, state: Option<SortState>) {
        self.sort.value = state;
    }

    /// Replace the filter state without notifying.
    pub fn set_filter(&mut self, state: FilterState) {
        self.filter.value = state;
    }

    /// Replace the pagination state without notifying.
    pub fn set_pagination(&mut self, state: PaginationState) {
        self.pagination.value = state;
    }

    /// Replace the selection without notifying.
    pub fn set_selection(&mut self, selection: Selection<T::Key>) {
        self.selection.value = selection;
    }

    /// Replace the rows.
    ///
    /// Selected keys that no longer exist are dropped and the page is clamped
    /// into range; both changes are reported like any other intent.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;

        let mut selection = self.selection.value.clone();
        if selection.retain(&self.rows) {
            self.selection.commit(selection);
        }

        let clamped = self.pagination.value.clamped(self.filtered_len());
        self.pagination.commit(clamped);
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Get all rows, unfiltered.
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Get the columns.
    pub fn columns(&self) -> &Columns<T> {
        &self.columns
    }

    /// Get the config.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Get the current sort state.
    pub fn sort(&self) -> Option<&SortState> {
        self.sort.value.as_ref()
    }

    /// Get the current filter state.
    pub fn filter(&self) -> &FilterState {
        &self.filter.value
    }

    /// Get the current pagination state (not clamped).
    pub fn pagination(&self) -> PaginationState {
        self.pagination.value
    }

    /// Get the current selection.
    pub fn selection(&self) -> &Selection<T::Key> {
        &self.selection.value
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Activate a column header: cycle asc -> desc -> unsorted.
    ///
    /// Unknown or unsortable columns leave the sort state untouched and
    /// return false.
    pub fn activate_header(&mut self, column_id: &str) -> bool {
        match self.columns.get(column_id) {
            Some(column) if column.sortable => {}
            Some(_) => {
                debug!("Header '{}' is not sortable", column_id);
                return false;
            }
            None => {
                debug!("Header '{}' not found", column_id);
                return false;
            }
        }

        let next = SortState::cycle(self.sort.value.as_ref(), column_id);
        debug!("Sort changed: {:?}", next);
        self.sort.commit(next)
    }

    /// Clear the sort.
    pub fn clear_sort(&mut self) -> bool {
        self.sort.commit(None)
    }

    // -------------------------------------------------------------------------
    // Filtering
    // -------------------------------------------------------------------------

    /// Set the global query. Resets to the first page.
    pub fn set_global_filter(&mut self, query: impl Into<String>) -> bool {
        let mut next = self.filter.value.clone();
        next.global = query.into();
        self.commit_filter(next)
    }

    /// Set or clear one column filter. Resets to the first page.
    pub fn set_column_filter(&mut self, column_id: &str, value: impl Into<String>) -> bool {
        let mut next = self.filter.value.clone();
        next.set_column(column_id, value);
        self.commit_filter(next)
    }

    /// Clear every filter. Resets to the first page.
    pub fn clear_filters(&mut self) -> bool {
        self.commit_filter(FilterState::default())
    }

    fn commit_filter(&mut self, next: FilterState) -> bool {
        if !self.filter.commit(next) {
            return false;
        }
        debug!("Filter changed, returning to first page");
        let first = self.pagination.value.first();
        self.pagination.commit(first);
        true
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// The stored pagination clamped to the filtered rows; the page `view()` shows.
    fn shown_pagination(&self) -> PaginationState {
        self.pagination.value.clamped(self.filtered_len())
    }

    /// Go to a zero-indexed page, clamped into range.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        let next = self.shown_pagination().go_to(page, self.filtered_len());
        self.pagination.commit(next)
    }

    /// Go to the next page.
    pub fn next_page(&mut self) -> bool {
        let next = self.shown_pagination().next(self.filtered_len());
        self.pagination.commit(next)
    }

    /// Go to the previous page.
    pub fn prev_page(&mut self) -> bool {
        let next = self.shown_pagination().prev(self.filtered_len());
        self.pagination.commit(next)
    }

    /// Go to the first page.
    pub fn first_page(&mut self) -> bool {
        let next = self.pagination.value.first();
        self.pagination.commit(next)
    }

    /// Go to the last page.
    pub fn last_page(&mut self) -> bool {
        let next = self.pagination.value.last(self.filtered_len());
        self.pagination.commit(next)
    }

    /// Change the page size and return to the first page.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<bool, TableError> {
        let next = self.pagination.value.with_page_size(page_size)?;
        debug!("Page size changed to {}", page_size);
        Ok(self.pagination.commit(next))
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Toggle one row by key.
    pub fn toggle_row(&mut self, key: T::Key) -> bool {
        let mut next = self.selection.value.clone();
        next.toggle(key) && self.selection.commit(next)
    }

    /// Select every row that passes the current filters.
    pub fn select_all(&mut self) -> bool {
        let mut next = self.selection.value.clone();
        let visible = filter_with(
            &self.rows,
            self.columns.as_slice(),
            &self.filter.value,
            self.config.global_match,
        );
        next.select_all(visible) && self.selection.commit(next)
    }

    /// Clear the selection.
    pub fn deselect_all(&mut self) -> bool {
        let mut next = self.selection.value.clone();
        next.deselect_all() && self.selection.commit(next)
    }

    /// Check if a row is selected.
    pub fn is_selected(&self, key: &T::Key) -> bool {
        self.selection.value.is_selected(key)
    }

    // -------------------------------------------------------------------------
    // Pipeline
    // -------------------------------------------------------------------------

    /// Rows passing the current filters, in sorted order.
    pub fn filtered_rows(&self) -> Vec<&T> {
        let kept = filter_with(
            &self.rows,
            self.columns.as_slice(),
            &self.filter.value,
            self.config.global_match,
        );
        sort(kept, self.columns.as_slice(), self.sort.value.as_ref())
    }

    /// Number of rows passing the current filters.
    pub fn filtered_len(&self) -> usize {
        filter_with(
            &self.rows,
            self.columns.as_slice(),
            &self.filter.value,
            self.config.global_match,
        )
        .len()
    }

    /// Run filter -> sort -> paginate and describe what to show.
    pub fn view(&self) -> TableView<'_, T> {
        let sorted = self.filtered_rows();
        let check = self.selection.value.check_state(sorted.iter().copied());
        let page = paginate(sorted, self.pagination.value);

        TableView {
            page_window: page.page_window(self.config.page_window),
            page,
            sort: self.sort.value.as_ref(),
            selection: &self.selection.value,
            check,
        }
    }
}

/// The rendered state of a [`DataTable`] for one set of inputs.
#[derive(Debug)]
pub struct TableView<'a, T: TableRow> {
    page: Page<&'a T>,
    page_window: Range<usize>,
    sort: Option<&'a SortState>,
    selection: &'a Selection<T::Key>,
    check: CheckState,
}

impl<'a, T: TableRow> TableView<'a, T> {
    /// Rows on the visible page.
    pub fn rows(&self) -> &[&'a T] {
        self.page.rows()
    }

    /// The visible page with its navigation metadata.
    pub fn page(&self) -> &Page<&'a T> {
        &self.page
    }

    /// Number of rows passing the filters.
    pub fn filtered_len(&self) -> usize {
        self.page.total()
    }

    /// Numbered page buttons to show.
    pub fn page_window(&self) -> Range<usize> {
        self.page_window.clone()
    }

    /// Sort indicator for a column header.
    pub fn sort_direction(&self, column_id: &str) -> Option<Direction> {
        self.sort
            .filter(|s| s.column_id == column_id)
            .map(|s| s.direction)
    }

    /// Header checkbox state, relative to the filtered rows.
    pub fn check_state(&self) -> CheckState {
        self.check
    }

    /// Check if a row is selected.
    pub fn is_selected(&self, row: &T) -> bool {
        self.selection.is_selected(&row.key())
    }

    /// "Showing X to Y of Z".
    pub fn footer(&self) -> String {
        format!(
            "Showing {} to {} of {}",
            self.page.range_start(),
            self.page.range_end(),
            self.page.total()
        )
    }
}
