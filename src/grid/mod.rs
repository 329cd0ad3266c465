//! Generic data grid: column synthesis, selection, quick filter and confirmed
//! row actions over the row-model engine in [`model`].
//!
//! The synthesized column set is always `[select, ...caller columns, actions?]`.
//! The actions column exists only when a view, edit or delete handler was
//! supplied, and the set never changes after [`GridBuilder::build`].

pub mod column;
pub mod confirm;
pub mod model;
pub mod state;

use std::fmt;

use tracing::{debug, warn};

pub use column::{
    ACTIONS_COLUMN_ID, ActionSet, Column, ColumnDef, RowAction, SELECT_COLUMN_ID, SortKey,
};
pub use confirm::{ActionMenu, ConfirmDialog, GridOverlay, PendingAction};
pub use model::{DEFAULT_PAGE_SIZE, Pagination};
pub use state::{ColumnSort, GridState, HeaderCheck, SortDirection};

/// Trait for rows shown by a [`DataGrid`].
pub trait GridRow: Clone {
    /// Unique identifier, used as the selection key.
    fn id(&self) -> &str;
}

/// Error reported by a caller callback. The grid only logs it.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;
pub type HandlerResult = Result<(), HandlerError>;

type RowHandler<T> = Box<dyn FnMut(&T) -> HandlerResult + Send>;
type BulkHandler<T> = Box<dyn FnMut(Vec<T>) -> HandlerResult + Send>;

/// Error type for grid construction failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A caller column used `"select"` or `"actions"`.
    ReservedColumnId(String),
    /// Two caller columns share an id.
    DuplicateColumnId(String),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::ReservedColumnId(id) => write!(f, "column id '{}' is reserved", id),
            GridError::DuplicateColumnId(id) => write!(f, "column id '{}' is used twice", id),
        }
    }
}

impl std::error::Error for GridError {}

/// Explicit initial state instead of ambient defaults.
#[derive(Debug, Clone, Default)]
pub struct GridOptions {
    pub initial_sorting: Vec<ColumnSort>,
    /// Falls back to [`DEFAULT_PAGE_SIZE`].
    pub page_size: Option<usize>,
}

struct Handlers<T> {
    on_view: Option<RowHandler<T>>,
    on_edit: Option<RowHandler<T>>,
    on_delete: Option<RowHandler<T>>,
    on_delete_all: Option<BulkHandler<T>>,
}

impl<T> Handlers<T> {
    fn actions(&self) -> ActionSet {
        ActionSet {
            view: self.on_view.is_some(),
            edit: self.on_edit.is_some(),
            delete: self.on_delete.is_some(),
        }
    }
}

/// Construction contract of a [`DataGrid`].
pub struct GridBuilder<T> {
    columns: Vec<ColumnDef<T>>,
    rows: Vec<T>,
    search_target: Vec<String>,
    handlers: Handlers<T>,
    options: GridOptions,
}

impl<T: GridRow> GridBuilder<T> {
    /// Column ids used as quick-filter targets. The first one is read back.
    pub fn search_target<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_target = targets.into_iter().map(Into::into).collect();
        self
    }

    pub fn on_view(mut self, f: impl FnMut(&T) -> HandlerResult + Send + 'static) -> Self {
        self.handlers.on_view = Some(Box::new(f));
        self
    }

    pub fn on_edit(mut self, f: impl FnMut(&T) -> HandlerResult + Send + 'static) -> Self {
        self.handlers.on_edit = Some(Box::new(f));
        self
    }

    pub fn on_delete(mut self, f: impl FnMut(&T) -> HandlerResult + Send + 'static) -> Self {
        self.handlers.on_delete = Some(Box::new(f));
        self
    }

    pub fn on_delete_all(
        mut self,
        f: impl FnMut(Vec<T>) -> HandlerResult + Send + 'static,
    ) -> Self {
        self.handlers.on_delete_all = Some(Box::new(f));
        self
    }

    pub fn options(mut self, options: GridOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> Result<DataGrid<T>, GridError> {
        let mut seen = std::collections::HashSet::new();
        for def in &self.columns {
            if def.id() == SELECT_COLUMN_ID || def.id() == ACTIONS_COLUMN_ID {
                return Err(GridError::ReservedColumnId(def.id().to_string()));
            }
            if !seen.insert(def.id().to_string()) {
                return Err(GridError::DuplicateColumnId(def.id().to_string()));
            }
        }
        for target in &self.search_target {
            if !seen.contains(target) {
                warn!("search target '{}' does not name a column", target);
            }
        }

        let actions = self.handlers.actions();
        let mut columns = Vec::with_capacity(self.columns.len() + 2);
        columns.push(Column::Select);
        columns.extend(self.columns.into_iter().map(Column::Data));
        if actions.any() {
            columns.push(Column::Actions(actions));
        }

        let pagination = Pagination {
            page_index: 0,
            page_size: self
                .options
                .page_size
                .filter(|&n| n > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE),
        };

        debug!(
            columns = columns.len(),
            rows = self.rows.len(),
            "data grid constructed"
        );

        Ok(DataGrid {
            columns,
            rows: self.rows,
            search_target: self.search_target,
            handlers: self.handlers,
            state: GridState::with_sorting(self.options.initial_sorting),
            pagination,
            cursor: 0,
            overlay: GridOverlay::None,
        })
    }
}

/// Generic, paginated, selectable data grid.
pub struct DataGrid<T: GridRow> {
    columns: Vec<Column<T>>,
    rows: Vec<T>,
    search_target: Vec<String>,
    handlers: Handlers<T>,
    state: GridState,
    pagination: Pagination,
    /// Row cursor within the current page.
    cursor: usize,
    overlay: GridOverlay,
}

fn run_row_handler<T: GridRow>(
    handler: &mut Option<RowHandler<T>>,
    rows: &[T],
    row_id: &str,
    label: &str,
) {
    let Some(handler) = handler.as_mut() else {
        return;
    };
    let Some(row) = rows.iter().find(|r| r.id() == row_id) else {
        debug!(row_id, "row vanished before {} handler ran", label);
        return;
    };
    if let Err(e) = handler(row) {
        warn!(row_id, "{} handler failed: {}", label, e);
    }
}

impl<T: GridRow> DataGrid<T> {
    pub fn builder(columns: Vec<ColumnDef<T>>, rows: Vec<T>) -> GridBuilder<T> {
        GridBuilder {
            columns,
            rows,
            search_target: Vec::new(),
            handlers: Handlers {
                on_view: None,
                on_edit: None,
                on_delete: None,
                on_delete_all: None,
            },
            options: GridOptions::default(),
        }
    }

    // ---------------------------------------------------------------------
    // Columns
    // ---------------------------------------------------------------------

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn column(&self, id: &str) -> Option<&Column<T>> {
        self.columns.iter().find(|c| c.id() == id)
    }

    pub fn visible_columns(&self) -> Vec<&Column<T>> {
        self.columns
            .iter()
            .filter(|c| self.state.is_visible(c.id()))
            .collect()
    }

    /// Columns listed in the visibility menu.
    pub fn hideable_columns(&self) -> Vec<&Column<T>> {
        self.columns.iter().filter(|c| c.can_hide()).collect()
    }

    /// Data columns only, for cursor-driven sorting.
    pub fn data_columns(&self) -> Vec<&ColumnDef<T>> {
        self.columns.iter().filter_map(Column::as_data).collect()
    }

    pub fn actions(&self) -> Option<ActionSet> {
        self.columns.iter().find_map(|c| match c {
            Column::Actions(set) => Some(*set),
            _ => None,
        })
    }

    /// Hides or shows a column. Returns false for non-hideable columns.
    pub fn toggle_column_visibility(&mut self, column_id: &str) -> bool {
        if !self.column(column_id).is_some_and(Column::can_hide) {
            return false;
        }
        let visible = !self.state.is_visible(column_id);
        self.state.set_visible(column_id, visible);
        debug!(column_id, visible, "column visibility changed");
        true
    }

    // ---------------------------------------------------------------------
    // Rows and row models
    // ---------------------------------------------------------------------

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn state(&self) -> &GridState {
        &self.state
    }

    pub fn row_by_id(&self, row_id: &str) -> Option<&T> {
        self.rows.iter().find(|r| r.id() == row_id)
    }

    /// Replaces the row set. Selection entries for vanished ids are dropped.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
        let ids: std::collections::HashSet<&str> = self.rows.iter().map(GridRow::id).collect();
        self.state
            .row_selection
            .retain(|id, _| ids.contains(id.as_str()));
        self.pagination.page_index = 0;
        self.clamp_cursor();
    }

    pub fn filtered_rows(&self) -> Vec<&T> {
        model::filtered_indices(&self.rows, &self.columns, &self.state)
            .into_iter()
            .map(|i| &self.rows[i])
            .collect()
    }

    /// Sorted and paginated rows of the current page.
    pub fn page_rows(&self) -> Vec<&T> {
        let sorted = model::sorted_indices(&self.rows, &self.columns, &self.state);
        model::page_slice(&sorted, self.pagination)
            .iter()
            .map(|&i| &self.rows[i])
            .collect()
    }

    // ---------------------------------------------------------------------
    // Sorting and filtering
    // ---------------------------------------------------------------------

    /// Cycles the sort of a sortable column. Returns false otherwise.
    pub fn toggle_sorting(&mut self, column_id: &str, multi: bool) -> bool {
        if !self.column(column_id).is_some_and(Column::can_sort) {
            return false;
        }
        self.state.toggle_sorting(column_id, multi);
        debug!(column_id, multi, sorting = ?self.state.sorting, "sorting changed");
        self.reset_page();
        true
    }

    pub fn search_target(&self) -> &[String] {
        &self.search_target
    }

    /// Text shown in the quick filter: the first target's filter value.
    pub fn quick_filter_value(&self) -> &str {
        self.search_target
            .first()
            .and_then(|id| self.state.filter_value(id))
            .unwrap_or("")
    }

    /// Writes `text` to every search target. Inert without targets.
    pub fn set_quick_filter(&mut self, text: &str) {
        if self.search_target.is_empty() {
            return;
        }
        for id in &self.search_target {
            self.state.set_filter_value(id, text);
        }
        debug!(targets = ?self.search_target, text, "quick filter changed");
        self.reset_page();
    }

    pub fn set_column_filter(&mut self, column_id: &str, value: &str) {
        self.state.set_filter_value(column_id, value);
        self.reset_page();
    }

    // ---------------------------------------------------------------------
    // Selection
    // ---------------------------------------------------------------------

    pub fn is_row_selected(&self, row_id: &str) -> bool {
        self.state.is_selected(row_id)
    }

    /// Ids that are not in the current row set are ignored.
    pub fn toggle_row_selected(&mut self, row_id: &str) {
        if self.row_by_id(row_id).is_none() {
            debug!(row_id, "selection toggle for unknown row ignored");
            return;
        }
        let selected = !self.state.is_selected(row_id);
        self.state.set_selected(row_id, selected);
    }

    /// Header checkbox state, scoped to the current page.
    pub fn header_check(&self) -> HeaderCheck {
        let page = self.page_rows();
        let selected = page
            .iter()
            .filter(|r| self.state.is_selected(r.id()))
            .count();
        if !page.is_empty() && selected == page.len() {
            HeaderCheck::Checked
        } else if selected > 0 {
            HeaderCheck::Indeterminate
        } else {
            HeaderCheck::Unchecked
        }
    }

    /// Header checkbox toggle: deselects the page when it is fully
    /// selected, otherwise selects every row on it.
    pub fn toggle_page_selection(&mut self) {
        let select = self.header_check() != HeaderCheck::Checked;
        let ids: Vec<String> = self
            .page_rows()
            .iter()
            .map(|r| r.id().to_string())
            .collect();
        for id in &ids {
            self.state.set_selected(id, select);
        }
        debug!(rows = ids.len(), select, "page selection toggled");
    }

    /// Selected rows that pass the column filters, in row order.
    pub fn filtered_selected_rows(&self) -> Vec<&T> {
        self.filtered_rows()
            .into_iter()
            .filter(|r| self.state.is_selected(r.id()))
            .collect()
    }

    /// `"N of M row(s) selected."` over the filtered rows.
    pub fn selection_summary(&self) -> String {
        let filtered = self.filtered_rows();
        let selected = filtered
            .iter()
            .filter(|r| self.state.is_selected(r.id()))
            .count();
        format!("{} of {} row(s) selected.", selected, filtered.len())
    }

    /// Live count for the bulk-delete affordance, when it is shown.
    pub fn bulk_delete_count(&self) -> Option<usize> {
        self.handlers.on_delete_all.as_ref()?;
        let count = self.filtered_selected_rows().len();
        (count > 0).then_some(count)
    }

    // ---------------------------------------------------------------------
    // Pagination
    // ---------------------------------------------------------------------

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn page_count(&self) -> usize {
        model::page_count(self.filtered_rows().len(), self.pagination.page_size)
    }

    pub fn can_previous_page(&self) -> bool {
        self.pagination.page_index > 0
    }

    pub fn can_next_page(&self) -> bool {
        self.pagination.page_index + 1 < self.page_count()
    }

    pub fn previous_page(&mut self) {
        if self.can_previous_page() {
            self.pagination.page_index -= 1;
            self.clamp_cursor();
        }
    }

    pub fn next_page(&mut self) {
        if self.can_next_page() {
            self.pagination.page_index += 1;
            self.clamp_cursor();
        }
    }

    fn reset_page(&mut self) {
        self.pagination.page_index = 0;
        self.clamp_cursor();
    }

    // ---------------------------------------------------------------------
    // Cursor
    // ---------------------------------------------------------------------

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cursor_row(&self) -> Option<&T> {
        self.page_rows().get(self.cursor).copied()
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        self.cursor = self.cursor.saturating_add(1);
        self.clamp_cursor();
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = usize::MAX;
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        let len = self.page_rows().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Toggles selection of the row under the cursor.
    pub fn toggle_cursor_selected(&mut self) {
        if let Some(id) = self.cursor_row().map(|r| r.id().to_string()) {
            self.toggle_row_selected(&id);
        }
    }

    // ---------------------------------------------------------------------
    // Overlays: actions menu, column menu, confirmation
    // ---------------------------------------------------------------------

    pub fn overlay(&self) -> &GridOverlay {
        &self.overlay
    }

    /// Opens the actions menu for a row. No-op without an actions column.
    pub fn open_action_menu(&mut self, row_id: &str) -> bool {
        let Some(actions) = self.actions() else {
            return false;
        };
        if self.row_by_id(row_id).is_none() {
            return false;
        }
        self.overlay = GridOverlay::ActionMenu(ActionMenu::new(row_id, actions));
        true
    }

    pub fn open_cursor_action_menu(&mut self) -> bool {
        match self.cursor_row().map(|r| r.id().to_string()) {
            Some(id) => self.open_action_menu(&id),
            None => false,
        }
    }

    pub fn open_column_menu(&mut self) {
        self.overlay = GridOverlay::ColumnMenu { cursor: 0 };
    }

    pub fn menu_up(&mut self) {
        match &mut self.overlay {
            GridOverlay::ActionMenu(menu) => menu.up(),
            GridOverlay::ColumnMenu { cursor } => *cursor = cursor.saturating_sub(1),
            _ => {}
        }
    }

    pub fn menu_down(&mut self) {
        let hideable = self.hideable_columns().len();
        match &mut self.overlay {
            GridOverlay::ActionMenu(menu) => menu.down(),
            GridOverlay::ColumnMenu { cursor } => {
                if *cursor + 1 < hideable {
                    *cursor += 1;
                }
            }
            _ => {}
        }
    }

    /// Activates the highlighted item of the open menu.
    ///
    /// View and edit run their handler and close the menu. Delete keeps the
    /// menu open and stacks a confirmation dialog on top of it. In the column
    /// menu the highlighted column's visibility is toggled.
    pub fn activate_menu_item(&mut self) {
        match std::mem::take(&mut self.overlay) {
            GridOverlay::ActionMenu(menu) => match menu.current() {
                Some(RowAction::View) => {
                    run_row_handler(&mut self.handlers.on_view, &self.rows, &menu.row_id, "view");
                }
                Some(RowAction::Edit) => {
                    run_row_handler(&mut self.handlers.on_edit, &self.rows, &menu.row_id, "edit");
                }
                Some(RowAction::Delete) => {
                    self.overlay = GridOverlay::Confirm {
                        dialog: ConfirmDialog::delete_row(menu.row_id.clone()),
                        menu: Some(menu),
                    };
                }
                None => {}
            },
            GridOverlay::ColumnMenu { cursor } => {
                let id = self
                    .hideable_columns()
                    .get(cursor)
                    .map(|c| c.id().to_string());
                if let Some(id) = id {
                    self.toggle_column_visibility(&id);
                }
                self.overlay = GridOverlay::ColumnMenu { cursor };
            }
            other => self.overlay = other,
        }
    }

    /// Opens the bulk-delete confirmation. Returns false when the affordance
    /// is not shown (no bulk handler or nothing selected).
    pub fn request_bulk_delete(&mut self) -> bool {
        let Some(count) = self.bulk_delete_count() else {
            return false;
        };
        self.overlay = GridOverlay::Confirm {
            dialog: ConfirmDialog::delete_selected(count),
            menu: None,
        };
        true
    }

    /// Accepts the open confirmation dialog.
    pub fn confirm(&mut self) {
        match std::mem::take(&mut self.overlay) {
            GridOverlay::Confirm { dialog, .. } => match dialog.pending {
                PendingAction::DeleteRow { row_id } => {
                    run_row_handler(&mut self.handlers.on_delete, &self.rows, &row_id, "delete");
                }
                PendingAction::DeleteSelected { .. } => self.commit_bulk_delete(),
            },
            other => self.overlay = other,
        }
    }

    /// Runs the bulk handler and clears selection whatever the outcome.
    fn commit_bulk_delete(&mut self) {
        let rows: Vec<T> = self
            .filtered_selected_rows()
            .into_iter()
            .cloned()
            .collect();
        if let Some(handler) = self.handlers.on_delete_all.as_mut() {
            let count = rows.len();
            if let Err(e) = handler(rows) {
                warn!(count, "delete-all handler failed: {}", e);
            }
        }
        self.state.reset_row_selection();
    }

    /// Dismisses the topmost overlay without touching grid state. A
    /// confirmation opened from a row menu returns to that menu.
    pub fn cancel(&mut self) {
        self.overlay = match std::mem::take(&mut self.overlay) {
            GridOverlay::Confirm {
                menu: Some(menu), ..
            } => GridOverlay::ActionMenu(menu),
            _ => GridOverlay::None,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq)]
    struct Contact {
        id: String,
        name: String,
        email: String,
        phone: String,
    }

    impl GridRow for Contact {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn contact(id: &str, name: &str, email: &str, phone: &str) -> Contact {
        Contact {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
        }
    }

    fn columns() -> Vec<ColumnDef<Contact>> {
        vec![
            ColumnDef::new("name", |c: &Contact| c.name.clone()),
            ColumnDef::new("email", |c: &Contact| c.email.clone()),
            ColumnDef::new("phone", |c: &Contact| c.phone.clone()),
        ]
    }

    fn abc() -> Vec<Contact> {
        vec![
            contact("a", "Ann", "ann@example.com", "111"),
            contact("b", "Ben", "ben@example.com", "222"),
            contact("c", "Cid", "cid@example.org", "333"),
        ]
    }

    fn many(n: usize) -> Vec<Contact> {
        (0..n)
            .map(|i| {
                contact(
                    &format!("r{:02}", i),
                    &format!("name{:02}", i),
                    &format!("user{:02}@example.com", i),
                    &format!("555-{:04}", i),
                )
            })
            .collect()
    }

    fn ids(rows: &[&Contact]) -> Vec<String> {
        rows.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn column_count_depends_on_single_row_handlers() {
        let grid = DataGrid::builder(columns(), abc()).build().unwrap();
        assert_eq!(grid.columns().len(), 3 + 1);
        assert!(grid.actions().is_none());

        let grid = DataGrid::builder(columns(), abc())
            .on_delete_all(|_| Ok(()))
            .build()
            .unwrap();
        assert_eq!(grid.columns().len(), 3 + 1);

        let grid = DataGrid::builder(columns(), Vec::new())
            .on_edit(|_| Ok(()))
            .build()
            .unwrap();
        let ids: Vec<&str> = grid.columns().iter().map(Column::id).collect();
        assert_eq!(ids, vec!["select", "name", "email", "phone", "actions"]);
    }

    #[test]
    fn reserved_and_duplicate_ids_are_rejected() {
        let mut cols = columns();
        cols.push(ColumnDef::new("actions", |c: &Contact| c.id.clone()));
        assert_eq!(
            DataGrid::builder(cols, abc()).build().err(),
            Some(GridError::ReservedColumnId("actions".to_string()))
        );

        let mut cols = columns();
        cols.push(ColumnDef::new("email", |c: &Contact| c.id.clone()));
        assert!(matches!(
            DataGrid::builder(cols, abc()).build(),
            Err(GridError::DuplicateColumnId(_))
        ));
    }

    #[test]
    fn header_toggle_is_page_scoped() {
        let mut grid = DataGrid::builder(columns(), many(15)).build().unwrap();
        assert_eq!(grid.header_check(), HeaderCheck::Unchecked);

        grid.toggle_row_selected("r03");
        assert_eq!(grid.header_check(), HeaderCheck::Indeterminate);

        grid.toggle_page_selection();
        assert_eq!(grid.header_check(), HeaderCheck::Checked);
        assert_eq!(grid.state().selected_count(), 10);
        assert!(!grid.is_row_selected("r10"));

        grid.toggle_page_selection();
        assert_eq!(grid.header_check(), HeaderCheck::Unchecked);
        assert_eq!(grid.state().selected_count(), 0);
    }

    #[test]
    fn header_toggle_leaves_other_pages_alone() {
        let mut grid = DataGrid::builder(columns(), many(15)).build().unwrap();
        grid.toggle_row_selected("r12");
        grid.toggle_page_selection();
        grid.toggle_page_selection();
        assert!(grid.is_row_selected("r12"));
        assert_eq!(grid.state().selected_count(), 1);
    }

    #[test]
    fn selection_survives_sort_and_paging() {
        let mut grid = DataGrid::builder(columns(), many(15)).build().unwrap();
        grid.toggle_row_selected("r01");
        grid.toggle_row_selected("r14");

        grid.toggle_sorting("name", false);
        grid.toggle_sorting("name", false);
        assert_eq!(grid.page_rows()[0].id, "r14");

        grid.next_page();
        assert_eq!(grid.pagination().page_index, 1);
        grid.previous_page();

        assert!(grid.is_row_selected("r01"));
        assert!(grid.is_row_selected("r14"));
        assert_eq!(grid.state().selected_count(), 2);
    }

    #[test]
    fn quick_filter_fans_out_and_reads_first_target() {
        let mut grid = DataGrid::builder(columns(), abc())
            .search_target(["email", "phone"])
            .build()
            .unwrap();

        grid.set_quick_filter("ann");
        assert_eq!(grid.state().filter_value("email"), Some("ann"));
        assert_eq!(grid.state().filter_value("phone"), Some("ann"));
        assert_eq!(grid.quick_filter_value(), "ann");

        grid.set_column_filter("email", "ben");
        assert_eq!(grid.quick_filter_value(), "ben");
        grid.set_column_filter("email", "");
        assert_eq!(grid.quick_filter_value(), "");
        assert_eq!(grid.state().filter_value("phone"), Some("ann"));
    }

    #[test]
    fn quick_filter_without_targets_is_inert() {
        let mut grid = DataGrid::builder(columns(), abc()).build().unwrap();
        grid.set_quick_filter("ann");
        assert!(grid.state().column_filters.is_empty());
        assert_eq!(grid.quick_filter_value(), "");
        assert_eq!(grid.filtered_rows().len(), 3);
    }

    #[test]
    fn single_target_filters_rows() {
        let mut grid = DataGrid::builder(columns(), abc())
            .search_target(["email"])
            .build()
            .unwrap();
        grid.set_quick_filter(".org");
        assert_eq!(ids(&grid.filtered_rows()), vec!["c"]);
    }

    #[test]
    fn bulk_delete_skips_filtered_out_rows_and_clears_selection_on_failure() {
        let received: Arc<Mutex<Vec<String>>> = Arc::default();
        let sink = Arc::clone(&received);
        let mut grid = DataGrid::builder(columns(), abc())
            .search_target(["email"])
            .on_delete_all(move |rows| {
                sink.lock()
                    .unwrap()
                    .extend(rows.into_iter().map(|r| r.id));
                Err("backend unavailable".into())
            })
            .build()
            .unwrap();

        grid.toggle_row_selected("a");
        grid.toggle_row_selected("b");
        grid.toggle_row_selected("c");
        grid.set_quick_filter("example.com");
        assert_eq!(grid.bulk_delete_count(), Some(2));

        assert!(grid.request_bulk_delete());
        assert!(matches!(
            grid.overlay(),
            GridOverlay::Confirm { dialog, .. }
                if dialog.pending == (PendingAction::DeleteSelected { count: 2 })
        ));
        grid.confirm();

        assert_eq!(*received.lock().unwrap(), vec!["a", "b"]);
        assert_eq!(grid.state().selected_count(), 0);
        assert!(!grid.overlay().is_open());
    }

    #[test]
    fn unknown_row_ids_are_not_selectable() {
        let mut grid = DataGrid::builder(columns(), abc()).build().unwrap();
        grid.toggle_row_selected("ghost");
        assert_eq!(grid.state().selected_count(), 0);
        assert!(!grid.is_row_selected("ghost"));

        grid.toggle_row_selected("a");
        assert_eq!(grid.state().selected_count(), 1);
    }

    #[test]
    fn cancelled_bulk_delete_keeps_selection() {
        let calls = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&calls);
        let mut grid = DataGrid::builder(columns(), abc())
            .on_delete_all(move |_| {
                *counter.lock().unwrap() += 1;
                Ok(())
            })
            .build()
            .unwrap();
        grid.toggle_row_selected("b");
        assert!(grid.request_bulk_delete());
        grid.cancel();

        assert_eq!(*calls.lock().unwrap(), 0);
        assert!(grid.is_row_selected("b"));
        assert!(!grid.overlay().is_open());
    }

    #[test]
    fn without_handlers_bulk_delete_is_gated() {
        let mut grid = DataGrid::builder(columns(), abc())
            .search_target(["name"])
            .build()
            .unwrap();
        assert!(grid.actions().is_none());
        assert_eq!(grid.columns()[0].id(), SELECT_COLUMN_ID);

        grid.toggle_row_selected("a");
        grid.set_quick_filter("b");
        assert_eq!(ids(&grid.filtered_rows()), vec!["b"]);

        assert_eq!(grid.bulk_delete_count(), None);
        assert!(!grid.request_bulk_delete());
        assert!(!grid.overlay().is_open());
        assert!(grid.is_row_selected("a"));
    }

    #[test]
    fn view_closes_menu_and_receives_row() {
        let seen: Arc<Mutex<Option<Contact>>> = Arc::default();
        let sink = Arc::clone(&seen);
        let mut grid = DataGrid::builder(columns(), abc())
            .on_view(move |row| {
                *sink.lock().unwrap() = Some(row.clone());
                Ok(())
            })
            .build()
            .unwrap();

        assert!(grid.open_action_menu("b"));
        grid.activate_menu_item();
        assert!(!grid.overlay().is_open());
        assert_eq!(seen.lock().unwrap().as_ref().map(|c| c.name.as_str()), Some("Ben"));
    }

    #[test]
    fn delete_requires_confirmation_and_cancel_returns_to_menu() {
        let deleted: Arc<Mutex<Vec<String>>> = Arc::default();
        let sink = Arc::clone(&deleted);
        let mut grid = DataGrid::builder(columns(), abc())
            .on_edit(|_| Ok(()))
            .on_delete(move |row| {
                sink.lock().unwrap().push(row.id.clone());
                Ok(())
            })
            .build()
            .unwrap();

        assert!(grid.open_action_menu("c"));
        grid.menu_down();
        grid.activate_menu_item();
        assert!(matches!(
            grid.overlay(),
            GridOverlay::Confirm { menu: Some(_), .. }
        ));
        assert!(deleted.lock().unwrap().is_empty());

        grid.cancel();
        assert!(matches!(grid.overlay(), GridOverlay::ActionMenu(m) if m.row_id == "c"));

        grid.activate_menu_item();
        grid.confirm();
        assert_eq!(*deleted.lock().unwrap(), vec!["c"]);
        assert!(!grid.overlay().is_open());
    }

    #[test]
    fn action_menu_needs_actions_column() {
        let mut grid = DataGrid::builder(columns(), abc()).build().unwrap();
        assert!(!grid.open_action_menu("a"));
        assert!(!grid.open_cursor_action_menu());
    }

    #[test]
    fn visibility_only_for_hideable_columns() {
        let mut cols = columns();
        cols.push(ColumnDef::new("id", |c: &Contact| c.id.clone()).hideable(false));
        let mut grid = DataGrid::builder(cols, abc())
            .on_view(|_| Ok(()))
            .build()
            .unwrap();

        let hideable: Vec<&str> = grid.hideable_columns().iter().map(|c| c.id()).collect();
        assert_eq!(hideable, vec!["name", "email", "phone"]);

        assert!(!grid.toggle_column_visibility(SELECT_COLUMN_ID));
        assert!(!grid.toggle_column_visibility(ACTIONS_COLUMN_ID));
        assert!(!grid.toggle_column_visibility("id"));

        assert!(grid.toggle_column_visibility("email"));
        assert_eq!(grid.visible_columns().len(), grid.columns().len() - 1);

        // Hidden columns still filter and sort.
        grid.set_column_filter("email", "cid");
        assert_eq!(ids(&grid.filtered_rows()), vec!["c"]);
        assert!(grid.toggle_sorting("email", false));
    }

    #[test]
    fn column_menu_toggles_highlighted_column() {
        let mut grid = DataGrid::builder(columns(), abc()).build().unwrap();
        grid.open_column_menu();
        grid.menu_down();
        grid.activate_menu_item();
        assert!(!grid.state().is_visible("email"));
        assert!(matches!(grid.overlay(), GridOverlay::ColumnMenu { cursor: 1 }));
        grid.cancel();
        assert!(!grid.overlay().is_open());
    }

    #[test]
    fn page_boundaries_and_reset_on_filter() {
        let mut grid = DataGrid::builder(columns(), many(25))
            .search_target(["name"])
            .build()
            .unwrap();
        assert_eq!(grid.page_count(), 3);
        assert!(!grid.can_previous_page());
        assert!(grid.can_next_page());

        grid.next_page();
        grid.next_page();
        assert!(!grid.can_next_page());
        grid.next_page();
        assert_eq!(grid.pagination().page_index, 2);
        assert_eq!(grid.page_rows().len(), 5);

        grid.set_quick_filter("name2");
        assert_eq!(grid.pagination().page_index, 0);
        assert_eq!(grid.page_count(), 1);
        assert!(!grid.can_next_page());
    }

    #[test]
    fn empty_grid_has_no_pages() {
        let grid = DataGrid::builder(columns(), Vec::new()).build().unwrap();
        assert_eq!(grid.page_count(), 0);
        assert!(!grid.can_next_page());
        assert!(!grid.can_previous_page());
        assert_eq!(grid.header_check(), HeaderCheck::Unchecked);
        assert_eq!(grid.selection_summary(), "0 of 0 row(s) selected.");
    }

    #[test]
    fn set_rows_prunes_selection_of_removed_rows() {
        let mut grid = DataGrid::builder(columns(), abc()).build().unwrap();
        grid.toggle_row_selected("a");
        grid.toggle_row_selected("b");
        let remaining: Vec<Contact> = abc().into_iter().filter(|c| c.id != "a").collect();
        grid.set_rows(remaining);
        assert!(!grid.is_row_selected("a"));
        assert!(grid.is_row_selected("b"));
        assert_eq!(grid.selection_summary(), "1 of 2 row(s) selected.");
    }

    #[test]
    fn explicit_options_seed_state() {
        let grid = DataGrid::builder(columns(), many(12))
            .options(GridOptions {
                initial_sorting: vec![ColumnSort::new("name", SortDirection::Descending)],
                page_size: Some(5),
            })
            .build()
            .unwrap();
        assert_eq!(grid.page_count(), 3);
        assert_eq!(grid.page_rows()[0].id, "r11");
    }

    #[test]
    fn cursor_is_clamped_to_page() {
        let mut grid = DataGrid::builder(columns(), many(12)).build().unwrap();
        grid.cursor_end();
        assert_eq!(grid.cursor(), 9);
        grid.next_page();
        assert_eq!(grid.cursor(), 1);
        grid.toggle_cursor_selected();
        assert!(grid.is_row_selected("r11"));
        grid.cursor_up();
        grid.cursor_up();
        assert_eq!(grid.cursor(), 0);
    }
}
