//! Grid pages: a [`DataGrid`] per data set, with its callbacks wired to a
//! command channel that the shell drains after every key.

use std::sync::mpsc::{self, Receiver, Sender};

use tracing::{debug, info, warn};

use crate::form::{Field, FormValues};
use crate::grid::{DataGrid, GridError, GridOptions, GridOverlay, GridRow};
use crate::sample::Dataset;
use crate::view::{GridViewModel, build_grid_view};

/// Grid operation triggered from the keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridOp {
    CursorUp,
    CursorDown,
    CursorHome,
    CursorEnd,
    ToggleRow,
    TogglePage,
    NextPage,
    PreviousPage,
    FocusLeft,
    FocusRight,
    /// Sort by the focused column. `multi` keeps the other sorted columns.
    Sort { multi: bool },
    OpenActions,
    OpenColumns,
    BulkDelete,
    MenuUp,
    MenuDown,
    MenuActivate,
    Confirm,
    Cancel,
    QuickFilter(String),
}

/// What a grid callback asked the shell to do.
#[derive(Debug)]
enum Command<T> {
    View(T),
    Edit(T),
    Delete(T),
    DeleteAll(Vec<T>),
}

/// Outcome of draining a page's commands that needs the shell.
#[derive(Debug, Clone, PartialEq)]
pub enum PaneEvent {
    ShowDetail {
        title: String,
        lines: Vec<(String, String)>,
    },
    EditRow {
        row_id: String,
        title: String,
        fields: Vec<Field>,
    },
    Notice(String),
}

/// Type-erased grid page.
pub trait GridPane {
    fn title(&self) -> &str;
    fn view(&self) -> GridViewModel;
    fn row_count(&self) -> usize;
    fn has_quick_filter(&self) -> bool;
    fn quick_filter_value(&self) -> String;
    fn overlay_open(&self) -> bool;
    /// True while a delete confirmation is showing.
    fn confirm_open(&self) -> bool;
    fn apply(&mut self, op: GridOp);
    /// Handles queued callback commands.
    fn drain(&mut self) -> Vec<PaneEvent>;
    /// Applies a submitted edit form. Returns false if the row is gone.
    fn submit_edit(&mut self, row_id: &str, values: &FormValues) -> bool;
    /// Appends a record built from a create form.
    fn create(&mut self, values: &FormValues) -> Option<String>;
}

fn send<T>(tx: &Sender<Command<T>>, cmd: Command<T>) -> crate::grid::HandlerResult {
    tx.send(cmd).map_err(|e| e.to_string().into())
}

pub struct DatasetPage<T: Dataset> {
    grid: DataGrid<T>,
    rx: Receiver<Command<T>>,
    /// Focused data column for sort keys.
    focus_column: usize,
    next_id: usize,
}

impl<T: Dataset> DatasetPage<T> {
    pub fn new(rows: Vec<T>, page_size: usize) -> Result<Self, GridError> {
        let (tx, rx) = mpsc::channel();
        let next_id = rows.len() + 1;
        let mut builder = DataGrid::builder(T::columns(), rows)
            .search_target(T::search_target().iter().copied())
            .options(GridOptions {
                page_size: Some(page_size),
                ..GridOptions::default()
            });

        if T::ACTIONS.view {
            let tx = tx.clone();
            builder = builder.on_view(move |row: &T| send(&tx, Command::View(row.clone())));
        }
        if T::ACTIONS.edit {
            let tx = tx.clone();
            builder = builder.on_edit(move |row: &T| send(&tx, Command::Edit(row.clone())));
        }
        if T::ACTIONS.delete {
            let tx = tx.clone();
            builder = builder.on_delete(move |row: &T| send(&tx, Command::Delete(row.clone())));
        }
        if T::BULK_DELETE {
            builder =
                builder.on_delete_all(move |rows: Vec<T>| send(&tx, Command::DeleteAll(rows)));
        }

        Ok(Self {
            grid: builder.build()?,
            rx,
            focus_column: 0,
            next_id,
        })
    }

    pub fn grid(&self) -> &DataGrid<T> {
        &self.grid
    }

    fn focused_column_id(&self) -> Option<String> {
        self.grid
            .data_columns()
            .get(self.focus_column)
            .map(|c| c.id().to_string())
    }

    fn remove_rows(&mut self, ids: &[String]) -> usize {
        let before = self.grid.rows().len();
        let rows: Vec<T> = self
            .grid
            .rows()
            .iter()
            .filter(|r| !ids.iter().any(|id| id == r.id()))
            .cloned()
            .collect();
        self.grid.set_rows(rows);
        before - self.grid.rows().len()
    }
}

impl<T: Dataset> GridPane for DatasetPage<T> {
    fn title(&self) -> &str {
        T::TITLE
    }

    fn view(&self) -> GridViewModel {
        build_grid_view(T::TITLE, &self.grid, self.focus_column)
    }

    fn row_count(&self) -> usize {
        self.grid.rows().len()
    }

    fn has_quick_filter(&self) -> bool {
        !self.grid.search_target().is_empty()
    }

    fn quick_filter_value(&self) -> String {
        self.grid.quick_filter_value().to_string()
    }

    fn overlay_open(&self) -> bool {
        self.grid.overlay().is_open()
    }

    fn confirm_open(&self) -> bool {
        matches!(self.grid.overlay(), GridOverlay::Confirm { .. })
    }

    fn apply(&mut self, op: GridOp) {
        match op {
            GridOp::CursorUp => self.grid.cursor_up(),
            GridOp::CursorDown => self.grid.cursor_down(),
            GridOp::CursorHome => self.grid.cursor_home(),
            GridOp::CursorEnd => self.grid.cursor_end(),
            GridOp::ToggleRow => self.grid.toggle_cursor_selected(),
            GridOp::TogglePage => self.grid.toggle_page_selection(),
            GridOp::NextPage => self.grid.next_page(),
            GridOp::PreviousPage => self.grid.previous_page(),
            GridOp::FocusLeft => self.focus_column = self.focus_column.saturating_sub(1),
            GridOp::FocusRight => {
                let count = self.grid.data_columns().len();
                if self.focus_column + 1 < count {
                    self.focus_column += 1;
                }
            }
            GridOp::Sort { multi } => {
                if let Some(id) = self.focused_column_id() {
                    self.grid.toggle_sorting(&id, multi);
                }
            }
            GridOp::OpenActions => {
                self.grid.open_cursor_action_menu();
            }
            GridOp::OpenColumns => self.grid.open_column_menu(),
            GridOp::BulkDelete => {
                self.grid.request_bulk_delete();
            }
            GridOp::MenuUp => self.grid.menu_up(),
            GridOp::MenuDown => self.grid.menu_down(),
            GridOp::MenuActivate => self.grid.activate_menu_item(),
            GridOp::Confirm => self.grid.confirm(),
            GridOp::Cancel => self.grid.cancel(),
            GridOp::QuickFilter(text) => self.grid.set_quick_filter(&text),
        }
    }

    fn drain(&mut self) -> Vec<PaneEvent> {
        let commands: Vec<Command<T>> = self.rx.try_iter().collect();
        let mut events = Vec::new();
        for cmd in commands {
            match cmd {
                Command::View(row) => events.push(PaneEvent::ShowDetail {
                    title: format!("{} {}", T::TITLE, row.id()),
                    lines: row.detail(),
                }),
                Command::Edit(row) => events.push(PaneEvent::EditRow {
                    row_id: row.id().to_string(),
                    title: format!("Edit {}", row.id()),
                    fields: row.form_fields(),
                }),
                Command::Delete(row) => {
                    let id = row.id().to_string();
                    if self.remove_rows(std::slice::from_ref(&id)) == 1 {
                        info!(page = T::TITLE, row_id = id.as_str(), "row deleted");
                        events.push(PaneEvent::Notice(format!("Deleted {}.", id)));
                    }
                }
                Command::DeleteAll(rows) => {
                    let ids: Vec<String> = rows.iter().map(|r| r.id().to_string()).collect();
                    let removed = self.remove_rows(&ids);
                    info!(page = T::TITLE, removed, "rows deleted");
                    events.push(PaneEvent::Notice(format!("Deleted {} row(s).", removed)));
                }
            }
        }
        events
    }

    fn submit_edit(&mut self, row_id: &str, values: &FormValues) -> bool {
        let mut rows = self.grid.rows().to_vec();
        let Some(row) = rows.iter_mut().find(|r| r.id() == row_id) else {
            warn!(page = T::TITLE, row_id, "edited row no longer exists");
            return false;
        };
        row.apply_form(values);
        self.grid.set_rows(rows);
        debug!(page = T::TITLE, row_id, "row updated");
        true
    }

    fn create(&mut self, values: &FormValues) -> Option<String> {
        let id = T::row_id(self.next_id);
        let row = T::from_form(id.clone(), values)?;
        self.next_id += 1;
        let mut rows = self.grid.rows().to_vec();
        rows.push(row);
        self.grid.set_rows(rows);
        info!(page = T::TITLE, row_id = id.as_str(), "row created");
        Some(id)
    }
}
