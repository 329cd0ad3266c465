//! Destructive-action confirmation and the per-row actions menu.

use super::column::{ActionSet, RowAction};

/// What a confirmation dialog will do once accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    /// Delete one row, requested from its actions menu.
    DeleteRow { row_id: String },
    /// Delete every filtered selected row.
    DeleteSelected { count: usize },
}

/// Confirmation dialog: a title, a description, confirm and cancel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub title: String,
    pub description: String,
    pub pending: PendingAction,
}

impl ConfirmDialog {
    pub fn delete_row(row_id: impl Into<String>) -> Self {
        Self {
            title: "Delete".to_string(),
            description: "Are you sure you want to delete this data?".to_string(),
            pending: PendingAction::DeleteRow {
                row_id: row_id.into(),
            },
        }
    }

    pub fn delete_selected(count: usize) -> Self {
        Self {
            title: "Delete Multiple".to_string(),
            description: format!("Are you sure you want to delete {} selected data?", count),
            pending: PendingAction::DeleteSelected { count },
        }
    }

    /// Heading line shown above the description.
    pub fn heading(&self) -> String {
        format!("Are you absolutely sure {}?", self.title)
    }

    /// Label of the confirm button.
    pub fn confirm_label(&self) -> String {
        self.title.to_uppercase()
    }
}

/// Open actions menu for one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionMenu {
    pub row_id: String,
    pub items: Vec<RowAction>,
    pub cursor: usize,
}

impl ActionMenu {
    pub fn new(row_id: impl Into<String>, actions: ActionSet) -> Self {
        Self {
            row_id: row_id.into(),
            items: actions.items(),
            cursor: 0,
        }
    }

    pub fn current(&self) -> Option<RowAction> {
        self.items.get(self.cursor).copied()
    }

    pub fn up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn down(&mut self) {
        if self.cursor + 1 < self.items.len() {
            self.cursor += 1;
        }
    }
}

/// Overlay currently owned by the grid. Only one is active at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GridOverlay {
    #[default]
    None,
    /// Per-row actions menu.
    ActionMenu(ActionMenu),
    /// Confirmation dialog. `menu` is the menu that triggered it, kept open
    /// underneath because the delete item suppresses its default dismissal.
    Confirm {
        dialog: ConfirmDialog,
        menu: Option<ActionMenu>,
    },
    /// Column visibility menu with its cursor.
    ColumnMenu { cursor: usize },
}

impl GridOverlay {
    pub fn is_open(&self) -> bool {
        !matches!(self, GridOverlay::None)
    }
}
