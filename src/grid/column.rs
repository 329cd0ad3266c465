//! Column definitions and the synthesized column set.

use std::fmt;
use std::sync::Arc;

/// Column id reserved for the row selection column.
pub const SELECT_COLUMN_ID: &str = "select";
/// Column id reserved for the row actions column.
pub const ACTIONS_COLUMN_ID: &str = "actions";

/// Sort key types for table columns.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Integer(i64),
    String(String),
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match (self, other) {
            (SortKey::Integer(a), SortKey::Integer(b)) => a.partial_cmp(b),
            (SortKey::String(a), SortKey::String(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

type CellFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;
type SortFn<T> = Arc<dyn Fn(&T) -> SortKey + Send + Sync>;

/// Caller-supplied column: maps a row to a cell and a header.
pub struct ColumnDef<T> {
    id: String,
    header: String,
    cell: CellFn<T>,
    sort_key: Option<SortFn<T>>,
    enable_sorting: bool,
    enable_hiding: bool,
    width: u16,
}

impl<T> Clone for ColumnDef<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            cell: Arc::clone(&self.cell),
            sort_key: self.sort_key.clone(),
            enable_sorting: self.enable_sorting,
            enable_hiding: self.enable_hiding,
            width: self.width,
        }
    }
}

impl<T> fmt::Debug for ColumnDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("enable_sorting", &self.enable_sorting)
            .field("enable_hiding", &self.enable_hiding)
            .field("width", &self.width)
            .finish()
    }
}

impl<T> ColumnDef<T> {
    /// Creates a sortable, hideable column. The header defaults to the id.
    pub fn new(id: impl Into<String>, cell: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        let id = id.into();
        Self {
            header: id.clone(),
            id,
            cell: Arc::new(cell),
            sort_key: None,
            enable_sorting: true,
            enable_hiding: true,
            width: 16,
        }
    }

    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Typed sort key. Without one, rows sort by their lowercased cell text.
    pub fn sort_by(mut self, key: impl Fn(&T) -> SortKey + Send + Sync + 'static) -> Self {
        self.sort_key = Some(Arc::new(key));
        self
    }

    pub fn sortable(mut self, enabled: bool) -> Self {
        self.enable_sorting = enabled;
        self
    }

    pub fn hideable(mut self, enabled: bool) -> Self {
        self.enable_hiding = enabled;
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn header_text(&self) -> &str {
        &self.header
    }

    pub fn cell(&self, row: &T) -> String {
        (self.cell)(row)
    }

    pub fn sort_key(&self, row: &T) -> SortKey {
        match &self.sort_key {
            Some(key) => key(row),
            None => SortKey::String(self.cell(row).to_lowercase()),
        }
    }

    pub fn can_sort(&self) -> bool {
        self.enable_sorting
    }

    pub fn can_hide(&self) -> bool {
        self.enable_hiding
    }

    pub fn width_hint(&self) -> u16 {
        self.width
    }
}

/// Which single-row handlers were supplied at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionSet {
    pub view: bool,
    pub edit: bool,
    pub delete: bool,
}

impl ActionSet {
    pub fn any(&self) -> bool {
        self.view || self.edit || self.delete
    }

    /// Menu entries in display order, only for supplied handlers.
    pub fn items(&self) -> Vec<RowAction> {
        let mut items = Vec::with_capacity(3);
        if self.view {
            items.push(RowAction::View);
        }
        if self.edit {
            items.push(RowAction::Edit);
        }
        if self.delete {
            items.push(RowAction::Delete);
        }
        items
    }
}

/// Entry of the per-row actions menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    View,
    Edit,
    Delete,
}

impl RowAction {
    pub fn label(&self) -> &'static str {
        match self {
            RowAction::View => "View",
            RowAction::Edit => "Edit",
            RowAction::Delete => "Delete",
        }
    }
}

/// A column of the synthesized set `[select, ...caller, actions?]`.
#[derive(Debug, Clone)]
pub enum Column<T> {
    Select,
    Data(ColumnDef<T>),
    Actions(ActionSet),
}

impl<T> Column<T> {
    pub fn id(&self) -> &str {
        match self {
            Column::Select => SELECT_COLUMN_ID,
            Column::Data(def) => def.id(),
            Column::Actions(_) => ACTIONS_COLUMN_ID,
        }
    }

    /// Selection and actions columns are never hideable.
    pub fn can_hide(&self) -> bool {
        match self {
            Column::Data(def) => def.can_hide(),
            _ => false,
        }
    }

    pub fn can_sort(&self) -> bool {
        match self {
            Column::Data(def) => def.can_sort(),
            _ => false,
        }
    }

    pub fn as_data(&self) -> Option<&ColumnDef<T>> {
        match self {
            Column::Data(def) => Some(def),
            _ => None,
        }
    }

    pub fn header_text(&self) -> &str {
        match self {
            Column::Select => "",
            Column::Data(def) => def.header_text(),
            Column::Actions(_) => "",
        }
    }

    pub fn width_hint(&self) -> u16 {
        match self {
            Column::Select => 3,
            Column::Data(def) => def.width_hint(),
            Column::Actions(_) => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_key_orders_same_variants_only() {
        assert!(SortKey::Integer(1) < SortKey::Integer(2));
        assert!(SortKey::String("a".into()) < SortKey::String("b".into()));
        assert_eq!(
            SortKey::Integer(1).partial_cmp(&SortKey::String("1".into())),
            None
        );
    }

    #[test]
    fn action_items_follow_supplied_handlers() {
        let set = ActionSet {
            view: true,
            edit: false,
            delete: true,
        };
        assert_eq!(set.items(), vec![RowAction::View, RowAction::Delete]);
        assert!(!ActionSet::default().any());
    }

    #[test]
    fn synthetic_columns_are_not_hideable_or_sortable() {
        let select: Column<String> = Column::Select;
        let actions: Column<String> = Column::Actions(ActionSet::default());
        assert!(!select.can_hide() && !select.can_sort());
        assert!(!actions.can_hide() && !actions.can_sort());

        let data = Column::Data(ColumnDef::new("name", |s: &String| s.clone()).hideable(false));
        assert!(!data.can_hide());
        assert!(data.can_sort());
    }
}
