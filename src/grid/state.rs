//! Transient grid state: sorting, column filters, visibility, row selection.
//!
//! The four slices are independent. None of them is persisted; a grid gets a
//! fresh `GridState` on construction.

use std::collections::HashMap;

/// Sort direction for a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn indicator(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// One entry of the sort order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSort {
    pub column_id: String,
    pub direction: SortDirection,
}

impl ColumnSort {
    pub fn new(column_id: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column_id: column_id.into(),
            direction,
        }
    }
}

/// Tri-state value of the header selection checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderCheck {
    Checked,
    Indeterminate,
    Unchecked,
}

impl HeaderCheck {
    pub fn glyph(&self) -> &'static str {
        match self {
            HeaderCheck::Checked => "[x]",
            HeaderCheck::Indeterminate => "[-]",
            HeaderCheck::Unchecked => "[ ]",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GridState {
    /// Insertion order is sort priority.
    pub sorting: Vec<ColumnSort>,
    pub column_filters: HashMap<String, String>,
    /// Absent entries are visible.
    pub column_visibility: HashMap<String, bool>,
    /// Absent entries are unselected.
    pub row_selection: HashMap<String, bool>,
}

impl GridState {
    pub fn with_sorting(sorting: Vec<ColumnSort>) -> Self {
        Self {
            sorting,
            ..Self::default()
        }
    }

    pub fn sort_direction(&self, column_id: &str) -> Option<SortDirection> {
        self.sorting
            .iter()
            .find(|s| s.column_id == column_id)
            .map(|s| s.direction)
    }

    /// Cycles a column through none -> ascending -> descending -> none.
    ///
    /// Without `multi` the column replaces the whole sort order. With `multi` it is
    /// appended, or updated in place so its priority is kept.
    pub fn toggle_sorting(&mut self, column_id: &str, multi: bool) {
        let next = match self.sort_direction(column_id) {
            None => Some(SortDirection::Ascending),
            Some(SortDirection::Ascending) => Some(SortDirection::Descending),
            Some(SortDirection::Descending) => None,
        };

        if !multi {
            self.sorting = next
                .map(|direction| vec![ColumnSort::new(column_id, direction)])
                .unwrap_or_default();
            return;
        }

        match (next, self.sorting.iter().position(|s| s.column_id == column_id)) {
            (Some(direction), Some(pos)) => self.sorting[pos].direction = direction,
            (Some(direction), None) => self.sorting.push(ColumnSort::new(column_id, direction)),
            (None, Some(pos)) => {
                self.sorting.remove(pos);
            }
            (None, None) => {}
        }
    }

    pub fn filter_value(&self, column_id: &str) -> Option<&str> {
        self.column_filters.get(column_id).map(String::as_str)
    }

    /// An empty value removes the filter.
    pub fn set_filter_value(&mut self, column_id: &str, value: &str) {
        if value.is_empty() {
            self.column_filters.remove(column_id);
        } else {
            self.column_filters
                .insert(column_id.to_string(), value.to_string());
        }
    }

    pub fn is_visible(&self, column_id: &str) -> bool {
        self.column_visibility
            .get(column_id)
            .copied()
            .unwrap_or(true)
    }

    pub fn set_visible(&mut self, column_id: &str, visible: bool) {
        self.column_visibility
            .insert(column_id.to_string(), visible);
    }

    pub fn is_selected(&self, row_id: &str) -> bool {
        self.row_selection.get(row_id).copied().unwrap_or(false)
    }

    pub fn set_selected(&mut self, row_id: &str, selected: bool) {
        if selected {
            self.row_selection.insert(row_id.to_string(), true);
        } else {
            self.row_selection.remove(row_id);
        }
    }

    pub fn selected_count(&self) -> usize {
        self.row_selection.values().filter(|v| **v).count()
    }

    pub fn reset_row_selection(&mut self) {
        self.row_selection.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_sort_cycles_and_replaces() {
        let mut state = GridState::default();
        state.toggle_sorting("name", false);
        assert_eq!(state.sort_direction("name"), Some(SortDirection::Ascending));

        state.toggle_sorting("email", false);
        assert_eq!(state.sorting, vec![ColumnSort::new("email", SortDirection::Ascending)]);

        state.toggle_sorting("email", false);
        assert_eq!(state.sort_direction("email"), Some(SortDirection::Descending));
        state.toggle_sorting("email", false);
        assert!(state.sorting.is_empty());
    }

    #[test]
    fn multi_sort_keeps_priority_order() {
        let mut state = GridState::default();
        state.toggle_sorting("role", true);
        state.toggle_sorting("name", true);
        state.toggle_sorting("role", true);

        assert_eq!(
            state.sorting,
            vec![
                ColumnSort::new("role", SortDirection::Descending),
                ColumnSort::new("name", SortDirection::Ascending),
            ]
        );

        state.toggle_sorting("role", true);
        assert_eq!(state.sorting, vec![ColumnSort::new("name", SortDirection::Ascending)]);
    }

    #[test]
    fn empty_filter_value_removes_entry() {
        let mut state = GridState::default();
        state.set_filter_value("email", "ann");
        assert_eq!(state.filter_value("email"), Some("ann"));
        state.set_filter_value("email", "");
        assert!(state.column_filters.is_empty());
    }

    #[test]
    fn absent_entries_use_defaults() {
        let mut state = GridState::default();
        assert!(state.is_visible("email"));
        assert!(!state.is_selected("a"));

        state.set_visible("email", false);
        state.set_selected("a", true);
        assert!(!state.is_visible("email"));
        assert_eq!(state.selected_count(), 1);

        state.set_selected("a", false);
        assert!(state.row_selection.is_empty());
    }
}
