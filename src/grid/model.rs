//! Row-model engine: core -> filtered -> sorted -> paginated.
//!
//! Every view is a list of indices into the caller's row slice, so the rows
//! themselves are never copied or reordered.

use std::cmp::Ordering;

use super::column::Column;
use super::state::{GridState, SortDirection};

/// Page size used when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn find_data<'a, T>(
    columns: &'a [Column<T>],
    id: &str,
) -> Option<&'a super::column::ColumnDef<T>> {
    columns
        .iter()
        .filter_map(Column::as_data)
        .find(|def| def.id() == id)
}

/// Rows passing every column filter, in core order.
///
/// Each filter is a case-insensitive substring match on the cell text of its
/// column, evaluated independently of the others.
pub fn filtered_indices<T>(rows: &[T], columns: &[Column<T>], state: &GridState) -> Vec<usize> {
    let filters: Vec<_> = state
        .column_filters
        .iter()
        .filter_map(|(id, value)| {
            find_data(columns, id).map(|def| (def, value.to_lowercase()))
        })
        .collect();

    rows.iter()
        .enumerate()
        .filter(|(_, row)| {
            filters
                .iter()
                .all(|(def, needle)| def.cell(row).to_lowercase().contains(needle.as_str()))
        })
        .map(|(idx, _)| idx)
        .collect()
}

/// Stable multi-column sort of `indices` by the sort order, in priority order.
pub fn sort_indices<T>(
    rows: &[T],
    columns: &[Column<T>],
    state: &GridState,
    indices: &mut [usize],
) {
    let keys: Vec<_> = state
        .sorting
        .iter()
        .filter_map(|s| {
            find_data(columns, &s.column_id)
                .filter(|def| def.can_sort())
                .map(|def| (def, s.direction))
        })
        .collect();
    if keys.is_empty() {
        return;
    }

    indices.sort_by(|&a, &b| {
        for (def, direction) in &keys {
            let cmp = def
                .sort_key(&rows[a])
                .partial_cmp(&def.sort_key(&rows[b]))
                .unwrap_or(Ordering::Equal);
            let cmp = match direction {
                SortDirection::Ascending => cmp,
                SortDirection::Descending => cmp.reverse(),
            };
            if cmp != Ordering::Equal {
                return cmp;
            }
        }
        Ordering::Equal
    });
}

/// Filtered then sorted indices.
pub fn sorted_indices<T>(rows: &[T], columns: &[Column<T>], state: &GridState) -> Vec<usize> {
    let mut indices = filtered_indices(rows, columns, state);
    sort_indices(rows, columns, state, &mut indices);
    indices
}

/// Number of pages for `total` rows. Zero rows means zero pages.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// The slice of `indices` that falls on the current page.
pub fn page_slice(indices: &[usize], pagination: Pagination) -> &[usize] {
    let start = pagination
        .page_index
        .saturating_mul(pagination.page_size)
        .min(indices.len());
    let end = start.saturating_add(pagination.page_size).min(indices.len());
    &indices[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::column::{ColumnDef, SortKey};
    use crate::grid::state::ColumnSort;

    #[derive(Clone)]
    struct Item {
        name: &'static str,
        team: &'static str,
        score: i64,
    }

    fn columns() -> Vec<Column<Item>> {
        vec![
            Column::Select,
            Column::Data(ColumnDef::new("name", |i: &Item| i.name.to_string())),
            Column::Data(ColumnDef::new("team", |i: &Item| i.team.to_string())),
            Column::Data(
                ColumnDef::new("score", |i: &Item| i.score.to_string())
                    .sort_by(|i: &Item| SortKey::Integer(i.score)),
            ),
        ]
    }

    fn items() -> Vec<Item> {
        vec![
            Item { name: "Carol", team: "red", score: 7 },
            Item { name: "alice", team: "blue", score: 10 },
            Item { name: "Bob", team: "red", score: 7 },
            Item { name: "dave", team: "blue", score: 2 },
        ]
    }

    #[test]
    fn filters_are_case_insensitive_and_conjunctive() {
        let mut state = GridState::default();
        state.set_filter_value("team", "RED");
        assert_eq!(filtered_indices(&items(), &columns(), &state), vec![0, 2]);

        state.set_filter_value("name", "bo");
        assert_eq!(filtered_indices(&items(), &columns(), &state), vec![2]);
    }

    #[test]
    fn filters_on_unknown_columns_are_ignored() {
        let mut state = GridState::default();
        state.set_filter_value("missing", "zzz");
        assert_eq!(filtered_indices(&items(), &columns(), &state).len(), 4);
    }

    #[test]
    fn sort_uses_priority_then_keeps_core_order() {
        let state = GridState::with_sorting(vec![
            ColumnSort::new("score", SortDirection::Descending),
            ColumnSort::new("name", SortDirection::Ascending),
        ]);
        assert_eq!(sorted_indices(&items(), &columns(), &state), vec![1, 2, 0, 3]);

        let state =
            GridState::with_sorting(vec![ColumnSort::new("team", SortDirection::Ascending)]);
        // Ties keep core order.
        assert_eq!(sorted_indices(&items(), &columns(), &state), vec![1, 3, 0, 2]);
    }

    #[test]
    fn text_sort_ignores_case() {
        let state =
            GridState::with_sorting(vec![ColumnSort::new("name", SortDirection::Ascending)]);
        assert_eq!(sorted_indices(&items(), &columns(), &state), vec![1, 2, 0, 3]);
    }

    #[test]
    fn pagination_slices_and_counts() {
        let indices: Vec<usize> = (0..23).collect();
        assert_eq!(page_count(indices.len(), 10), 3);
        assert_eq!(page_count(0, 10), 0);

        let last = page_slice(&indices, Pagination { page_index: 2, page_size: 10 });
        assert_eq!(last, &[20, 21, 22]);

        let past_end = page_slice(&indices, Pagination { page_index: 5, page_size: 10 });
        assert!(past_end.is_empty());
    }
}
