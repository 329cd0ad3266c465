//! UI-agnostic view models.
//!
//! A [`GridViewModel`] is a snapshot of a [`DataGrid`] as plain strings and
//! flags: headers with sort indicators, the current page of cells, the
//! footer and whichever overlay is open. The TUI maps it to ratatui widgets;
//! nothing here depends on a rendering framework.

use crate::grid::{Column, DataGrid, GridOverlay, GridRow, HeaderCheck, SortDirection};

/// Cell text of the actions column.
pub const ACTIONS_GLYPH: &str = "...";

/// Table header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewHeader {
    pub column_id: String,
    pub text: String,
    pub sort: Option<SortDirection>,
    /// 1-based priority when more than one column is sorted.
    pub sort_priority: Option<usize>,
    pub sortable: bool,
}

impl ViewHeader {
    /// Header text with its sort indicator.
    pub fn label(&self) -> String {
        match (self.sort, self.sort_priority) {
            (Some(dir), Some(p)) => format!("{}{}{}", self.text, dir.indicator(), p),
            (Some(dir), None) => format!("{}{}", self.text, dir.indicator()),
            _ => self.text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRow {
    pub id: String,
    pub cells: Vec<String>,
    pub selected: bool,
}

/// Open overlay, flattened for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OverlayView {
    #[default]
    None,
    ActionMenu {
        row_id: String,
        items: Vec<&'static str>,
        cursor: usize,
    },
    ColumnMenu {
        /// (header, visible) per hideable column.
        entries: Vec<(String, bool)>,
        cursor: usize,
    },
    Confirm {
        heading: String,
        description: String,
        confirm_label: String,
        /// Menu items still open underneath, if the dialog came from one.
        menu: Option<Vec<&'static str>>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridViewModel {
    pub title: String,
    pub headers: Vec<ViewHeader>,
    pub widths: Vec<u16>,
    pub rows: Vec<ViewRow>,
    /// Row cursor within `rows`.
    pub cursor: usize,
    /// Index into `headers` of the column targeted by sort keys.
    pub focus_column: Option<usize>,
    /// `None` when the page has no quick filter.
    pub quick_filter: Option<String>,
    pub status: String,
    pub page_label: String,
    pub can_previous: bool,
    pub can_next: bool,
    /// Count shown on the bulk-delete affordance.
    pub bulk_delete: Option<usize>,
    pub overlay: OverlayView,
}

/// Builds the view model for one grid.
///
/// `focus_data_column` indexes the data columns (not the synthesized ones);
/// it is resolved to a header index only if that column is visible.
pub fn build_grid_view<T: GridRow>(
    title: &str,
    grid: &DataGrid<T>,
    focus_data_column: usize,
) -> GridViewModel {
    let state = grid.state();
    let visible = grid.visible_columns();
    let multi_sort = state.sorting.len() > 1;
    let focus_id = grid
        .data_columns()
        .get(focus_data_column)
        .map(|c| c.id().to_string());

    let headers: Vec<ViewHeader> = visible
        .iter()
        .map(|col| {
            let text = match col {
                Column::Select => grid.header_check().glyph().to_string(),
                _ => col.header_text().to_string(),
            };
            let sort = state.sort_direction(col.id());
            let sort_priority = if multi_sort {
                state
                    .sorting
                    .iter()
                    .position(|s| s.column_id == col.id())
                    .map(|p| p + 1)
            } else {
                None
            };
            ViewHeader {
                column_id: col.id().to_string(),
                text,
                sort,
                sort_priority,
                sortable: col.can_sort(),
            }
        })
        .collect();

    let widths = visible.iter().map(|c| c.width_hint()).collect();

    let rows = grid
        .page_rows()
        .into_iter()
        .map(|row| {
            let selected = grid.is_row_selected(row.id());
            let cells = visible
                .iter()
                .map(|col| match col {
                    Column::Select => check_glyph(selected).to_string(),
                    Column::Data(def) => def.cell(row),
                    Column::Actions(_) => ACTIONS_GLYPH.to_string(),
                })
                .collect();
            ViewRow {
                id: row.id().to_string(),
                cells,
                selected,
            }
        })
        .collect();

    let page_count = grid.page_count();
    let page_label = format!(
        "Page {} of {}",
        if page_count == 0 { 0 } else { grid.pagination().page_index + 1 },
        page_count
    );

    GridViewModel {
        title: title.to_string(),
        focus_column: focus_id.and_then(|id| headers.iter().position(|h| h.column_id == id)),
        headers,
        widths,
        rows,
        cursor: grid.cursor(),
        quick_filter: (!grid.search_target().is_empty())
            .then(|| grid.quick_filter_value().to_string()),
        status: grid.selection_summary(),
        page_label,
        can_previous: grid.can_previous_page(),
        can_next: grid.can_next_page(),
        bulk_delete: grid.bulk_delete_count(),
        overlay: overlay_view(grid),
    }
}

fn check_glyph(selected: bool) -> &'static str {
    if selected {
        HeaderCheck::Checked.glyph()
    } else {
        HeaderCheck::Unchecked.glyph()
    }
}

fn overlay_view<T: GridRow>(grid: &DataGrid<T>) -> OverlayView {
    match grid.overlay() {
        GridOverlay::None => OverlayView::None,
        GridOverlay::ActionMenu(menu) => OverlayView::ActionMenu {
            row_id: menu.row_id.clone(),
            items: menu.items.iter().map(|a| a.label()).collect(),
            cursor: menu.cursor,
        },
        GridOverlay::ColumnMenu { cursor } => OverlayView::ColumnMenu {
            entries: grid
                .hideable_columns()
                .iter()
                .map(|c| (c.header_text().to_string(), grid.state().is_visible(c.id())))
                .collect(),
            cursor: *cursor,
        },
        GridOverlay::Confirm { dialog, menu } => OverlayView::Confirm {
            heading: dialog.heading(),
            description: dialog.description.clone(),
            confirm_label: dialog.confirm_label(),
            menu: menu
                .as_ref()
                .map(|m| m.items.iter().map(|a| a.label()).collect()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::ColumnDef;

    #[derive(Debug, Clone)]
    struct Item {
        id: String,
        name: String,
    }

    impl GridRow for Item {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn grid(n: usize) -> DataGrid<Item> {
        let rows = (0..n)
            .map(|i| Item {
                id: format!("i{}", i),
                name: format!("item {}", i),
            })
            .collect();
        DataGrid::builder(
            vec![
                ColumnDef::new("name", |i: &Item| i.name.clone()).header("Name"),
                ColumnDef::new("id", |i: &Item| i.id.clone()).header("ID"),
            ],
            rows,
        )
        .on_view(|_| Ok(()))
        .on_delete(|_| Ok(()))
        .build()
        .unwrap()
    }

    #[test]
    fn cells_follow_visible_columns() {
        let mut g = grid(3);
        g.toggle_row_selected("i1");
        let vm = build_grid_view("Items", &g, 0);

        let headers: Vec<String> = vm.headers.iter().map(ViewHeader::label).collect();
        assert_eq!(headers, vec!["[-]", "Name", "ID", ""]);
        assert_eq!(vm.rows[1].cells, vec!["[x]", "item 1", "i1", ACTIONS_GLYPH]);
        assert_eq!(vm.focus_column, Some(1));
        assert_eq!(vm.quick_filter, None);
        assert_eq!(vm.page_label, "Page 1 of 1");

        g.toggle_column_visibility("name");
        let vm = build_grid_view("Items", &g, 0);
        assert_eq!(vm.headers.len(), 3);
        assert_eq!(vm.focus_column, None);
    }

    #[test]
    fn sort_indicators_show_priority_when_multi() {
        let mut g = grid(3);
        g.toggle_sorting("name", false);
        let vm = build_grid_view("Items", &g, 0);
        assert_eq!(vm.headers[1].label(), "Name▲");

        g.toggle_sorting("id", true);
        g.toggle_sorting("id", true);
        let vm = build_grid_view("Items", &g, 0);
        assert_eq!(vm.headers[1].label(), "Name▲1");
        assert_eq!(vm.headers[2].label(), "ID▼2");
    }

    #[test]
    fn confirm_over_menu_is_flattened() {
        let mut g = grid(2);
        g.open_action_menu("i0");
        g.menu_down();
        g.activate_menu_item();
        match build_grid_view("Items", &g, 0).overlay {
            OverlayView::Confirm {
                confirm_label,
                menu,
                ..
            } => {
                assert_eq!(confirm_label, "DELETE");
                assert_eq!(menu, Some(vec!["View", "Delete"]));
            }
            other => panic!("unexpected overlay {:?}", other),
        }
    }

    #[test]
    fn empty_grid_reports_page_zero() {
        let vm = build_grid_view("Items", &grid(0), 0);
        assert_eq!(vm.page_label, "Page 0 of 0");
        assert!(!vm.can_next);
        assert_eq!(vm.status, "0 of 0 row(s) selected.");
    }
}
