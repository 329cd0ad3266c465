//! Data grid widget for list pages.
//! Thin TUI wrapper over [`crate::view::build_grid_view`].

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Row, Table, TableState};

use crate::tui::state::{AppState, Focus, InputMode};
use crate::tui::style::Styles;
use crate::view::{GridViewModel, OverlayView};

use super::render_delete_confirm;

const MENU_WIDTH: u16 = 18;

pub fn render_grid(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(pane) = state.grid_pane() else {
        return;
    };
    let vm = pane.view();
    let focused = state.focus == Focus::Content;

    let block = Block::default()
        .title(format!(" {} ", vm.title))
        .borders(Borders::ALL)
        .border_style(if focused {
            Styles::focused_border()
        } else {
            Styles::unfocused_border()
        })
        .style(Styles::default());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([
        Constraint::Length(1), // Toolbar
        Constraint::Min(3),    // Table
        Constraint::Length(1), // Footer
    ])
    .split(inner);

    render_toolbar(frame, chunks[0], &vm, state);
    render_table(frame, chunks[1], &vm, focused);
    render_footer(frame, chunks[2], &vm);

    if focused {
        render_overlay(frame, chunks[1], &vm);
    }
}

fn render_toolbar(frame: &mut Frame, area: Rect, vm: &GridViewModel, state: &AppState) {
    let mut spans = Vec::new();
    match &vm.quick_filter {
        Some(_) if state.input_mode == InputMode::Filter => {
            spans.push(Span::styled("Filter: ", Styles::help_key()));
            spans.push(Span::styled(
                format!("{}█", state.filter_input),
                Styles::filter_input(),
            ));
        }
        Some(value) if !value.is_empty() => {
            spans.push(Span::styled("Filter: ", Styles::help_key()));
            spans.push(Span::raw(value.clone()));
        }
        Some(_) => spans.push(Span::styled("/ Filter...", Styles::dim())),
        None => {}
    }
    spans.push(Span::styled("   c", Styles::help_key()));
    spans.push(Span::styled(" Columns", Styles::help()));
    if let Some(count) = vm.bulk_delete {
        spans.push(Span::styled(format!("   Delete ({})", count), Styles::critical()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_table(frame: &mut Frame, area: Rect, vm: &GridViewModel, focused: bool) {
    // Header with sort indicators
    let headers: Vec<Span> = vm
        .headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let style = if focused && vm.focus_column == Some(i) {
                Styles::table_header_focused()
            } else {
                Styles::table_header()
            };
            Span::styled(h.label(), style)
        })
        .collect();
    let header = Row::new(headers).style(Styles::table_header()).height(1);

    if vm.rows.is_empty() {
        let rows = vec![Row::new(vec![Span::styled("No results.", Styles::dim())])];
        let table = Table::new(rows, [Constraint::Fill(1)]).header(header);
        frame.render_widget(table, area);
        return;
    }

    let rows: Vec<Row> = vm
        .rows
        .iter()
        .map(|vr| {
            let style = if vr.selected {
                Styles::checked_row()
            } else {
                Styles::default()
            };
            Row::new(vr.cells.iter().map(|c| Span::raw(c.clone())))
                .style(style)
                .height(1)
        })
        .collect();

    let mut constraints: Vec<Constraint> =
        vm.widths.iter().map(|&w| Constraint::Length(w)).collect();
    constraints.push(Constraint::Fill(1));

    let mut table_state = TableState::default();
    if focused {
        table_state.select(Some(vm.cursor));
    }
    let table = Table::new(rows, constraints)
        .header(header)
        .column_spacing(1)
        .row_highlight_style(Styles::selected());
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn render_footer(frame: &mut Frame, area: Rect, vm: &GridViewModel) {
    let chunks = Layout::horizontal([Constraint::Min(10), Constraint::Length(36)]).split(area);
    frame.render_widget(
        Paragraph::new(Span::styled(vm.status.clone(), Styles::dim())),
        chunks[0],
    );

    let nav_style = |enabled: bool| if enabled { Styles::help_key() } else { Styles::dim() };
    let line = Line::from(vec![
        Span::raw(format!("{}  ", vm.page_label)),
        Span::styled("◀ Previous", nav_style(vm.can_previous)),
        Span::raw("  "),
        Span::styled("Next ▶", nav_style(vm.can_next)),
    ]);
    frame.render_widget(Paragraph::new(line).right_aligned(), chunks[1]);
}

/// Box anchored to the right edge of `area` at row `row`, kept inside `area`.
fn menu_rect(area: Rect, row: u16, height: u16) -> Rect {
    let width = MENU_WIDTH.min(area.width);
    let height = height.min(area.height);
    let x = area.right().saturating_sub(width);
    let y = (area.y + row).min(area.bottom().saturating_sub(height));
    Rect::new(x, y, width, height)
}

fn render_menu(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line<'static>>) {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Styles::focused_border())
        .style(Styles::popup());
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn item_line(text: String, is_cursor: bool, destructive: bool) -> Line<'static> {
    let style = match (is_cursor, destructive) {
        (true, _) => Styles::selected(),
        (false, true) => Styles::critical(),
        (false, false) => Styles::popup(),
    };
    Line::from(Span::styled(text, style))
}

fn action_lines(items: &[&'static str], cursor: usize) -> Vec<Line<'static>> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| item_line(format!(" {}", item), i == cursor, *item == "Delete"))
        .collect()
}

fn render_overlay(frame: &mut Frame, area: Rect, vm: &GridViewModel) {
    // +1 skips the table header row
    let cursor_row = vm.cursor as u16 + 1;
    match &vm.overlay {
        OverlayView::None => {}
        OverlayView::ActionMenu { items, cursor, .. } => {
            let rect = menu_rect(area, cursor_row, items.len() as u16 + 2);
            render_menu(frame, rect, "Actions", action_lines(items, *cursor));
        }
        OverlayView::ColumnMenu { entries, cursor } => {
            let lines = entries
                .iter()
                .enumerate()
                .map(|(i, (name, visible))| {
                    let check = if *visible { "[x]" } else { "[ ]" };
                    item_line(format!(" {} {}", check, name), i == *cursor, false)
                })
                .collect();
            let rect = menu_rect(area, 0, entries.len() as u16 + 2);
            render_menu(frame, rect, "Columns", lines);
        }
        OverlayView::Confirm {
            heading,
            description,
            confirm_label,
            menu,
        } => {
            if let Some(items) = menu {
                let rect = menu_rect(area, cursor_row, items.len() as u16 + 2);
                let lines = items
                    .iter()
                    .map(|item| item_line(format!(" {}", item), false, false))
                    .collect();
                render_menu(frame, rect, "Actions", lines);
            }
            let screen = frame.area();
            render_delete_confirm(frame, screen, heading, description, confirm_label);
        }
    }
}
