//! Form widgets: the create/settings pages and the row edit dialog.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::form::{FieldKind, FieldValue, FormState};
use crate::tui::state::{AppState, InputMode, Page};
use crate::tui::style::Styles;

use super::centered_rect;

/// Rows a field occupies: a bordered value box plus a hint line.
fn field_height(kind: &FieldKind) -> u16 {
    match kind {
        FieldKind::Textarea => 7,
        _ => 4,
    }
}

/// Groups field indices into layout rows. Textareas take a row of their own.
fn layout_rows(form: &FormState) -> Vec<Vec<usize>> {
    let columns = form.layout().columns();
    let mut rows: Vec<Vec<usize>> = Vec::new();
    let mut current = Vec::new();
    for (i, field) in form.fields().iter().enumerate() {
        if field.kind == FieldKind::Textarea {
            if !current.is_empty() {
                rows.push(std::mem::take(&mut current));
            }
            rows.push(vec![i]);
            continue;
        }
        current.push(i);
        if current.len() == columns {
            rows.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        rows.push(current);
    }
    rows
}

fn render_field(frame: &mut Frame, area: Rect, form: &FormState, index: usize, active: bool) {
    let Some(field) = form.fields().get(index) else {
        return;
    };
    let focused = active && form.focus() == index;
    let chunks = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).split(area);

    let mut title = format!(" {}", field.label());
    if field.kind.is_required() && !field.disabled {
        title.push_str(" *");
    }
    title.push(' ');
    let border_style = if focused {
        Styles::focused_border()
    } else {
        Styles::unfocused_border()
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let value = form.display_value(index);
    let mut lines: Vec<Line> = match (&field.kind, form.value(index)) {
        (FieldKind::Switch, Some(FieldValue::Bool(on))) => {
            vec![Line::from(if *on { "[■ ] on" } else { "[ □] off" })]
        }
        _ if value.is_empty() && !focused => vec![Line::from(Span::styled(
            field.placeholder().unwrap_or_default(),
            Styles::dim(),
        ))],
        _ if value.is_empty() => vec![Line::default()],
        (FieldKind::Select { .. }, _) => vec![Line::from(format!("{} ▾", value))],
        _ => value.split('\n').map(|l| Line::from(l.to_string())).collect(),
    };
    if focused
        && field.kind.is_text()
        && !field.disabled
        && let Some(last) = lines.last_mut()
    {
        last.push_span(Span::raw("█"));
    }

    let style = if field.disabled {
        Styles::dim()
    } else {
        Styles::default()
    };
    frame.render_widget(
        Paragraph::new(lines)
            .style(style)
            .wrap(Wrap { trim: false })
            .block(block),
        chunks[0],
    );

    let hint = match form.error_for(&field.name) {
        Some(err) => Span::styled(err.to_string(), Styles::critical()),
        None => Span::styled(field.description(), Styles::dim()),
    };
    frame.render_widget(Paragraph::new(Line::from(hint)), chunks[1]);
}

fn form_footer(form: &FormState) -> Line<'static> {
    let reveal = if form.is_password_revealed() {
        " hide password  "
    } else {
        " show password  "
    };
    Line::from(vec![
        Span::styled("Tab", Styles::help_key()),
        Span::styled(" next  ", Styles::help()),
        Span::styled("Ctrl+S", Styles::help_key()),
        Span::styled(" submit  ", Styles::help()),
        Span::styled("Ctrl+R", Styles::help_key()),
        Span::styled(reveal, Styles::help()),
        Span::styled("Esc", Styles::help_key()),
        Span::styled(" cancel", Styles::help()),
    ])
}

fn draw_form(frame: &mut Frame, area: Rect, form: &FormState, active: bool) {
    let rows = layout_rows(form);
    let mut constraints: Vec<Constraint> = rows
        .iter()
        .map(|row| {
            let height = row
                .iter()
                .filter_map(|i| form.fields().get(*i))
                .map(|f| field_height(&f.kind))
                .max()
                .unwrap_or(4);
            Constraint::Length(height)
        })
        .collect();
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(1));
    let chunks = Layout::vertical(constraints).split(area);

    let columns = form.layout().columns() as u32;
    for (row, indices) in rows.iter().enumerate() {
        let cells = if indices.len() == 1 && form.fields()[indices[0]].kind == FieldKind::Textarea {
            vec![chunks[row]]
        } else {
            Layout::horizontal(vec![Constraint::Ratio(1, columns); columns as usize])
                .spacing(1)
                .split(chunks[row])
                .to_vec()
        };
        for (cell, index) in cells.iter().zip(indices) {
            render_field(frame, *cell, form, *index, active);
        }
    }

    if active {
        frame.render_widget(Paragraph::new(form_footer(form)), chunks[chunks.len() - 1]);
    }
}

/// Renders the form of the current form page.
pub fn render_form(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(form) = state.page_form() else {
        return;
    };
    let active = state.input_mode == InputMode::Form;
    let title = match state.page {
        Page::CreatePost => " Create Post ".to_string(),
        _ => format!(" {} ", form.title()),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if active {
            Styles::focused_border()
        } else {
            Styles::unfocused_border()
        })
        .style(Styles::default());
    let inner = block.inner(area);
    frame.render_widget(block, area);
    draw_form(frame, inner, form, active);
}

/// Renders the row edit dialog.
pub fn render_edit_form(frame: &mut Frame, area: Rect, form: &FormState) {
    let popup_area = centered_rect(60, 80, area);
    frame.render_widget(Clear, popup_area);
    let block = Block::default()
        .title(format!(" {} ", form.title()))
        .borders(Borders::ALL)
        .border_style(Styles::focused_border())
        .style(Styles::popup());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);
    draw_form(frame, inner, form, true);
}
