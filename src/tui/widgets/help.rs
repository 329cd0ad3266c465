//! Help popup widget with page-sensitive key bindings.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::tui::state::Page;

/// Renders the help popup centered on screen with scroll support.
///
/// `has_filter` tells whether the current grid page has a quick filter.
pub fn render_help(
    frame: &mut Frame,
    area: Rect,
    page: Page,
    has_filter: bool,
    scroll: &mut usize,
) {
    // Calculate popup size (60% width, 80% height, clamped to 40-80 x 10-30)
    let popup_width = (area.width * 60 / 100).clamp(40, 80).min(area.width);
    let popup_height = (area.height * 80 / 100).clamp(10, 30).min(area.height);

    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // Clear the area behind popup
    frame.render_widget(Clear, popup_area);

    let (title, content) = get_help_content(page, has_filter);
    let content_lines = content.len();

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    // Split inner area: content + footer
    let chunks = Layout::vertical([
        Constraint::Min(1),    // Content
        Constraint::Length(1), // Footer
    ])
    .split(inner);

    // Clamp scroll to valid range
    let visible_height = chunks[0].height as usize;
    let max_scroll = content_lines.saturating_sub(visible_height);
    if *scroll > max_scroll {
        *scroll = max_scroll;
    }

    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .scroll((*scroll as u16, 0))
        .style(Style::default().fg(Color::White));
    frame.render_widget(paragraph, chunks[0]);

    let scroll_info = if max_scroll > 0 {
        format!(" [{}/{}]", *scroll + 1, max_scroll + 1)
    } else {
        String::new()
    };
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("Press ", Style::default().fg(Color::DarkGray)),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::styled(" or ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::styled(" to close", Style::default().fg(Color::DarkGray)),
        Span::styled(", ", Style::default().fg(Color::DarkGray)),
        Span::styled("↑↓", Style::default().fg(Color::Yellow)),
        Span::styled(" to scroll", Style::default().fg(Color::DarkGray)),
        Span::styled(scroll_info, Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(footer, chunks[1]);
}

fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(text, Style::default().fg(Color::Yellow)))
}

fn binding(keys: &'static str, action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<14}", keys), Style::default().fg(Color::Cyan)),
        Span::raw(action),
    ])
}

fn global_help() -> Vec<Line<'static>> {
    vec![
        heading("Global:"),
        binding("Tab", "switch focus between sidebar and page"),
        binding("Ctrl+B", "toggle icon-only sidebar"),
        binding("u", "user menu"),
        binding("?", "this help"),
        binding("q", "quit (asks for confirmation)"),
        binding("Ctrl+C", "quit immediately"),
        Line::from(""),
        heading("Sidebar:"),
        binding("↑/↓ j/k", "move"),
        binding("Enter", "open page, expand or collapse a group"),
    ]
}

fn grid_help(has_filter: bool) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading("Table:"),
        binding("↑/↓ j/k", "move cursor"),
        binding("Home/End g/G", "first / last row of the page"),
        binding("Space", "select row"),
        binding("a", "select or clear the whole page"),
        binding("←/→ h/l", "pick column for sorting"),
        binding("s", "sort: ascending, descending, off"),
        binding("S", "add column to a multi-sort"),
        binding("n/p PgDn/PgUp", "next / previous page"),
        binding("Enter", "row actions (View, Edit, Delete)"),
        binding("c", "show or hide columns"),
        binding("d / Delete", "delete selected rows"),
        binding("Esc", "back to sidebar"),
    ];
    if has_filter {
        lines.push(binding("/", "quick filter (Enter keeps, Esc clears)"));
    }
    lines.extend([
        Line::from(""),
        heading("Menus and dialogs:"),
        binding("↑/↓", "move"),
        binding("Enter", "choose / confirm"),
        binding("y", "confirm delete"),
        binding("Esc or n", "cancel; a delete dialog returns to its menu"),
        Line::from(""),
        Line::from(Span::styled(
            "Selection survives sorting, filtering and paging. Bulk delete acts on",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "selected rows that match the current filter.",
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    lines
}

fn form_help() -> Vec<Line<'static>> {
    vec![
        heading("Form:"),
        binding("Tab/↓", "next field"),
        binding("Shift+Tab/↑", "previous field"),
        binding("←/→", "change select option"),
        binding("Space", "toggle switch, next option"),
        binding("Enter", "submit (new line in text areas)"),
        binding("Ctrl+S", "submit"),
        binding("Ctrl+R", "show or hide password"),
        binding("Esc", "reset and leave the form"),
    ]
}

/// Returns help title and content lines for the given page.
fn get_help_content(page: Page, has_filter: bool) -> (&'static str, Vec<Line<'static>>) {
    let mut lines = match page {
        Page::Users | Page::Posts | Page::Categories => grid_help(has_filter),
        Page::CreatePost | Page::Settings => form_help(),
        Page::Overview | Page::NotFound => Vec::new(),
    };
    if !lines.is_empty() {
        lines.push(Line::from(""));
    }
    lines.extend(global_help());
    let title = match page {
        Page::Users | Page::Posts | Page::Categories => "Table Help",
        Page::CreatePost | Page::Settings => "Form Help",
        Page::Overview | Page::NotFound => "Help",
    };
    (title, lines)
}
