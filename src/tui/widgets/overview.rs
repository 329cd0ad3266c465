//! Overview and not-found panels.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::state::{AppState, Focus};
use crate::tui::style::Styles;

pub fn render_overview(frame: &mut Frame, area: Rect, state: &AppState) {
    let border_style = if state.focus == Focus::Content {
        Styles::focused_border()
    } else {
        Styles::unfocused_border()
    };
    let block = Block::default()
        .title(" Dashboard ")
        .borders(Borders::ALL)
        .border_style(border_style)
        .style(Styles::default());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let counts = state.overview();
    let mut constraints = vec![Constraint::Length(2)];
    constraints.extend(counts.iter().map(|_| Constraint::Length(4)));
    constraints.push(Constraint::Min(0));
    let chunks = Layout::vertical(constraints).split(inner);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(format!("Welcome back, {}", state.user.name), Styles::section_header()),
            Span::styled(format!("  {}", state.user.workspace), Styles::dim()),
        ])),
        chunks[0],
    );

    for (i, (name, count)) in counts.iter().enumerate() {
        let card = Block::default()
            .title(format!(" {} ", name))
            .borders(Borders::ALL)
            .border_style(Styles::unfocused_border());
        frame.render_widget(
            Paragraph::new(Span::styled(count.to_string(), Styles::nav_active())).block(card),
            chunks[i + 1],
        );
    }
}

pub fn render_not_found(frame: &mut Frame, area: Rect, route: &str) {
    let block = Block::default()
        .title(" Not Found ")
        .borders(Borders::ALL)
        .style(Styles::default());
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("404", Styles::critical())),
        Line::from(format!("No page at {}", route)),
        Line::from(Span::styled("Pick a page from the sidebar.", Styles::dim())),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}
