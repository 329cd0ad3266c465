//! Header widget showing breadcrumbs, status and time.

use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::nav::breadcrumbs;
use crate::tui::state::{AppState, InputMode};
use crate::tui::style::{Styles, Theme};

/// Renders the header bar.
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::horizontal([
        Constraint::Length(4),  // Sidebar trigger
        Constraint::Min(20),    // Breadcrumbs
        Constraint::Length(40), // Filter/Status/User
        Constraint::Length(20), // Time
    ])
    .split(area);

    let trigger = if state.sidebar.is_collapsed() { " ▶ " } else { " ◀ " };
    frame.render_widget(Paragraph::new(trigger).style(Styles::header()), chunks[0]);

    // Breadcrumbs; the root shows a single current crumb.
    let crumbs = breadcrumbs(&state.route);
    let mut spans = Vec::with_capacity(crumbs.len() * 2 + 1);
    if crumbs.is_empty() {
        spans.push(Span::styled("Dashboard", Styles::header()));
    }
    for (i, crumb) in crumbs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" › ", Styles::header()));
        }
        let style = if crumb.is_last {
            Styles::header()
        } else {
            Styles::dim().bg(Theme::HEADER_BG)
        };
        spans.push(Span::styled(crumb.label.clone(), style));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Styles::header()),
        chunks[1],
    );

    // Filter input, status message or signed-in user
    let (right_content, right_style) = if let Some(msg) = &state.status_message {
        (msg.clone(), Styles::notice().bg(Theme::HEADER_BG))
    } else if state.input_mode == InputMode::Filter {
        (format!("Filter: {}█", state.filter_input), Styles::filter_input())
    } else {
        (
            format!("{} ({})  u: menu  ?: help", state.user.name, state.user.role),
            Styles::header(),
        )
    };
    frame.render_widget(Paragraph::new(right_content).style(right_style), chunks[2]);

    let time_str = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    frame.render_widget(Paragraph::new(time_str).style(Styles::header()), chunks[3]);
}
