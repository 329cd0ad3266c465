//! Confirmation dialogs: quit and delete.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::tui::style::Styles;

/// Centered dialog area: 50% width, clamped.
fn dialog_rect(area: Rect, min_height: u16, max_height: u16) -> Rect {
    let width = (area.width * 50 / 100).clamp(40, 60).min(area.width);
    let height = area.height.clamp(min_height, max_height).min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn key_hint(keys: [&'static str; 2], action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(keys[0], Style::default().fg(Color::Yellow)),
        Span::styled(" or ", Style::default().fg(Color::DarkGray)),
        Span::styled(keys[1], Style::default().fg(Color::Yellow)),
        Span::styled(action, Style::default().fg(Color::DarkGray)),
    ])
}

/// Renders a centered quit confirmation popup.
pub fn render_quit_confirm(frame: &mut Frame, area: Rect) {
    let popup_area = dialog_rect(area, 7, 9);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Exit dashkit ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let content = vec![
        Line::from(Span::styled(
            "Are you sure you want to quit?",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        key_hint(["Enter", "q"], " → quit"),
        key_hint(["Esc", "n"], " → cancel"),
    ];

    let paragraph = Paragraph::new(content)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White));
    frame.render_widget(paragraph, inner);
}

/// Renders the destructive-action dialog of a grid.
pub fn render_delete_confirm(
    frame: &mut Frame,
    area: Rect,
    heading: &str,
    description: &str,
    confirm_label: &str,
) {
    let popup_area = dialog_rect(area, 9, 11);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} ", heading))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let content = vec![
        Line::from(Span::styled(description.to_string(), Styles::popup())),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::styled(" or ", Style::default().fg(Color::DarkGray)),
            Span::styled("y", Style::default().fg(Color::Yellow)),
            Span::styled(" → ", Style::default().fg(Color::DarkGray)),
            Span::styled(confirm_label.to_string(), Styles::critical()),
        ]),
        key_hint(["Esc", "n"], " → cancel"),
    ];

    let paragraph = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);
}
