//! Sidebar widget: sections, groups and links.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::nav::SidebarEntry;
use crate::tui::state::{AppState, Focus};
use crate::tui::style::Styles;

/// Short glyph for a configured icon name.
fn icon_glyph(icon: Option<&str>) -> &'static str {
    match icon {
        Some("home") => "⌂",
        Some("settings") => "⚙",
        Some("clipboard") => "▤",
        Some("database") => "◫",
        Some("users") => "☺",
        Some(_) => "•",
        None => " ",
    }
}

pub fn render_sidebar(frame: &mut Frame, area: Rect, state: &AppState) {
    let sidebar = &state.sidebar;
    let collapsed = sidebar.is_collapsed();
    let focused = state.focus == Focus::Sidebar;
    let cursor = sidebar.cursor_entry();

    let lines: Vec<Line> = sidebar
        .entries()
        .into_iter()
        .map(|entry| {
            let (icon, text) = sidebar.entry_text(entry);
            let is_cursor = focused && cursor == Some(entry);
            let is_current = sidebar.entry_url(entry) == Some(state.route.as_str());
            let style = if is_cursor {
                Styles::selected()
            } else if is_current {
                Styles::nav_active()
            } else {
                Styles::nav_inactive()
            };

            match entry {
                SidebarEntry::Label { .. } => {
                    Line::from(Span::styled(text.to_string(), Styles::dim()))
                }
                _ if collapsed => {
                    Line::from(Span::styled(format!(" {} ", icon_glyph(icon)), style))
                }
                SidebarEntry::Leaf { .. } => {
                    Line::from(Span::styled(format!(" {} {}", icon_glyph(icon), text), style))
                }
                SidebarEntry::Group { open, .. } => {
                    let chevron = if open { "▾" } else { "▸" };
                    Line::from(Span::styled(
                        format!(" {} {} {}", icon_glyph(icon), text, chevron),
                        style,
                    ))
                }
                SidebarEntry::Link { .. } => {
                    Line::from(Span::styled(format!("   │ {}", text), style))
                }
            }
        })
        .collect();

    let title = if collapsed {
        String::new()
    } else {
        format!(" {} ", state.user.workspace)
    };
    let border_style = if focused {
        Styles::focused_border()
    } else {
        Styles::unfocused_border()
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
        .style(Styles::default());
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
