//! Header user menu popup.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::config::UserProfile;
use crate::tui::state::UserMenuItem;
use crate::tui::style::Styles;

const MENU_WIDTH: u16 = 34;

/// Renders the user menu in the top-right corner, below the header.
pub fn render_user_menu(frame: &mut Frame, area: Rect, user: &UserProfile, cursor: usize) {
    let items = UserMenuItem::all();
    let width = MENU_WIDTH.min(area.width);
    let height = (items.len() as u16 + 7).min(area.height.saturating_sub(1));
    let popup_area = Rect::new(area.right().saturating_sub(width), area.y + 1, width, height);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Account ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Styles::popup());

    let mut lines = vec![
        Line::from(Span::styled(user.name.clone(), Styles::section_header())),
        Line::from(Span::styled(user.email.clone(), Styles::dim())),
        Line::from(Span::styled(
            format!("{} · {}", user.workspace, user.workspace_url),
            Styles::dim(),
        )),
        Line::from(format!("Your Role is {}", user.role)),
        Line::from(""),
    ];
    lines.extend(items.iter().enumerate().map(|(i, item)| {
        let style = if i == cursor {
            Styles::selected()
        } else if *item == UserMenuItem::SignOut {
            Styles::critical()
        } else {
            Styles::popup()
        };
        Line::from(Span::styled(format!(" {}", item.label()), style))
    }));

    frame.render_widget(Paragraph::new(lines).block(block), popup_area);
}
