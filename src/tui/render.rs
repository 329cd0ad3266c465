//! Main rendering logic for TUI.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use super::state::{AppState, Page, PopupState};
use super::widgets::{
    render_detail, render_edit_form, render_form, render_grid, render_header, render_help,
    render_not_found, render_overview, render_quit_confirm, render_sidebar, render_user_menu,
};

const SIDEBAR_WIDTH: u16 = 28;
const SIDEBAR_COLLAPSED_WIDTH: u16 = 7;

/// Main render function.
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();

    // Main layout: header, body
    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Min(5),    // Sidebar + content
    ])
    .split(area);

    render_header(frame, chunks[0], state);

    let sidebar_width = if state.sidebar.is_collapsed() {
        SIDEBAR_COLLAPSED_WIDTH
    } else {
        SIDEBAR_WIDTH
    };
    let body = Layout::horizontal([Constraint::Length(sidebar_width), Constraint::Min(20)])
        .split(chunks[1]);

    render_sidebar(frame, body[0], state);
    render_content(frame, body[1], state);

    // Popups (rendered last to overlay everything)
    render_popup(frame, area, state);
}

/// Renders the page selected by the current route.
fn render_content(frame: &mut Frame, area: Rect, state: &AppState) {
    match state.page {
        Page::Overview => render_overview(frame, area, state),
        Page::Users | Page::Posts | Page::Categories => render_grid(frame, area, state),
        Page::CreatePost | Page::Settings => render_form(frame, area, state),
        Page::NotFound => render_not_found(frame, area, &state.route),
    }
}

fn render_popup(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let page = state.page;
    let has_filter = state.grid_pane().is_some_and(|p| p.has_quick_filter());
    let user = state.user.clone();
    match &mut state.popup {
        PopupState::None => {}
        PopupState::Help { scroll } => render_help(frame, area, page, has_filter, scroll),
        PopupState::QuitConfirm => render_quit_confirm(frame, area),
        PopupState::UserMenu { cursor } => render_user_menu(frame, area, &user, *cursor),
        PopupState::Detail {
            title,
            lines,
            scroll,
        } => render_detail(frame, area, title, lines, scroll),
        PopupState::EditForm { form, .. } => render_edit_form(frame, area, form),
    }
}
