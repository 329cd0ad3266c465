//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::form::{FieldKind, FormState};

use super::pages::{GridOp, GridPane};
use super::state::{AppState, Focus, InputMode, PopupState, UserMenuItem};

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
}

/// Handles key input and updates state.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> KeyAction {
    state.status_message = None;
    let action = if state.popup.is_open() {
        handle_popup(state, key)
    } else {
        match state.input_mode {
            InputMode::Normal => handle_normal_mode(state, key),
            InputMode::Filter => handle_filter_mode(state, key),
            InputMode::Form => handle_form_mode(state, key),
        }
    };
    state.drain_grid_events();
    action
}

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.code == KeyCode::Char(c) && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn handle_popup(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if matches!(state.popup, PopupState::QuitConfirm) {
        return handle_quit_confirm(state, key);
    }
    let is_help = matches!(state.popup, PopupState::Help { .. });
    match &mut state.popup {
        PopupState::None | PopupState::QuitConfirm => KeyAction::None,
        PopupState::Help { scroll } | PopupState::Detail { scroll, .. } => {
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => *scroll = scroll.saturating_sub(1),
                // Clamped during render
                KeyCode::Down | KeyCode::Char('j') => *scroll = scroll.saturating_add(1),
                KeyCode::PageUp => *scroll = scroll.saturating_sub(10),
                KeyCode::PageDown => *scroll = scroll.saturating_add(10),
                KeyCode::Esc | KeyCode::Char('q') => state.popup = PopupState::None,
                KeyCode::Char('?') if is_help => state.popup = PopupState::None,
                KeyCode::Enter if !is_help => state.popup = PopupState::None,
                _ => {}
            }
            KeyAction::None
        }
        PopupState::UserMenu { cursor } => {
            let items = UserMenuItem::all();
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => *cursor = cursor.saturating_sub(1),
                KeyCode::Down | KeyCode::Char('j') => {
                    *cursor = (*cursor + 1).min(items.len() - 1);
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    let item = items[(*cursor).min(items.len() - 1)];
                    state.activate_user_menu(item);
                }
                KeyCode::Esc | KeyCode::Char('u') | KeyCode::Char('q') => {
                    state.popup = PopupState::None;
                }
                _ => {}
            }
            KeyAction::None
        }
        PopupState::EditForm { form, .. } => {
            if is_ctrl(&key, 'c') {
                return KeyAction::Quit;
            }
            match edit_form(form, key) {
                FormKey::Submit => state.submit_edit_form(),
                FormKey::Cancel => state.popup = PopupState::None,
                FormKey::Handled => {}
            }
            KeyAction::None
        }
    }
}

fn handle_quit_confirm(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.popup = PopupState::None;
            KeyAction::Quit
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.popup = PopupState::None;
            KeyAction::Quit
        }
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
            state.popup = PopupState::None;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

/// Handles keys in normal mode.
fn handle_normal_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if is_ctrl(&key, 'c') {
        return KeyAction::Quit;
    }
    if is_ctrl(&key, 'b') {
        state.sidebar.toggle_collapsed();
        return KeyAction::None;
    }
    // Menus and dialogs inside the grid take every other key.
    if state.focus == Focus::Content
        && let Some(pane) = state.grid_pane_mut()
        && pane.overlay_open()
    {
        handle_grid_overlay(pane, key);
        return KeyAction::None;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => state.popup = PopupState::QuitConfirm,
        KeyCode::Char('?') => state.popup = PopupState::Help { scroll: 0 },
        KeyCode::Char('u') => state.popup = PopupState::UserMenu { cursor: 0 },
        KeyCode::Tab | KeyCode::BackTab => state.toggle_focus(),
        _ => match state.focus {
            Focus::Sidebar => handle_sidebar(state, key),
            Focus::Content => handle_content(state, key),
        },
    }
    KeyAction::None
}

fn handle_sidebar(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => state.sidebar.cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => state.sidebar.cursor_down(),
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('l') | KeyCode::Right => {
            if let Some(url) = state.sidebar.activate() {
                state.navigate(&url);
                state.set_focus(Focus::Content);
            }
        }
        _ => {}
    }
}

fn handle_content(state: &mut AppState, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        state.set_focus(Focus::Sidebar);
        return;
    }
    if key.code == KeyCode::Char('/') {
        let filter = state
            .grid_pane()
            .map(|p| (p.has_quick_filter(), p.quick_filter_value(), p.title().to_string()));
        match filter {
            Some((true, value, _)) => {
                state.filter_input = value;
                state.input_mode = InputMode::Filter;
            }
            Some((false, _, title)) => {
                state.status_message = Some(format!("{} has no quick filter", title));
            }
            None => {}
        }
        return;
    }

    let op = match key.code {
        KeyCode::Up | KeyCode::Char('k') => GridOp::CursorUp,
        KeyCode::Down | KeyCode::Char('j') => GridOp::CursorDown,
        KeyCode::Home | KeyCode::Char('g') => GridOp::CursorHome,
        KeyCode::End | KeyCode::Char('G') => GridOp::CursorEnd,
        KeyCode::Char(' ') => GridOp::ToggleRow,
        KeyCode::Char('a') => GridOp::TogglePage,
        KeyCode::Left | KeyCode::Char('h') => GridOp::FocusLeft,
        KeyCode::Right | KeyCode::Char('l') => GridOp::FocusRight,
        KeyCode::Char('s') => GridOp::Sort { multi: false },
        KeyCode::Char('S') => GridOp::Sort { multi: true },
        KeyCode::PageDown | KeyCode::Char('n') => GridOp::NextPage,
        KeyCode::PageUp | KeyCode::Char('p') => GridOp::PreviousPage,
        KeyCode::Enter => GridOp::OpenActions,
        KeyCode::Char('c') => GridOp::OpenColumns,
        KeyCode::Char('d') | KeyCode::Delete => GridOp::BulkDelete,
        _ => return,
    };
    if let Some(pane) = state.grid_pane_mut() {
        debug!(?op, "grid op");
        pane.apply(op);
    }
}

fn handle_grid_overlay(pane: &mut dyn GridPane, key: KeyEvent) {
    let op = match key.code {
        KeyCode::Up | KeyCode::Char('k') => GridOp::MenuUp,
        KeyCode::Down | KeyCode::Char('j') => GridOp::MenuDown,
        KeyCode::Enter | KeyCode::Char(' ') if pane.confirm_open() => GridOp::Confirm,
        KeyCode::Enter | KeyCode::Char(' ') => GridOp::MenuActivate,
        KeyCode::Char('y') if pane.confirm_open() => GridOp::Confirm,
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('q') => GridOp::Cancel,
        _ => return,
    };
    pane.apply(op);
}

/// Handles keys in filter mode.
fn handle_filter_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc => {
            // Cancel filter
            state.input_mode = InputMode::Normal;
            state.filter_input.clear();
            apply_current_filter(state);
        }
        KeyCode::Enter => {
            // Filter is already applied in real-time, just switch mode
            state.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            state.filter_input.pop();
            apply_current_filter(state);
        }
        KeyCode::Char(c) => {
            state.filter_input.push(c);
            apply_current_filter(state);
        }
        _ => {}
    }
    KeyAction::None
}

fn apply_current_filter(state: &mut AppState) {
    let text = state.filter_input.clone();
    if let Some(pane) = state.grid_pane_mut() {
        pane.apply(GridOp::QuickFilter(text));
    }
}

/// Outcome of a key sent to a form.
enum FormKey {
    Handled,
    Submit,
    Cancel,
}

fn edit_form(form: &mut FormState, key: KeyEvent) -> FormKey {
    if is_ctrl(&key, 's') {
        return FormKey::Submit;
    }
    if is_ctrl(&key, 'r') {
        form.toggle_reveal();
        return FormKey::Handled;
    }
    let kind = form.focused_field().map(|f| f.kind.clone());
    match key.code {
        KeyCode::Esc => return FormKey::Cancel,
        KeyCode::Enter => {
            if !matches!(kind, Some(FieldKind::Textarea)) {
                return FormKey::Submit;
            }
            form.insert_char('\n');
        }
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        KeyCode::Left => {
            form.cycle_option(false);
        }
        KeyCode::Right => {
            form.cycle_option(true);
        }
        KeyCode::Backspace => {
            form.backspace();
        }
        KeyCode::Char(' ') => match kind {
            Some(FieldKind::Switch) => {
                form.toggle_switch();
            }
            Some(FieldKind::Select { .. }) => {
                form.cycle_option(true);
            }
            _ => {
                form.insert_char(' ');
            }
        },
        KeyCode::Char(c) => {
            form.insert_char(c);
        }
        _ => {}
    }
    FormKey::Handled
}

/// Handles keys on a form page.
fn handle_form_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if is_ctrl(&key, 'c') {
        return KeyAction::Quit;
    }
    let Some(form) = state.page_form_mut() else {
        state.input_mode = InputMode::Normal;
        return handle_normal_mode(state, key);
    };
    match edit_form(form, key) {
        FormKey::Submit => state.submit_page_form(),
        FormKey::Cancel => {
            state.cancel_page_form();
            state.set_focus(Focus::Sidebar);
        }
        FormKey::Handled => {}
    }
    KeyAction::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::form::FieldValue;
    use crate::tui::state::Page;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..key(KeyCode::Char(c))
        }
    }

    fn state_at(route: &str) -> AppState {
        let mut state = AppState::new(&Config::builtin().unwrap()).unwrap();
        state.navigate(route);
        state.set_focus(Focus::Content);
        state
    }

    fn press(state: &mut AppState, codes: &[KeyCode]) {
        for code in codes {
            let _ = handle_key(state, key(*code));
        }
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            let _ = handle_key(state, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn quit_requires_confirmation_and_quits_on_qq() {
        let mut state = state_at("/dashboard/users");

        let action = handle_key(&mut state, key(KeyCode::Char('q')));
        assert_eq!(action, KeyAction::None);
        assert!(matches!(state.popup, PopupState::QuitConfirm));

        let action = handle_key(&mut state, key(KeyCode::Char('q')));
        assert_eq!(action, KeyAction::Quit);
        assert!(!state.popup.is_open());
    }

    #[test]
    fn quit_confirmation_cancels_on_esc() {
        let mut state = state_at("/dashboard");
        let _ = handle_key(&mut state, key(KeyCode::Char('q')));
        let action = handle_key(&mut state, key(KeyCode::Esc));
        assert_eq!(action, KeyAction::None);
        assert!(!state.popup.is_open());
    }

    #[test]
    fn sidebar_enter_navigates_and_focuses_content() {
        let mut state = AppState::new(&Config::builtin().unwrap()).unwrap();
        assert_eq!(state.focus, Focus::Sidebar);
        // Dashboard, Settings, Post (group), Data Master (group), Categories
        press(
            &mut state,
            &[KeyCode::Down, KeyCode::Down, KeyCode::Down, KeyCode::Down, KeyCode::Enter],
        );
        assert_eq!(state.page, Page::Categories);
        assert_eq!(state.route, "/dashboard/categories");
        assert_eq!(state.focus, Focus::Content);
    }

    #[test]
    fn filter_mode_is_live_and_esc_clears() {
        let mut state = state_at("/dashboard/users");
        press(&mut state, &[KeyCode::Char('/')]);
        assert_eq!(state.input_mode, InputMode::Filter);

        type_text(&mut state, "okafor");
        assert_eq!(state.users.grid().filtered_rows().len(), 8);
        assert_eq!(state.users.grid().quick_filter_value(), "okafor");

        press(&mut state, &[KeyCode::Enter]);
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.users.grid().filtered_rows().len(), 8);

        press(&mut state, &[KeyCode::Char('/'), KeyCode::Esc]);
        assert_eq!(state.users.grid().filtered_rows().len(), 24);
    }

    #[test]
    fn action_menu_view_opens_detail_popup() {
        let mut state = state_at("/dashboard/users");
        press(&mut state, &[KeyCode::Enter, KeyCode::Enter]);
        match &state.popup {
            PopupState::Detail { title, .. } => assert_eq!(title, "Users usr-001"),
            other => panic!("unexpected popup {:?}", other),
        }
        press(&mut state, &[KeyCode::Esc]);
        assert!(!state.popup.is_open());
    }

    #[test]
    fn delete_confirm_cancel_returns_to_menu() {
        let mut state = state_at("/dashboard/categories");
        // Categories: View, Delete
        press(&mut state, &[KeyCode::Enter, KeyCode::Down, KeyCode::Enter]);
        assert!(state.categories.confirm_open());

        press(&mut state, &[KeyCode::Esc]);
        assert!(!state.categories.confirm_open());
        assert!(state.categories.overlay_open());

        press(&mut state, &[KeyCode::Enter, KeyCode::Enter]);
        assert_eq!(state.categories.row_count(), 5);
        assert_eq!(state.status_message.as_deref(), Some("Deleted cat-01."));
        assert!(!state.categories.overlay_open());
    }

    #[test]
    fn edit_dialog_saves_row() {
        let mut state = state_at("/dashboard/posts");
        // View, Edit, Delete
        press(&mut state, &[KeyCode::Enter, KeyCode::Down, KeyCode::Enter]);
        assert!(matches!(state.popup, PopupState::EditForm { .. }));

        type_text(&mut state, "!");
        press(&mut state, &[KeyCode::Enter]);
        assert!(!state.popup.is_open());
        assert_eq!(state.posts.grid().rows()[0].title, "Getting started with the dashboard!");
        assert_eq!(state.status_message.as_deref(), Some("Saved post-001."));
    }

    #[test]
    fn bulk_delete_key_confirms_selection() {
        let mut state = state_at("/dashboard/users");
        press(&mut state, &[KeyCode::Char(' '), KeyCode::Down, KeyCode::Char(' ')]);
        press(&mut state, &[KeyCode::Char('d')]);
        assert!(state.users.confirm_open());
        press(&mut state, &[KeyCode::Char('y')]);
        assert_eq!(state.users.row_count(), 22);
        assert_eq!(state.users.grid().state().selected_count(), 0);
    }

    #[test]
    fn categories_quick_filter_matches_name() {
        let mut state = state_at("/dashboard/categories");
        press(&mut state, &[KeyCode::Char('/')]);
        assert_eq!(state.input_mode, InputMode::Filter);

        type_text(&mut state, "tra");
        press(&mut state, &[KeyCode::Enter]);
        assert_eq!(state.input_mode, InputMode::Normal);
        let rows = state.categories.grid().filtered_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Travel");
    }

    #[test]
    fn ctrl_c_quits_from_every_mode() {
        let mut state = state_at("/dashboard/users");
        assert_eq!(handle_key(&mut state, ctrl('c')), KeyAction::Quit);

        let mut state = state_at("/dashboard/settings");
        assert_eq!(state.input_mode, InputMode::Form);
        assert_eq!(handle_key(&mut state, ctrl('c')), KeyAction::Quit);

        let mut state = state_at("/dashboard/posts");
        press(&mut state, &[KeyCode::Enter, KeyCode::Down, KeyCode::Enter]);
        assert!(matches!(state.popup, PopupState::EditForm { .. }));
        assert_eq!(handle_key(&mut state, ctrl('c')), KeyAction::Quit);
    }

    #[test]
    fn form_page_typing_and_submit() {
        let mut state = state_at("/dashboard/posts/create");
        assert_eq!(state.input_mode, InputMode::Form);

        type_text(&mut state, "Hello");
        // category select
        press(&mut state, &[KeyCode::Tab, KeyCode::Char(' '), KeyCode::Tab]);
        type_text(&mut state, "Ada");
        // published switch, then body
        press(&mut state, &[KeyCode::Tab, KeyCode::Char(' '), KeyCode::Tab]);
        type_text(&mut state, "line");
        press(&mut state, &[KeyCode::Enter]);
        type_text(&mut state, "two");
        assert_eq!(
            state.create_post.value_of("body"),
            Some(&FieldValue::Text("line\ntwo".into()))
        );
        assert_eq!(
            state.create_post.value_of("published"),
            Some(&FieldValue::Bool(false))
        );

        let _ = handle_key(&mut state, ctrl('s'));
        assert_eq!(state.page, Page::Posts);
        assert_eq!(state.posts.row_count(), 16);
        let created = state.posts.grid().row_by_id("post-016").unwrap();
        assert_eq!(created.title, "Hello");
        assert!(!created.published);
    }

    #[test]
    fn form_escape_resets_and_leaves() {
        let mut state = state_at("/dashboard/settings");
        press(&mut state, &[KeyCode::Backspace]);
        press(&mut state, &[KeyCode::Esc]);
        assert_eq!(state.focus, Focus::Sidebar);
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(
            state.settings.value_of("username").and_then(FieldValue::as_text),
            Some("shadcn")
        );
    }

    #[test]
    fn user_menu_sign_out_asks_to_quit() {
        let mut state = state_at("/dashboard");
        press(&mut state, &[KeyCode::Char('u'), KeyCode::Up, KeyCode::End]);
        press(&mut state, &[KeyCode::Down, KeyCode::Down, KeyCode::Down, KeyCode::Enter]);
        assert!(matches!(state.popup, PopupState::QuitConfirm));
        assert_eq!(handle_key(&mut state, key(KeyCode::Enter)), KeyAction::Quit);
    }

    #[test]
    fn ctrl_b_collapses_sidebar() {
        let mut state = state_at("/dashboard");
        let _ = handle_key(&mut state, ctrl('b'));
        assert!(state.sidebar.is_collapsed());
    }
}
