//! Color scheme and styles.

use ratatui::style::{Color, Modifier, Style};

/// Dashboard color palette.
pub struct Theme;

impl Theme {
    // Background colors
    pub const BG: Color = Color::Reset;
    pub const HEADER_BG: Color = Color::Blue;
    pub const SELECTED_BG: Color = Color::DarkGray;
    pub const POPUP_BG: Color = Color::Black;

    // Foreground colors
    pub const FG: Color = Color::White;
    pub const FG_DIM: Color = Color::DarkGray;
    pub const HEADER_FG: Color = Color::White;

    // Highlight colors
    pub const HIGHLIGHT_NOTICE: Color = Color::Yellow;
    pub const HIGHLIGHT_CRITICAL: Color = Color::Red;
    pub const ACCENT: Color = Color::Cyan;

    // Sidebar colors
    pub const NAV_ACTIVE: Color = Color::Cyan;
    pub const NAV_INACTIVE: Color = Color::Gray;
}

/// Pre-defined styles.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Theme::FG).bg(Theme::BG)
    }

    /// Header bar style.
    pub fn header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected row style.
    pub fn selected() -> Style {
        Style::default()
            .bg(Theme::SELECTED_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Table header style.
    pub fn table_header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Header cell of the column targeted by sort keys.
    pub fn table_header_focused() -> Style {
        Self::table_header().add_modifier(Modifier::UNDERLINED)
    }

    /// Checked rows that are not under the cursor.
    pub fn checked_row() -> Style {
        Style::default().fg(Theme::ACCENT)
    }

    /// Status message style (yellow).
    pub fn notice() -> Style {
        Style::default().fg(Theme::HIGHLIGHT_NOTICE)
    }

    /// Destructive actions and validation errors (red).
    pub fn critical() -> Style {
        Style::default()
            .fg(Theme::HIGHLIGHT_CRITICAL)
            .add_modifier(Modifier::BOLD)
    }

    /// Current sidebar entry or breadcrumb.
    pub fn nav_active() -> Style {
        Style::default()
            .fg(Theme::NAV_ACTIVE)
            .add_modifier(Modifier::BOLD)
    }

    pub fn nav_inactive() -> Style {
        Style::default().fg(Theme::NAV_INACTIVE)
    }

    /// Dimmed text style.
    pub fn dim() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// Border of the pane that has focus.
    pub fn focused_border() -> Style {
        Style::default().fg(Theme::ACCENT)
    }

    pub fn unfocused_border() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// Filter input style.
    pub fn filter_input() -> Style {
        Style::default()
            .fg(Theme::FG)
            .add_modifier(Modifier::UNDERLINED)
    }

    /// Section header style for popups and forms.
    pub fn section_header() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    /// Popup body style.
    pub fn popup() -> Style {
        Style::default().fg(Theme::FG).bg(Theme::POPUP_BG)
    }

    /// Help text style.
    pub fn help() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// Help key style (highlighted keys in help line).
    pub fn help_key() -> Style {
        Style::default().fg(Color::Yellow)
    }
}
