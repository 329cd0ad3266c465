//! TUI widgets for the dashboard.

mod confirm;
mod detail;
mod form;
mod grid;
mod header;
mod help;
mod overview;
mod sidebar;
mod user_menu;

pub use confirm::{render_delete_confirm, render_quit_confirm};
pub use detail::{centered_rect, render_detail};
pub use form::{render_edit_form, render_form};
pub use grid::render_grid;
pub use header::render_header;
pub use help::render_help;
pub use overview::{render_not_found, render_overview};
pub use sidebar::render_sidebar;
pub use user_menu::render_user_menu;
