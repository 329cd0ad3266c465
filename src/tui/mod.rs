//! Terminal user interface for the dashboard.
//!
//! Sidebar navigation on the left, the routed page on the right, popups on
//! top. Pages are data grids, forms or static panels.

mod app;
mod event;
mod input;
pub mod pages;
mod render;
mod state;
mod style;
mod widgets;

pub use app::App;
pub use state::{AppState, Focus, InputMode, Page};
