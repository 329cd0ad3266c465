//! dashkit - terminal admin dashboard built around a generic data grid.
//!
//! - [`grid`] - column synthesis, row model, selection and confirmation
//! - [`view`] - framework-free snapshots of a grid for rendering
//! - [`nav`], [`form`] - sidebar navigation and form state
//! - [`tui`] - the interactive dashboard

pub mod config;
pub mod form;
pub mod grid;
pub mod nav;
pub mod sample;
pub mod tui;
pub mod view;
