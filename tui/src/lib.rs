//! Trailview TUI - Terminal interface for browsing Papertrail logs
//!
//! This crate is the full-screen surface over `trailview-core`: it owns the
//! terminal, turns crossterm events into engine input, runs fetches on
//! background tasks and draws the controller's state with ratatui.
//!
//! # Architecture
//!
//! - **App**: Event loop, fetch task management and frame composition
//! - **Input**: crossterm key events to engine keys
//! - **Widgets**: Entry list, payload view and the boxed chrome
//! - **Theme**: Row, badge and payload token colors

pub mod app;
pub mod config;
pub mod input;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use config::AppConfig;
