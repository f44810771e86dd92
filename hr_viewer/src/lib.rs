//! Internal modules for the hand replay viewer.
//!
//! This library provides configuration, command parsing, key bindings and
//! the terminal UI used by the hr_viewer binary.

pub mod commands;
pub mod config;
pub mod keymap;
pub mod logging;
pub mod tui_app;
