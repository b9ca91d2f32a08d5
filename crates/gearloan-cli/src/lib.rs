// Rust guideline compliant 2026-10-19

//! Gearloan CLI library.
//!
//! This library exposes the CLI modules for use in tests and external code.

pub mod commands;
pub mod logging;
pub mod output;
pub mod session;
pub mod terminal;

pub use commands::{run, Command};
pub use output::{create_formatter, OutputFormatter};
pub use terminal::{get_terminal_width, should_use_color, wrap_text};
