//! Command-handling boundary and reply text

pub mod format;
pub mod handler;

pub use format::{render, render_error, HELP_TEXT};
pub use handler::LeagueBot;
