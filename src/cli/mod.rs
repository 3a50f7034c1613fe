// src/cli/mod.rs
//! CLI command handlers.

pub mod args;
pub mod handlers;

pub use args::{Cli, Commands, ViewArgs};
pub use handlers::{handle_crumbs, handle_dot, handle_highlight, handle_stats, load_config};
