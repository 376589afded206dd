//! Command-line surface: argument definitions and command handlers.

pub mod args;
pub mod commands;
