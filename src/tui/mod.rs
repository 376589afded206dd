mod action;
mod app;
mod event;
mod terminal;
pub mod components;
pub mod theme;

use crate::error::HookError;

/// Launch the interactive TUI mode.
///
/// Creates a tokio runtime and runs the async TUI event loop.
/// Terminal is initialized with alternate screen and raw mode,
/// and restored on exit (including on panic).
pub fn launch_tui() -> Result<(), HookError> {
    let rt = tokio::runtime::Runtime::new().map_err(|e| HookError::Io { source: e })?;
    rt.block_on(app::run_app())
}
