//! Platform-specific config and data directory helpers.
//!
//! Uses the `dirs` crate to resolve platform-appropriate directories:
//! - Linux:   `~/.config/hookline/` (config), `~/.local/share/hookline/` (data)
//! - Windows: `%APPDATA%\hookline\` (config), `%APPDATA%\hookline\` (data)
//! - macOS:   `~/Library/Application Support/hookline/` (both)

use std::path::PathBuf;

use crate::error::HookError;

/// Get the hookline config directory, creating it if needed.
///
/// Holds `webhooks.toml` with the configured webhook definitions.
pub fn hookline_config_dir() -> Result<PathBuf, HookError> {
    let base = dirs::config_dir()
        .ok_or_else(|| HookError::Config("Could not determine config directory".into()))?;
    let dir = base.join("hookline");
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}

/// Get the hookline data directory, creating it if needed.
///
/// Holds the delivery log and its lock file.
pub fn hookline_data_dir() -> Result<PathBuf, HookError> {
    let base = dirs::data_dir()
        .ok_or_else(|| HookError::Config("Could not determine data directory".into()))?;
    let dir = base.join("hookline");
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}
