use ratatui::DefaultTerminal;

/// Initialize the terminal for TUI rendering.
///
/// `ratatui::init()` enables the alternate screen and raw mode and
/// installs panic hooks that restore the terminal.
pub fn init() -> DefaultTerminal {
    ratatui::init()
}

/// Restore the terminal to its original state (raw mode off, alternate
/// screen left, cursor shown).
pub fn restore() {
    ratatui::restore();
}
