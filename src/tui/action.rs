/// Actions that can be dispatched between TUI components.
///
/// Each component's `handle_key_event` returns an Action,
/// and the App's main loop processes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No operation -- event was handled but no further action needed.
    Noop,
    /// Quit the TUI application.
    Quit,
    /// Open the named webhook in the editor.
    Edit(String),
    /// Persist the editor's record to the webhook store.
    Save,
    /// Leave the editor and return to the webhook list.
    Back,
    /// Scroll up in the active view.
    ScrollUp,
    /// Scroll down in the active view.
    ScrollDown,
}
