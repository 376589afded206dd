//! Host surface the form behavior is wired against.

/// A form renderer hosting the webhook editor.
///
/// The handler table talks to the host exclusively through this trait:
/// reading the bound record's current field values and toggling field
/// visibility. Implemented by the TUI editor component and by test
/// fakes.
pub trait FormHost {
    /// Current value of a field on the bound record. None for fields
    /// the host does not know about.
    fn field_value(&self, field: &str) -> Option<String>;

    /// Show or hide a group of fields. Idempotent; hiding an already
    /// hidden field is a no-op.
    fn set_fields_visible(&mut self, fields: &[&str], visible: bool);
}
