//! Handler table connecting form events to form behavior.
//!
//! Hosts dispatch two kinds of events: a generic on-display event when
//! the form is first shown, and per-field on-change events as the user
//! edits. Handlers are plain functions registered once when the table
//! is built.

use crate::form::host::FormHost;
use crate::form::visibility::{visible_fields, BASIC_AUTH_FIELDS, OAUTH1_FIELDS};

/// Event kinds a form host can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    /// The form was (re)displayed with its current record.
    Refresh,
    /// The named field changed value.
    FieldChange(&'static str),
}

/// A form behavior callback. Handlers read record state through the
/// host and instruct it to update visibility; they perform no I/O.
pub type Handler = fn(&mut dyn FormHost);

/// Ordered registry of `(event, handler)` pairs.
pub struct HandlerTable {
    entries: Vec<(FormEvent, Handler)>,
}

impl HandlerTable {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a handler for an event. Multiple handlers may be
    /// registered for the same event; dispatch preserves registration
    /// order.
    pub fn register(&mut self, event: FormEvent, handler: Handler) {
        self.entries.push((event, handler));
    }

    /// Invoke every handler registered for `event`. Returns how many
    /// handlers ran.
    pub fn dispatch(&self, event: FormEvent, host: &mut dyn FormHost) -> usize {
        let mut ran = 0;
        for (registered, handler) in &self.entries {
            if *registered == event {
                handler(host);
                ran += 1;
            }
        }
        ran
    }
}

impl Default for HandlerTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the handler table for the webhook editor form.
///
/// The credential-field toggle runs when the form is displayed and
/// whenever the authentication selector changes.
pub fn webhook_handlers() -> HandlerTable {
    let mut table = HandlerTable::new();
    table.register(FormEvent::Refresh, toggle_auth_fields);
    table.register(
        FormEvent::FieldChange("authentication_type"),
        toggle_auth_fields,
    );
    table
}

/// Recompute credential-field visibility from the current
/// `authentication_type` value.
///
/// Each field group is toggled as a whole: a group is shown only when
/// the visibility rule includes all of its fields.
fn toggle_auth_fields(host: &mut dyn FormHost) {
    let auth = host.field_value("authentication_type").unwrap_or_default();
    let visible = visible_fields(&auth);

    for group in [&BASIC_AUTH_FIELDS[..], &OAUTH1_FIELDS[..]] {
        let show = group.iter().all(|field| visible.contains(field));
        host.set_fields_visible(group, show);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::visibility::TRACKED_FIELDS;
    use crate::model::webhook::{AuthType, Webhook};
    use std::collections::BTreeSet;

    /// Minimal form host: a bound webhook record plus a visibility set.
    struct FakeForm {
        record: Webhook,
        visible: BTreeSet<String>,
        toggle_calls: usize,
    }

    impl FakeForm {
        fn new(auth: AuthType) -> Self {
            let mut record = Webhook::new("test-hook");
            record.authentication_type = auth;
            // Hosts typically start with every optional field visible
            // until the first refresh runs.
            Self {
                record,
                visible: TRACKED_FIELDS.iter().map(|f| f.to_string()).collect(),
                toggle_calls: 0,
            }
        }

        fn shown(&self, field: &str) -> bool {
            self.visible.contains(field)
        }
    }

    impl FormHost for FakeForm {
        fn field_value(&self, field: &str) -> Option<String> {
            self.record.field_value(field)
        }

        fn set_fields_visible(&mut self, fields: &[&str], visible: bool) {
            self.toggle_calls += 1;
            for field in fields {
                if visible {
                    self.visible.insert(field.to_string());
                } else {
                    self.visible.remove(*field);
                }
            }
        }
    }

    #[test]
    fn refresh_with_basic_auth_shows_only_basic_fields() {
        let table = webhook_handlers();
        let mut form = FakeForm::new(AuthType::Basic);

        let ran = table.dispatch(FormEvent::Refresh, &mut form);
        assert_eq!(ran, 1);

        assert!(form.shown("username"));
        assert!(form.shown("password"));
        assert!(!form.shown("client_key"));
        assert!(!form.shown("client_secret"));
        assert!(!form.shown("resource_owner_key"));
        assert!(!form.shown("resource_owner_secret"));
    }

    #[test]
    fn changing_selector_to_oauth1_flips_both_groups() {
        let table = webhook_handlers();
        let mut form = FakeForm::new(AuthType::Basic);
        table.dispatch(FormEvent::Refresh, &mut form);

        form.record.authentication_type = AuthType::OAuth1;
        let ran = table.dispatch(FormEvent::FieldChange("authentication_type"), &mut form);
        assert_eq!(ran, 1);

        assert!(!form.shown("username"));
        assert!(!form.shown("password"));
        assert!(form.shown("client_key"));
        assert!(form.shown("client_secret"));
        assert!(form.shown("resource_owner_key"));
        assert!(form.shown("resource_owner_secret"));
    }

    #[test]
    fn refresh_with_no_auth_hides_all_six_fields() {
        let table = webhook_handlers();
        let mut form = FakeForm::new(AuthType::None);

        table.dispatch(FormEvent::Refresh, &mut form);

        for field in TRACKED_FIELDS {
            assert!(!form.shown(field), "{} should be hidden", field);
        }
    }

    #[test]
    fn repeated_refresh_is_idempotent() {
        let table = webhook_handlers();
        let mut form = FakeForm::new(AuthType::Basic);

        table.dispatch(FormEvent::Refresh, &mut form);
        let after_first = form.visible.clone();
        table.dispatch(FormEvent::Refresh, &mut form);

        assert_eq!(form.visible, after_first);
    }

    #[test]
    fn unrelated_field_changes_dispatch_no_handlers() {
        let table = webhook_handlers();
        let mut form = FakeForm::new(AuthType::Basic);

        let ran = table.dispatch(FormEvent::FieldChange("username"), &mut form);
        assert_eq!(ran, 0);
        assert_eq!(form.toggle_calls, 0);
    }

    #[test]
    fn dispatch_preserves_registration_order() {
        fn first(host: &mut dyn FormHost) {
            host.set_fields_visible(&["username"], true);
        }
        fn second(host: &mut dyn FormHost) {
            host.set_fields_visible(&["username"], false);
        }

        let mut table = HandlerTable::new();
        table.register(FormEvent::Refresh, first);
        table.register(FormEvent::Refresh, second);

        let mut form = FakeForm::new(AuthType::None);
        let ran = table.dispatch(FormEvent::Refresh, &mut form);

        assert_eq!(ran, 2);
        // The later registration ran last.
        assert!(!form.shown("username"));
    }
}
