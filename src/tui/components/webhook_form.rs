//! Webhook editor form.
//!
//! The form binds one webhook record and renders an authentication
//! selector plus the credential fields relevant to it. It is the live
//! `FormHost`: visibility is driven entirely by the handler table,
//! dispatched once when a record is opened and again on every selector
//! change.

use std::collections::BTreeSet;

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::Component;
use crate::form::host::FormHost;
use crate::form::registry::{webhook_handlers, FormEvent, HandlerTable};
use crate::form::visibility::TRACKED_FIELDS;
use crate::model::webhook::Webhook;
use crate::tui::action::Action;
use crate::tui::theme;

/// The authentication selector field name.
const AUTH_FIELD: &str = "authentication_type";

/// Fields rendered masked.
const SECRET_FIELDS: [&str; 3] = ["password", "client_secret", "resource_owner_secret"];

/// Editor form component for one webhook record.
pub struct WebhookFormComponent {
    record: Option<Webhook>,
    handlers: HandlerTable,
    /// Tracked fields currently shown. Untracked fields (the selector)
    /// are always shown.
    visible: BTreeSet<&'static str>,
    /// Focus index into `rows()`.
    focus: usize,
    /// Edit buffer while a text field is being edited.
    editing: Option<String>,
    dirty: bool,
}

impl WebhookFormComponent {
    pub fn new() -> Self {
        Self {
            record: None,
            handlers: webhook_handlers(),
            visible: BTreeSet::new(),
            focus: 0,
            editing: None,
            dirty: false,
        }
    }

    /// Bind a record and run the on-display handlers.
    ///
    /// All tracked fields start visible; the refresh dispatch
    /// immediately recomputes visibility from the record's current
    /// authentication type.
    pub fn open(&mut self, record: Webhook) {
        self.record = Some(record);
        self.visible = TRACKED_FIELDS.iter().copied().collect();
        self.focus = 0;
        self.editing = None;
        self.dirty = false;
        self.run_handlers(FormEvent::Refresh);
    }

    /// The record currently bound to the form.
    pub fn record(&self) -> Option<&Webhook> {
        self.record.as_ref()
    }

    /// Whether the bound record has unsaved edits.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Called by the app after a successful save.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Whether keystrokes are being captured into an edit buffer.
    /// Global key bindings must not fire while this is true.
    pub fn capturing_input(&self) -> bool {
        self.editing.is_some()
    }

    /// Currently visible form rows: the selector, then the visible
    /// tracked fields in declaration order.
    fn rows(&self) -> Vec<&'static str> {
        let mut rows = vec![AUTH_FIELD];
        rows.extend(TRACKED_FIELDS.iter().filter(|f| self.visible.contains(*f)));
        rows
    }

    fn focused_field(&self) -> Option<&'static str> {
        self.rows().get(self.focus).copied()
    }

    /// Dispatch a form event through the handler table with this
    /// component as the host.
    fn run_handlers(&mut self, event: FormEvent) {
        let handlers = std::mem::take(&mut self.handlers);
        handlers.dispatch(event, self);
        self.handlers = handlers;
    }

    /// Cycle the authentication selector and re-run the field-change
    /// handlers. The visible row set may shrink, so focus is clamped.
    fn cycle_auth(&mut self, forward: bool) {
        let Some(record) = self.record.as_mut() else {
            return;
        };
        record.authentication_type = if forward {
            record.authentication_type.next()
        } else {
            record.authentication_type.prev()
        };
        self.dirty = true;
        self.run_handlers(FormEvent::FieldChange(AUTH_FIELD));

        let row_count = self.rows().len();
        if self.focus >= row_count {
            self.focus = row_count - 1;
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char(c) => {
                if let Some(buffer) = self.editing.as_mut() {
                    buffer.push(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(buffer) = self.editing.as_mut() {
                    buffer.pop();
                }
            }
            KeyCode::Enter => {
                let value = self.editing.take().unwrap_or_default();
                let field = self.focused_field();
                if let (Some(field), Some(record)) = (field, self.record.as_mut()) {
                    if record.set_field_value(field, &value) {
                        self.dirty = true;
                    }
                }
            }
            KeyCode::Esc => {
                self.editing = None;
            }
            _ => {}
        }
        Action::Noop
    }

    fn field_display(&self, field: &'static str) -> String {
        let value = self
            .record
            .as_ref()
            .and_then(|r| r.field_value(field))
            .unwrap_or_default();
        if SECRET_FIELDS.contains(&field) && !value.is_empty() {
            "*".repeat(value.chars().count())
        } else {
            value
        }
    }
}

impl FormHost for WebhookFormComponent {
    fn field_value(&self, field: &str) -> Option<String> {
        self.record.as_ref().and_then(|r| r.field_value(field))
    }

    fn set_fields_visible(&mut self, fields: &[&str], visible: bool) {
        for &field in fields {
            // Only tracked fields are toggled; the keys are interned
            // against the tracked list so the set stays 'static.
            let Some(tracked) = TRACKED_FIELDS.iter().copied().find(|t| *t == field) else {
                continue;
            };
            if visible {
                self.visible.insert(tracked);
            } else {
                self.visible.remove(tracked);
            }
        }
    }
}

impl Component for WebhookFormComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Action {
        if self.capturing_input() {
            return self.handle_edit_key(key);
        }
        if self.record.is_none() {
            return Action::Noop;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                let rows = self.rows().len();
                self.focus = if self.focus == 0 { rows - 1 } else { self.focus - 1 };
                Action::ScrollUp
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let rows = self.rows().len();
                self.focus = (self.focus + 1) % rows;
                Action::ScrollDown
            }
            KeyCode::Left | KeyCode::Char('h') => {
                if self.focused_field() == Some(AUTH_FIELD) {
                    self.cycle_auth(false);
                }
                Action::Noop
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.focused_field() == Some(AUTH_FIELD) {
                    self.cycle_auth(true);
                }
                Action::Noop
            }
            KeyCode::Enter => {
                match self.focused_field() {
                    Some(AUTH_FIELD) => self.cycle_auth(true),
                    Some(field) => {
                        let current = self
                            .record
                            .as_ref()
                            .and_then(|r| r.field_value(field))
                            .unwrap_or_default();
                        self.editing = Some(current);
                    }
                    None => {}
                }
                Action::Noop
            }
            KeyCode::Char('w') => Action::Save,
            KeyCode::Esc => Action::Back,
            _ => Action::Noop,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(" Editor ");

        let Some(record) = self.record.as_ref() else {
            let empty = Paragraph::new("Select a webhook on the Webhooks tab and press Enter.")
                .style(theme::FIELD_LABEL)
                .block(block);
            frame.render_widget(empty, area);
            return;
        };

        let mut lines: Vec<Line> = Vec::new();
        let title = format!(
            "{}{}  ({})",
            record.name,
            if self.dirty { " *" } else { "" },
            if record.enabled { "enabled" } else { "disabled" }
        );
        lines.push(Line::from(Span::styled(title, theme::HEADER)));
        lines.push(Line::default());

        for (i, field) in self.rows().into_iter().enumerate() {
            let focused = i == self.focus;
            let label = format!("{:<24}", field);

            let value_span = if field == AUTH_FIELD {
                Span::raw(format!("< {} >", record.authentication_type))
            } else if focused && self.editing.is_some() {
                let buffer = self.editing.as_deref().unwrap_or_default();
                let shown = if SECRET_FIELDS.contains(&field) {
                    "*".repeat(buffer.chars().count())
                } else {
                    buffer.to_string()
                };
                Span::styled(format!("{}_", shown), theme::EDITING)
            } else {
                Span::raw(self.field_display(field))
            };

            let label_style = if focused {
                theme::SELECTED
            } else {
                theme::FIELD_LABEL
            };
            lines.push(Line::from(vec![
                Span::styled(label, label_style),
                value_span,
            ]));
        }

        let paragraph = Paragraph::new(lines).block(block);
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::webhook::AuthType;
    use ratatui::crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    fn test_key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::empty(),
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        }
    }

    fn open_form(auth: AuthType) -> WebhookFormComponent {
        let mut record = Webhook::new("billing");
        record.authentication_type = auth;
        let mut form = WebhookFormComponent::new();
        form.open(record);
        form
    }

    #[test]
    fn open_with_basic_shows_selector_and_basic_fields() {
        let form = open_form(AuthType::Basic);
        assert_eq!(
            form.rows(),
            vec!["authentication_type", "username", "password"]
        );
    }

    #[test]
    fn open_with_no_auth_shows_only_selector() {
        let form = open_form(AuthType::None);
        assert_eq!(form.rows(), vec!["authentication_type"]);
    }

    #[test]
    fn cycling_selector_to_oauth1_swaps_field_groups() {
        let mut form = open_form(AuthType::Basic);
        // Basic -> OAuth 1
        form.handle_key_event(test_key(KeyCode::Right));
        assert_eq!(
            form.rows(),
            vec![
                "authentication_type",
                "client_key",
                "client_secret",
                "resource_owner_key",
                "resource_owner_secret",
            ]
        );
        assert!(form.is_dirty());
    }

    #[test]
    fn focus_clamps_when_rows_shrink() {
        let mut form = open_form(AuthType::OAuth1);
        // Focus the last OAuth field
        for _ in 0..4 {
            form.handle_key_event(test_key(KeyCode::Char('j')));
        }
        assert_eq!(form.focused_field(), Some("resource_owner_secret"));

        form.cycle_auth(true); // OAuth 1 -> None: only the selector remains
        assert_eq!(form.rows(), vec!["authentication_type"]);
        assert_eq!(form.focused_field(), Some("authentication_type"));
    }

    #[test]
    fn editing_commits_to_record() {
        let mut form = open_form(AuthType::Basic);
        form.handle_key_event(test_key(KeyCode::Char('j'))); // focus username
        form.handle_key_event(test_key(KeyCode::Enter)); // start editing
        assert!(form.capturing_input());

        for c in "svc".chars() {
            form.handle_key_event(test_key(KeyCode::Char(c)));
        }
        form.handle_key_event(test_key(KeyCode::Enter)); // commit

        assert!(!form.capturing_input());
        assert_eq!(
            form.record().unwrap().field_value("username").as_deref(),
            Some("svc")
        );
        assert!(form.is_dirty());
    }

    #[test]
    fn global_keys_are_captured_while_editing() {
        let mut form = open_form(AuthType::Basic);
        form.handle_key_event(test_key(KeyCode::Char('j')));
        form.handle_key_event(test_key(KeyCode::Enter));

        // 'q' must land in the buffer, not quit the app
        let action = form.handle_key_event(test_key(KeyCode::Char('q')));
        assert_eq!(action, Action::Noop);
        form.handle_key_event(test_key(KeyCode::Enter));
        assert_eq!(
            form.record().unwrap().field_value("username").as_deref(),
            Some("q")
        );
    }

    #[test]
    fn escape_cancels_editing_without_commit() {
        let mut form = open_form(AuthType::Basic);
        form.handle_key_event(test_key(KeyCode::Char('j')));
        form.handle_key_event(test_key(KeyCode::Enter));
        form.handle_key_event(test_key(KeyCode::Char('x')));
        form.handle_key_event(test_key(KeyCode::Esc));

        assert!(!form.capturing_input());
        assert_eq!(
            form.record().unwrap().field_value("username").as_deref(),
            Some("")
        );
    }

    #[test]
    fn save_and_back_actions() {
        let mut form = open_form(AuthType::None);
        assert_eq!(form.handle_key_event(test_key(KeyCode::Char('w'))), Action::Save);
        assert_eq!(form.handle_key_event(test_key(KeyCode::Esc)), Action::Back);
    }

    #[test]
    fn secret_values_render_masked() {
        let mut form = open_form(AuthType::Basic);
        form.record
            .as_mut()
            .unwrap()
            .set_field_value("password", "hunter2");
        assert_eq!(form.field_display("password"), "*******");
        assert_eq!(form.field_display("username"), "");
    }
}
