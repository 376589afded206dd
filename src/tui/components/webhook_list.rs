//! Webhook list component: a scrollable table of configured webhooks.

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use super::Component;
use crate::model::webhook::Webhook;
use crate::tui::action::Action;
use crate::tui::theme;

/// Display-friendly snapshot of one webhook row.
struct WebhookRow {
    name: String,
    enabled: bool,
    auth: String,
    subscriptions: usize,
}

/// Webhook list view.
///
/// Shows configured webhooks with their enabled state, authentication
/// type and subscription count. Enter opens the selected webhook in the
/// editor tab.
pub struct WebhookListComponent {
    rows: Vec<WebhookRow>,
    table_state: TableState,
}

impl WebhookListComponent {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            table_state: TableState::default(),
        }
    }

    /// Refresh rows from the webhook store's current contents.
    pub fn update_webhooks(&mut self, webhooks: &[Webhook]) {
        self.rows = webhooks
            .iter()
            .map(|w| WebhookRow {
                name: w.name.clone(),
                enabled: w.enabled,
                auth: w.authentication_type.to_string(),
                subscriptions: w.subscriptions.len(),
            })
            .collect();

        // Keep selection valid
        if !self.rows.is_empty() {
            match self.table_state.selected() {
                None => self.table_state.select(Some(0)),
                Some(sel) if sel >= self.rows.len() => {
                    self.table_state.select(Some(self.rows.len() - 1));
                }
                _ => {}
            }
        } else {
            self.table_state.select(None);
        }
    }

    /// Name of the currently selected webhook, if any.
    pub fn selected_name(&self) -> Option<&str> {
        self.table_state
            .selected()
            .and_then(|i| self.rows.get(i))
            .map(|r| r.name.as_str())
    }
}

impl Component for WebhookListComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                if !self.rows.is_empty() {
                    let current = self.table_state.selected().unwrap_or(0);
                    let prev = if current == 0 {
                        self.rows.len() - 1
                    } else {
                        current - 1
                    };
                    self.table_state.select(Some(prev));
                }
                Action::ScrollUp
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if !self.rows.is_empty() {
                    let current = self.table_state.selected().unwrap_or(0);
                    let next = (current + 1) % self.rows.len();
                    self.table_state.select(Some(next));
                }
                Action::ScrollDown
            }
            KeyCode::Enter => match self.selected_name() {
                Some(name) => Action::Edit(name.to_string()),
                None => Action::Noop,
            },
            _ => Action::Noop,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        if self.rows.is_empty() {
            let empty = Paragraph::new("No webhooks configured. Add one with `hookline add`.")
                .style(theme::FIELD_LABEL)
                .block(Block::default().borders(Borders::ALL).title(" Webhooks "));
            frame.render_widget(empty, area);
            return;
        }

        let header_cells = ["Name", "Enabled", "Auth", "Subscriptions"]
            .iter()
            .map(|h| Cell::from(*h).style(theme::HEADER));
        let header = Row::new(header_cells).height(1);

        let rows: Vec<Row> = self
            .rows
            .iter()
            .map(|r| {
                let enabled_span = if r.enabled {
                    Span::styled("yes", theme::SUCCESS)
                } else {
                    Span::styled("no", Style::default().add_modifier(Modifier::DIM))
                };
                Row::new(vec![
                    Cell::from(r.name.clone()),
                    Cell::from(enabled_span),
                    Cell::from(r.auth.clone()),
                    Cell::from(format!("{}", r.subscriptions)),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(35),
                Constraint::Length(8),
                Constraint::Length(22),
                Constraint::Length(14),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(" Webhooks "))
        .row_highlight_style(theme::SELECTED);

        let mut table_state = self.table_state.clone();
        frame.render_stateful_widget(table, area, &mut table_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    fn test_key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::empty(),
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        }
    }

    fn hooks(names: &[&str]) -> Vec<Webhook> {
        names.iter().map(|n| Webhook::new(*n)).collect()
    }

    #[test]
    fn update_selects_first_row() {
        let mut list = WebhookListComponent::new();
        list.update_webhooks(&hooks(&["aa", "bb"]));
        assert_eq!(list.selected_name(), Some("aa"));
    }

    #[test]
    fn selection_wraps_both_directions() {
        let mut list = WebhookListComponent::new();
        list.update_webhooks(&hooks(&["aa", "bb", "cc"]));

        list.handle_key_event(test_key(KeyCode::Char('k')));
        assert_eq!(list.selected_name(), Some("cc"));

        list.handle_key_event(test_key(KeyCode::Char('j')));
        assert_eq!(list.selected_name(), Some("aa"));
    }

    #[test]
    fn enter_opens_editor_for_selection() {
        let mut list = WebhookListComponent::new();
        list.update_webhooks(&hooks(&["aa", "bb"]));
        list.handle_key_event(test_key(KeyCode::Char('j')));

        let action = list.handle_key_event(test_key(KeyCode::Enter));
        assert_eq!(action, Action::Edit("bb".to_string()));
    }

    #[test]
    fn enter_on_empty_list_is_noop() {
        let mut list = WebhookListComponent::new();
        let action = list.handle_key_event(test_key(KeyCode::Enter));
        assert_eq!(action, Action::Noop);
    }

    #[test]
    fn selection_clamps_after_shrink() {
        let mut list = WebhookListComponent::new();
        list.update_webhooks(&hooks(&["aa", "bb", "cc"]));
        list.handle_key_event(test_key(KeyCode::Char('k'))); // select "cc"

        list.update_webhooks(&hooks(&["aa"]));
        assert_eq!(list.selected_name(), Some("aa"));
    }
}
