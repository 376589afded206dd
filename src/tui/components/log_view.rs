//! Delivery log view component.
//!
//! Shows a scrollable table of past delivery attempts with timestamp,
//! webhook, document, event, and outcome.

use std::path::PathBuf;

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Rect};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use super::Component;
use crate::config::paths::hookline_data_dir;
use crate::delivery::log::{DeliveryLog, DeliveryOutcome, DeliveryRecord};
use crate::tui::action::Action;
use crate::tui::theme;

/// Delivery log view for the TUI, most recent attempt first.
pub struct LogViewComponent {
    entries: Vec<DeliveryRecord>,
    table_state: TableState,
    data_dir: Option<PathBuf>,
}

impl LogViewComponent {
    /// Create a new log view, loading initial data from disk.
    pub fn new() -> Self {
        let data_dir = hookline_data_dir().ok();
        let mut component = Self {
            entries: Vec::new(),
            table_state: TableState::default(),
            data_dir,
        };
        component.reload();
        component
    }

    /// Create a log view with an explicit data directory (for testing).
    #[cfg(test)]
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        let mut component = Self {
            entries: Vec::new(),
            table_state: TableState::default(),
            data_dir: Some(data_dir),
        };
        component.reload();
        component
    }

    /// Reload log entries from disk (best-effort), most recent first.
    fn reload(&mut self) {
        if let Some(ref dir) = self.data_dir {
            if let Ok(log) = DeliveryLog::load(dir, 1000) {
                let mut entries = log.list().to_vec();
                entries.reverse();
                self.entries = entries;
            }
        }

        // Keep selection valid
        if !self.entries.is_empty() {
            match self.table_state.selected() {
                None => self.table_state.select(Some(0)),
                Some(sel) if sel >= self.entries.len() => {
                    self.table_state.select(Some(self.entries.len() - 1));
                }
                _ => {}
            }
        } else {
            self.table_state.select(None);
        }
    }

    fn outcome_style(outcome: DeliveryOutcome) -> ratatui::style::Style {
        match outcome {
            DeliveryOutcome::Delivered => theme::SUCCESS,
            DeliveryOutcome::Failed => theme::ERROR,
            DeliveryOutcome::Skipped => theme::WARNING,
        }
    }
}

impl Component for LogViewComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                if !self.entries.is_empty() {
                    let current = self.table_state.selected().unwrap_or(0);
                    let prev = if current == 0 {
                        self.entries.len() - 1
                    } else {
                        current - 1
                    };
                    self.table_state.select(Some(prev));
                }
                Action::ScrollUp
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if !self.entries.is_empty() {
                    let current = self.table_state.selected().unwrap_or(0);
                    let next = (current + 1) % self.entries.len();
                    self.table_state.select(Some(next));
                }
                Action::ScrollDown
            }
            _ => Action::Noop,
        }
    }

    fn update(&mut self) {
        self.reload();
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        if self.entries.is_empty() {
            let empty = Paragraph::new("No deliveries yet. Fire one with `hookline fire`.")
                .style(theme::FIELD_LABEL)
                .block(Block::default().borders(Borders::ALL).title(" Delivery Log "));
            frame.render_widget(empty, area);
            return;
        }

        let header_cells = ["Time", "Webhook", "Document", "Event", "Outcome"]
            .iter()
            .map(|h| Cell::from(*h).style(theme::HEADER));
        let header = Row::new(header_cells).height(1);

        let rows: Vec<Row> = self
            .entries
            .iter()
            .map(|r| {
                Row::new(vec![
                    Cell::from(r.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()),
                    Cell::from(r.webhook.clone()),
                    Cell::from(r.document.clone()),
                    Cell::from(r.event.to_string()),
                    Cell::from(ratatui::text::Span::styled(
                        r.outcome.to_string(),
                        Self::outcome_style(r.outcome),
                    )),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(20),
                Constraint::Percentage(30),
                Constraint::Percentage(20),
                Constraint::Length(8),
                Constraint::Length(10),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(" Delivery Log "))
        .row_highlight_style(theme::SELECTED);

        let mut table_state = self.table_state.clone();
        frame.render_stateful_widget(table, area, &mut table_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::event::DocEvent;
    use chrono::Utc;

    fn record(webhook: &str) -> DeliveryRecord {
        DeliveryRecord {
            webhook: webhook.to_string(),
            document: "Invoice".into(),
            event: DocEvent::Create,
            method: "POST".into(),
            resource_uri: "https://example.com/hook".into(),
            outcome: DeliveryOutcome::Delivered,
            error: None,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn loads_entries_most_recent_first() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut log = DeliveryLog::load(dir.path(), 1000).unwrap();
            log.append(record("first")).unwrap();
            log.append(record("second")).unwrap();
        }

        let view = LogViewComponent::with_data_dir(dir.path().to_path_buf());
        assert_eq!(view.entries.len(), 2);
        assert_eq!(view.entries[0].webhook, "second");
        assert_eq!(view.entries[1].webhook, "first");
    }

    #[test]
    fn empty_dir_yields_no_entries() {
        let dir = tempfile::tempdir().unwrap();
        let view = LogViewComponent::with_data_dir(dir.path().to_path_buf());
        assert!(view.entries.is_empty());
        assert_eq!(view.table_state.selected(), None);
    }
}
