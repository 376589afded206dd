use std::time::Duration;

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Tabs};
use ratatui::Frame;

use crate::config::paths::hookline_config_dir;
use crate::config::store::WebhookStore;
use crate::error::HookError;

use super::action::Action;
use super::components::log_view::LogViewComponent;
use super::components::status_bar::StatusBar;
use super::components::webhook_form::WebhookFormComponent;
use super::components::webhook_list::WebhookListComponent;
use super::components::Component;
use super::event::{Event, EventHandler};
use super::terminal;

/// The available tabs in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveTab {
    Webhooks,
    Editor,
    Log,
}

impl ActiveTab {
    /// All tabs in order.
    const ALL: [ActiveTab; 3] = [ActiveTab::Webhooks, ActiveTab::Editor, ActiveTab::Log];

    /// Tab display name.
    fn name(self) -> &'static str {
        match self {
            ActiveTab::Webhooks => "Webhooks",
            ActiveTab::Editor => "Editor",
            ActiveTab::Log => "Log",
        }
    }

    /// Tab index (0-based).
    fn index(self) -> usize {
        match self {
            ActiveTab::Webhooks => 0,
            ActiveTab::Editor => 1,
            ActiveTab::Log => 2,
        }
    }

    /// Next tab (wrapping).
    fn next(self) -> ActiveTab {
        let next_index = (self.index() + 1) % ActiveTab::ALL.len();
        ActiveTab::ALL[next_index]
    }

    /// Previous tab (wrapping).
    fn prev(self) -> ActiveTab {
        let prev_index = if self.index() == 0 {
            ActiveTab::ALL.len() - 1
        } else {
            self.index() - 1
        };
        ActiveTab::ALL[prev_index]
    }
}

/// Root application state for the TUI.
pub struct App {
    /// Currently active tab.
    active_tab: ActiveTab,
    /// Webhook definitions, shared by the list and the editor.
    store: WebhookStore,
    /// Webhook list tab component.
    webhook_list: WebhookListComponent,
    /// Editor tab component hosting the webhook form.
    editor: WebhookFormComponent,
    /// Delivery log tab component.
    log_view: LogViewComponent,
}

impl App {
    /// Create a new App over a loaded webhook store.
    pub fn new(store: WebhookStore) -> Self {
        let mut webhook_list = WebhookListComponent::new();
        webhook_list.update_webhooks(store.list());

        Self {
            active_tab: ActiveTab::Webhooks,
            store,
            webhook_list,
            editor: WebhookFormComponent::new(),
            log_view: LogViewComponent::new(),
        }
    }

    /// Handle a key event at the app level.
    ///
    /// While the editor is capturing text input, every key goes to it.
    /// Otherwise global keys (quit, tab switching) are handled first and
    /// the rest is delegated to the active tab component.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Action {
        if self.active_tab == ActiveTab::Editor && self.editor.capturing_input() {
            let action = self.editor.handle_key_event(key);
            return self.process(action);
        }

        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('1') => {
                self.active_tab = ActiveTab::Webhooks;
                Action::Noop
            }
            KeyCode::Char('2') => {
                self.active_tab = ActiveTab::Editor;
                Action::Noop
            }
            KeyCode::Char('3') => {
                self.active_tab = ActiveTab::Log;
                Action::Noop
            }
            KeyCode::Tab => {
                self.active_tab = self.active_tab.next();
                Action::Noop
            }
            KeyCode::BackTab => {
                self.active_tab = self.active_tab.prev();
                Action::Noop
            }
            _ => {
                let action = match self.active_tab {
                    ActiveTab::Webhooks => self.webhook_list.handle_key_event(key),
                    ActiveTab::Editor => self.editor.handle_key_event(key),
                    ActiveTab::Log => self.log_view.handle_key_event(key),
                };
                self.process(action)
            }
        }
    }

    /// Resolve component actions that need app-level state.
    fn process(&mut self, action: Action) -> Action {
        match action {
            Action::Edit(name) => {
                if let Some(hook) = self.store.get(&name) {
                    self.editor.open(hook.clone());
                    self.active_tab = ActiveTab::Editor;
                }
                Action::Noop
            }
            Action::Save => {
                if let Some(record) = self.editor.record().cloned() {
                    let name = record.name.clone();
                    let result = self
                        .store
                        .update(record)
                        .and_then(|_| self.store.save());
                    match result {
                        Ok(()) => {
                            self.editor.mark_saved();
                            self.webhook_list.update_webhooks(self.store.list());
                            tracing::info!(webhook = %name, "Saved webhook");
                        }
                        Err(e) => {
                            tracing::error!(webhook = %name, error = %e, "Failed to save webhook");
                        }
                    }
                }
                Action::Noop
            }
            Action::Back => {
                self.active_tab = ActiveTab::Webhooks;
                Action::Noop
            }
            other => other,
        }
    }

    /// Called on each tick event for periodic state updates.
    pub fn on_tick(&mut self) {
        self.log_view.update();
    }

    /// Render the entire application UI.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Layout: tab bar (3 rows), content area (fills), status bar (1 row)
        let chunks = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

        // -- Tab bar --
        let tab_titles: Vec<Line> = ActiveTab::ALL
            .iter()
            .map(|t| Line::from(t.name()))
            .collect();

        let tabs = Tabs::new(tab_titles)
            .select(self.active_tab.index())
            .style(Style::default().fg(Color::Gray))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .divider("|")
            .block(Block::default().borders(Borders::ALL).title(" hookline "));
        frame.render_widget(tabs, chunks[0]);

        // -- Active tab content --
        match self.active_tab {
            ActiveTab::Webhooks => self.webhook_list.render(frame, chunks[1]),
            ActiveTab::Editor => self.editor.render(frame, chunks[1]),
            ActiveTab::Log => self.log_view.render(frame, chunks[1]),
        }

        // -- Status bar with tab-appropriate hints --
        let mut status_bar = StatusBar::new();
        status_bar.hints = match self.active_tab {
            ActiveTab::Webhooks => vec![
                ("j/k".into(), "Navigate".into()),
                ("Enter".into(), "Edit".into()),
                ("1-3".into(), "Tabs".into()),
                ("q".into(), "Quit".into()),
            ],
            ActiveTab::Editor => {
                if self.editor.capturing_input() {
                    vec![
                        ("Enter".into(), "Commit".into()),
                        ("Esc".into(), "Cancel".into()),
                    ]
                } else {
                    vec![
                        ("j/k".into(), "Fields".into()),
                        ("h/l".into(), "Auth type".into()),
                        ("Enter".into(), "Edit field".into()),
                        ("w".into(), "Save".into()),
                        ("Esc".into(), "Back".into()),
                        ("q".into(), "Quit".into()),
                    ]
                }
            }
            ActiveTab::Log => vec![
                ("j/k".into(), "Navigate".into()),
                ("1-3".into(), "Tabs".into()),
                ("q".into(), "Quit".into()),
            ],
        };
        status_bar.render(frame, chunks[2]);
    }
}

/// Run the main TUI event loop.
///
/// Loads the webhook store, initializes the terminal, then loops:
/// receiving events, updating state, and rendering. Terminal is
/// restored on exit.
pub async fn run_app() -> Result<(), HookError> {
    let store = WebhookStore::load(&hookline_config_dir()?)?;

    let mut terminal = terminal::init();

    let mut events = EventHandler::new(
        Duration::from_millis(250), // tick rate: 4Hz
        Duration::from_millis(50),  // render rate: 20fps
    );

    let mut app = App::new(store);

    loop {
        let event = events.next().await;
        match event {
            Event::Render => {
                terminal.draw(|frame| app.render(frame))?;
            }
            Event::Tick => {
                app.on_tick();
            }
            Event::Key(key) => {
                let action = app.handle_key_event(key);
                if action == Action::Quit {
                    break;
                }
            }
            Event::Resize(_, _) => {
                // ratatui handles resize automatically on next draw
            }
            Event::Quit => break,
        }
    }

    terminal::restore();
    Ok(())
}
