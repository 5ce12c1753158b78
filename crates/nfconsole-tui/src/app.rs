//! Application core: event loop, navigation and command dispatch.
//!
//! Navigation state lives in a core [`Shell`]; every transition that needs
//! the server yields a [`Command`], which runs on its own task against the
//! shared [`ConsoleHandle`] and comes back as [`Action::CommandDone`].

use std::collections::HashMap;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use nfconsole_core::{Command, CommandResult, ConsoleHandle, CoreError, Notification, ResourceKind, Shell};

use crate::action::Action;
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screens::{DetailScreen, FormScreen, ListScreen, confirm};
use crate::theme;
use crate::tui::Tui;

/// How long a notification stays in the status bar.
const NOTIFICATION_TTL: Duration = Duration::from_secs(6);
/// Notification expiry needs no finer clock than this.
const TICK_RATE: Duration = Duration::from_millis(500);

/// What woke the event loop.
enum Wake {
    Terminal(Option<Event>),
    Action(Action),
}

struct Toast {
    note: Notification,
    shown_at: Instant,
}

/// Top-level application state and event loop.
pub struct App {
    console: ConsoleHandle,
    /// Server shown in the status bar.
    server: String,
    shell: Shell,
    lists: HashMap<ResourceKind, ListScreen>,
    detail: Option<DetailScreen>,
    form: Option<FormScreen>,
    /// Open the edit form as soon as the pending detail arrives.
    edit_on_load: bool,
    notification: Option<Toast>,
    /// Commands sent and not yet answered.
    in_flight: usize,
    running: bool,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(console: ConsoleHandle, server: String) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let lists = ResourceKind::ALL.iter().map(|&k| (k, ListScreen::new(k))).collect();

        Self {
            console,
            server,
            shell: Shell::default(),
            lists,
            detail: None,
            form: None,
            edit_on_load: false,
            notification: None,
            in_flight: 0,
            running: true,
            action_tx,
            action_rx,
        }
    }

    /// Run the main event loop until the user quits.
    ///
    /// Wakes on terminal input or a finished command, applies everything
    /// queued, then draws one frame.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::enter()?;
        let mut events = EventReader::spawn(TICK_RATE);

        let first = self.shell.show_section(self.shell.section());
        self.dispatch(first);
        info!(server = %self.server, "TUI event loop started");
        tui.draw(|frame| self.render(frame))?;

        while self.running {
            let wake = tokio::select! {
                event = events.next() => Wake::Terminal(event),
                Some(action) = self.action_rx.recv() => Wake::Action(action),
            };
            let action = match wake {
                Wake::Terminal(None) => break,
                Wake::Terminal(Some(Event::Key(key))) => self.handle_key_event(key),
                Wake::Terminal(Some(Event::Tick)) => Some(Action::Tick),
                Wake::Terminal(Some(Event::Redraw)) => None,
                Wake::Action(action) => Some(action),
            };
            if let Some(action) = action {
                self.process_action(action);
            }
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(action);
            }

            if self.running {
                tui.draw(|frame| self.render(frame))?;
            }
        }

        info!("TUI event loop ended");
        Ok(())
    }

    // ── Input ─────────────────────────────────────────────────────

    /// Map a key to an action. The confirmation popup, then an open form,
    /// capture every key; otherwise global keys come before the screen's.
    fn handle_key_event(&mut self, key: KeyEvent) -> Option<Action> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        if self.shell.pending_delete().is_some() {
            return match key.code {
                KeyCode::Char('y' | 'Y') => Some(Action::ConfirmYes),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Action::ConfirmNo),
                _ => None,
            };
        }

        if let Some(form) = self.form.as_mut() {
            return form.handle_key_event(key);
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Some(Action::Quit),
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='6')) => {
                let idx = c.to_digit(10).and_then(|d| usize::try_from(d).ok())?;
                return ResourceKind::ALL.get(idx - 1).map(|&k| Action::SwitchSection(k));
            }
            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Some(Action::SwitchSection(self.shell.section().next()));
            }
            (_, KeyCode::BackTab) => {
                return Some(Action::SwitchSection(self.shell.section().prev()));
            }
            _ => {}
        }

        match self.detail.as_mut() {
            Some(detail) => detail.handle_key_event(key),
            None => self.lists.get_mut(&self.shell.section())?.handle_key_event(key),
        }
    }

    // ── State transitions ─────────────────────────────────────────

    fn process_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,

            Action::Tick => {
                if self
                    .notification
                    .as_ref()
                    .is_some_and(|t| t.shown_at.elapsed() >= NOTIFICATION_TTL)
                {
                    self.notification = None;
                }
            }

            Action::SwitchSection(kind) => {
                debug!(from = %self.shell.section(), to = %kind, "switching section");
                self.detail = None;
                self.form = None;
                self.edit_on_load = false;
                let cmd = self.shell.show_section(kind);
                self.dispatch(cmd);
            }

            Action::Refresh => {
                let cmd = match self.shell.detail() {
                    Some(open) => Command::Get {
                        kind: open.kind,
                        key: open.key.clone(),
                    },
                    None => self.shell.refresh(),
                };
                self.dispatch(cmd);
            }

            Action::OpenDetail(key) => self.open_detail(key, false),
            Action::EditRecord(key) => self.open_detail(key, true),

            Action::CloseDetail => {
                self.shell.close_detail();
                self.detail = None;
            }

            Action::NewForm => {
                if self.detail.is_none() {
                    self.open_form(FormScreen::create(self.shell.section()));
                }
            }

            Action::EditForm => self.begin_edit(),

            Action::CancelForm => {
                self.shell.cancel_edit();
                self.form = None;
            }

            Action::SubmitForm(values) => {
                if let Some(cmd) = self.shell.submit(values) {
                    if let Some(form) = self.form.as_mut() {
                        form.set_saving(true);
                    }
                    self.dispatch(cmd);
                }
            }

            Action::RequestDelete(key) => {
                let kind = self.detail.as_ref().map_or(self.shell.section(), DetailScreen::kind);
                self.shell.request_delete(kind, key);
            }

            Action::ConfirmYes => {
                if let Some(cmd) = self.shell.confirm_delete() {
                    self.dispatch(cmd);
                }
            }

            Action::ConfirmNo => self.shell.cancel_delete(),

            Action::CommandDone { command, result } => {
                self.in_flight = self.in_flight.saturating_sub(1);
                self.apply_result(&command, result);
            }

            Action::DismissNotification => self.notification = None,
        }
    }

    fn open_detail(&mut self, key: String, edit: bool) {
        let cmd = self.shell.open_detail(key.clone());
        self.detail = Some(DetailScreen::loading(self.shell.section(), key));
        self.edit_on_load = edit;
        self.dispatch(cmd);
    }

    /// Switch the open, loaded detail into its edit form.
    fn begin_edit(&mut self) {
        let Some(detail) = &self.detail else {
            return;
        };
        let Some(values) = detail.form().cloned() else {
            return;
        };
        let form = FormScreen::edit(detail.kind(), detail.key(), values);
        if self.shell.begin_edit() {
            self.open_form(form);
        }
    }

    fn open_form(&mut self, form: FormScreen) {
        for kind in form.referenced_kinds() {
            self.dispatch(Command::Options(kind));
        }
        self.form = Some(form);
    }

    /// Fold a command's outcome into the screens.
    fn apply_result(&mut self, command: &Command, result: Result<CommandResult, CoreError>) {
        let note = self.shell.on_result(&result);

        match result {
            Ok(CommandResult::List(view)) => self.set_list(view),

            Ok(CommandResult::Detail { view, form }) => {
                let shown = self.detail.as_mut().filter(|d| d.shows(view.kind, &view.key));
                if let Some(detail) = shown {
                    detail.set_loaded(view, form);
                    if std::mem::take(&mut self.edit_on_load) {
                        self.begin_edit();
                    }
                }
            }

            Ok(CommandResult::Options { kind, keys }) => {
                if let Some(form) = self.form.as_mut() {
                    form.set_options(kind, keys);
                }
            }

            Ok(CommandResult::Saved { created, list, .. }) => {
                self.form = None;
                self.set_list(list);
                if !created {
                    self.action_tx.send(Action::Refresh).ok();
                }
            }

            Ok(CommandResult::Deleted { list, .. }) => {
                self.set_list(list);
                if self.shell.detail().is_none() {
                    self.detail = None;
                }
            }

            Err(e) => match command {
                Command::Get { kind, key } => {
                    if self.detail.as_ref().is_some_and(|d| d.shows(*kind, key)) {
                        self.shell.close_detail();
                        self.detail = None;
                        self.edit_on_load = false;
                    }
                }
                cmd if cmd.is_mutation() => {
                    if let Some(form) = self.form.as_mut() {
                        form.set_errors(match e {
                            CoreError::Validation { errors } => errors,
                            other => vec![other.to_string()],
                        });
                    }
                }
                _ => {}
            },
        }

        if let Some(note) = note {
            self.notify(note);
        }
    }

    fn set_list(&mut self, view: nfconsole_core::ListView) {
        if let Some(list) = self.lists.get_mut(&view.kind) {
            list.set_view(view);
        }
    }

    fn notify(&mut self, note: Notification) {
        self.notification = Some(Toast {
            note,
            shown_at: Instant::now(),
        });
    }

    /// Run `cmd` on its own task; the result comes back as an action.
    fn dispatch(&mut self, cmd: Command) {
        debug!(?cmd, "dispatching");
        if let Command::List(kind) = &cmd {
            if let Some(list) = self.lists.get_mut(kind) {
                list.set_loading(true);
            }
        }

        self.in_flight += 1;
        let console = self.console.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = console.execute(cmd.clone()).await;
            let _ = tx.send(Action::CommandDone { command: cmd, result });
        });
    }

    // ── Rendering ─────────────────────────────────────────────────

    /// The screen receiving keys.
    fn front(&self) -> Option<&dyn Component> {
        if let Some(form) = &self.form {
            return Some(form);
        }
        if let Some(detail) = &self.detail {
            return Some(detail);
        }
        self.lists.get(&self.shell.section()).map(|l| l as &dyn Component)
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let [tab_area, content_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_tab_bar(frame, tab_area);
        if let Some(screen) = self.front() {
            screen.render(frame, content_area);
        }
        self.render_status_bar(frame, status_area);

        if let Some(pending) = self.shell.pending_delete() {
            confirm::render(frame, area, pending);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let section = self.shell.section();
        let titles: Vec<Line> = ResourceKind::ALL
            .iter()
            .enumerate()
            .map(|(i, &kind)| {
                let style = if kind == section {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(format!(" {} {} ", i + 1, kind.title()), style))
            })
            .collect();

        let selected = ResourceKind::ALL.iter().position(|&k| k == section).unwrap_or(0);
        let tabs = Tabs::new(titles)
            .divider(Span::styled("│", theme::key_hint()))
            .select(selected);
        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let busy = if self.in_flight > 0 { "⟳ " } else { "" };
        let server = format!("{busy}{} ", self.server);
        let server_width = u16::try_from(server.chars().count()).unwrap_or(u16::MAX);
        let [left, right] = Layout::horizontal([Constraint::Min(1), Constraint::Length(server_width)]).areas(area);

        let line = match &self.notification {
            Some(toast) => Line::from(Span::styled(
                format!(" {}", toast.note.message),
                theme::notification(toast.note.level),
            )),
            None => {
                let mut spans = vec![Span::raw(" ")];
                let hints = self.front().map_or(&[][..], |s| s.key_hints());
                for (key, what) in hints {
                    spans.push(Span::styled(format!("{key} "), theme::key_hint_key()));
                    spans.push(Span::styled(format!("{what}  "), theme::key_hint()));
                }
                if self.form.is_none() {
                    spans.push(Span::styled("1-6 ", theme::key_hint_key()));
                    spans.push(Span::styled("section  ", theme::key_hint()));
                    spans.push(Span::styled("q ", theme::key_hint_key()));
                    spans.push(Span::styled("quit", theme::key_hint()));
                }
                Line::from(spans)
            }
        };

        frame.render_widget(Paragraph::new(line), left);
        frame.render_widget(Paragraph::new(Span::styled(server, theme::key_hint())), right);
    }
}
