//! Section list: the records of one resource kind as a table.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};

use nfconsole_core::{ListView, ResourceKind};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

pub struct ListScreen {
    kind: ResourceKind,
    view: Option<ListView>,
    selected: usize,
    loading: bool,
}

impl ListScreen {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            view: None,
            selected: 0,
            loading: false,
        }
    }

    /// Replace the shown list, keeping the selection on the same key when
    /// it is still present.
    pub fn set_view(&mut self, view: ListView) {
        let previous = self.selected_key().map(str::to_owned);
        let fallback = self.selected.min(view.rows.len().saturating_sub(1));
        self.selected = previous
            .and_then(|key| view.rows.iter().position(|r| r.key == key))
            .unwrap_or(fallback);
        self.view = Some(view);
        self.loading = false;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn selected_key(&self) -> Option<&str> {
        self.view
            .as_ref()
            .and_then(|v| v.rows.get(self.selected))
            .map(|r| r.key.as_str())
    }

    fn row_count(&self) -> usize {
        self.view.as_ref().map_or(0, |v| v.rows.len())
    }

    fn select_next(&mut self) {
        let count = self.row_count();
        if count > 0 {
            self.selected = (self.selected + 1).min(count - 1);
        }
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Action for the selected row, if there is one.
    fn on_selected(&self, make: impl FnOnce(String) -> Action) -> Option<Action> {
        self.selected_key().map(|key| make(key.to_owned()))
    }
}

impl Component for ListScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.select_next();
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.select_prev();
                None
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.selected = 0;
                None
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.selected = self.row_count().saturating_sub(1);
                None
            }
            KeyCode::Enter => self.on_selected(Action::OpenDetail),
            KeyCode::Char('e') => self.on_selected(Action::EditRecord),
            KeyCode::Char('d') => self.on_selected(Action::RequestDelete),
            KeyCode::Char('n') => Some(Action::NewForm),
            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Esc => Some(Action::DismissNotification),
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let title = match &self.view {
            Some(view) if view.error.is_none() => format!(" {} ({}) ", self.kind.title(), view.rows.len()),
            _ => format!(" {} ", self.kind.title()),
        };
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(view) = self.view.as_ref().filter(|_| !self.loading || self.row_count() > 0) else {
            let loading = Paragraph::new("Loading…")
                .alignment(Alignment::Center)
                .style(theme::placeholder_text(false));
            frame.render_widget(loading, inner);
            return;
        };

        if let Some(message) = view.placeholder() {
            let paragraph = Paragraph::new(message)
                .alignment(Alignment::Center)
                .style(theme::placeholder_text(view.error.is_some()));
            frame.render_widget(paragraph, inner);
            return;
        }

        let header = Row::new(
            view.columns
                .iter()
                .map(|c| Cell::from(*c).style(theme::table_header())),
        );
        let rows = view
            .rows
            .iter()
            .map(|row| Row::new(row.cells.iter().map(|c| Cell::from(c.as_str()))).style(theme::table_row()));
        let widths = view.columns.iter().map(|_| Constraint::Fill(1));

        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::table_selected())
            .highlight_symbol("▸");

        let mut state = TableState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(table, inner, &mut state);
    }

    fn key_hints(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("j/k", "move"),
            ("Enter", "open"),
            ("n", "new"),
            ("e", "edit"),
            ("d", "delete"),
            ("r", "refresh"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use nfconsole_core::ListRow;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn gnbs(names: &[&str]) -> ListView {
        ListView {
            kind: ResourceKind::Gnb,
            columns: vec!["Name", "TAC"],
            rows: names
                .iter()
                .map(|n| ListRow {
                    key: (*n).to_owned(),
                    cells: vec![(*n).to_owned(), "1".into()],
                    actions: vec![],
                    record: json!({"name": n}),
                })
                .collect(),
            error: None,
        }
    }

    #[test]
    fn movement_stays_in_bounds() {
        let mut screen = ListScreen::new(ResourceKind::Gnb);
        screen.set_view(gnbs(&["gnb1", "gnb2"]));

        screen.handle_key_event(key(KeyCode::Up));
        assert_eq!(screen.selected_key(), Some("gnb1"));
        screen.handle_key_event(key(KeyCode::Char('j')));
        screen.handle_key_event(key(KeyCode::Char('j')));
        assert_eq!(screen.selected_key(), Some("gnb2"));
        screen.handle_key_event(key(KeyCode::Char('g')));
        assert_eq!(screen.selected_key(), Some("gnb1"));
    }

    #[test]
    fn selection_follows_its_key_across_refreshes() {
        let mut screen = ListScreen::new(ResourceKind::Gnb);
        screen.set_view(gnbs(&["gnb1", "gnb2", "gnb3"]));
        screen.handle_key_event(key(KeyCode::End));
        assert_eq!(screen.selected_key(), Some("gnb3"));

        screen.set_view(gnbs(&["gnb0", "gnb1", "gnb2", "gnb3"]));
        assert_eq!(screen.selected_key(), Some("gnb3"));

        screen.set_view(gnbs(&["gnb0"]));
        assert_eq!(screen.selected_key(), Some("gnb0"));
    }

    #[test]
    fn row_keys_trigger_actions_on_the_selection() {
        let mut screen = ListScreen::new(ResourceKind::Gnb);
        assert!(screen.handle_key_event(key(KeyCode::Enter)).is_none());
        assert!(matches!(screen.handle_key_event(key(KeyCode::Char('n'))), Some(Action::NewForm)));

        screen.set_view(gnbs(&["gnb1"]));
        assert!(matches!(
            screen.handle_key_event(key(KeyCode::Enter)),
            Some(Action::OpenDetail(k)) if k == "gnb1"
        ));
        assert!(matches!(
            screen.handle_key_event(key(KeyCode::Char('d'))),
            Some(Action::RequestDelete(k)) if k == "gnb1"
        ));
    }
}
