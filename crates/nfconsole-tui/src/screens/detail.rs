//! Detail screen: one record in view mode.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use nfconsole_core::{DetailView, FormValues, ResourceKind};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

pub struct DetailScreen {
    kind: ResourceKind,
    key: String,
    /// `None` until the record arrives.
    loaded: Option<(DetailView, FormValues)>,
}

impl DetailScreen {
    pub fn loading(kind: ResourceKind, key: impl Into<String>) -> Self {
        Self {
            kind,
            key: key.into(),
            loaded: None,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether `view` belongs to this screen.
    pub fn shows(&self, kind: ResourceKind, key: &str) -> bool {
        self.kind == kind && self.key == key
    }

    pub fn set_loaded(&mut self, view: DetailView, form: FormValues) {
        self.loaded = Some((view, form));
    }

    /// Edit-form values of the loaded record.
    pub fn form(&self) -> Option<&FormValues> {
        self.loaded.as_ref().map(|(_, form)| form)
    }
}

impl Component for DetailScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => Some(Action::CloseDetail),
            KeyCode::Char('e') if self.loaded.is_some() => Some(Action::EditForm),
            KeyCode::Char('d') => Some(Action::RequestDelete(self.key.clone())),
            KeyCode::Char('r') => Some(Action::Refresh),
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" {}: {} ", self.kind.label(), self.key))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some((view, _)) = &self.loaded else {
            let loading = Paragraph::new("Loading…")
                .alignment(Alignment::Center)
                .style(theme::placeholder_text(false));
            frame.render_widget(loading, inner);
            return;
        };

        let width = view.fields.iter().map(|(label, _)| label.len()).max().unwrap_or(0) + 2;
        let mut lines = vec![Line::from("")];
        for (label, value) in &view.fields {
            let mut values = value.lines();
            let first = values.next().unwrap_or("");
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<width$}", format!("{label}:")), theme::field_label()),
                Span::styled(first.to_owned(), theme::table_row()),
            ]));
            for more in values {
                lines.push(Line::from(vec![
                    Span::raw(format!("  {:<width$}", "")),
                    Span::styled(more.to_owned(), theme::table_row()),
                ]));
            }
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }

    fn key_hints(&self) -> &'static [(&'static str, &'static str)] {
        &[("e", "edit"), ("d", "delete"), ("r", "reload"), ("Esc", "back")]
    }
}
