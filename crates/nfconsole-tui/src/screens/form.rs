//! Create / edit form built from a resource's field descriptors.
//!
//! One single-line input per field. Multi-valued fields are typed comma
//! separated; choice fields and single references cycle with ←/→. The
//! natural key is locked while editing an existing record.

use std::collections::HashMap;

use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use nfconsole_core::{FieldKind, FieldSpec, FormValues, ResourceKind};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

struct FieldInput {
    spec: &'static FieldSpec,
    input: Input,
    locked: bool,
}

pub struct FormScreen {
    kind: ResourceKind,
    /// Key of the record being edited; `None` for a new one.
    editing: Option<String>,
    /// Values the form started from. Entries without a field survive submit.
    base: FormValues,
    fields: Vec<FieldInput>,
    focus: usize,
    /// Existing keys per referenced kind.
    options: HashMap<ResourceKind, Vec<String>>,
    errors: Vec<String>,
    saving: bool,
}

impl FormScreen {
    pub fn create(kind: ResourceKind) -> Self {
        Self::new(kind, None, FormValues::new())
    }

    pub fn edit(kind: ResourceKind, key: impl Into<String>, base: FormValues) -> Self {
        Self::new(kind, Some(key.into()), base)
    }

    fn new(kind: ResourceKind, editing: Option<String>, base: FormValues) -> Self {
        let fields: Vec<FieldInput> = nfconsole_core::fields_of(kind)
            .iter()
            .map(|spec| {
                let value = if spec.multiple {
                    base.lines(spec.id).join(", ")
                } else {
                    base.get(spec.id).to_owned()
                };
                FieldInput {
                    spec,
                    input: Input::new(value),
                    locked: !spec.editable(editing.is_some()),
                }
            })
            .collect();
        let focus = fields.iter().position(|f| !f.locked).unwrap_or(0);

        Self {
            kind,
            editing,
            base,
            fields,
            focus,
            options: HashMap::new(),
            errors: Vec::new(),
            saving: false,
        }
    }

    /// Kinds whose keys the form's reference fields choose from.
    pub fn referenced_kinds(&self) -> Vec<ResourceKind> {
        let mut kinds = Vec::new();
        for field in &self.fields {
            if let FieldKind::Reference(target) = field.spec.kind {
                if !kinds.contains(&target) {
                    kinds.push(target);
                }
            }
        }
        kinds
    }

    pub fn set_options(&mut self, kind: ResourceKind, keys: Vec<String>) {
        self.options.insert(kind, keys);
    }

    pub fn set_saving(&mut self, saving: bool) {
        self.saving = saving;
    }

    pub fn set_errors(&mut self, errors: Vec<String>) {
        self.errors = errors;
        self.saving = false;
    }

    /// Entered values on top of the starting values.
    pub fn values(&self) -> FormValues {
        let mut form = self.base.clone();
        for field in self.fields.iter().filter(|f| !f.locked) {
            let raw = field.input.value();
            let value = if field.spec.multiple {
                raw.split(',')
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .collect::<Vec<_>>()
                    .join("\n")
            } else {
                raw.trim().to_owned()
            };
            form.set(field.spec.id, value);
        }
        form
    }

    #[cfg(test)]
    fn focused_id(&self) -> Option<&'static str> {
        self.fields.get(self.focus).map(|f| f.spec.id)
    }

    fn move_focus(&mut self, forward: bool) {
        let count = self.fields.len();
        for step in 1..=count {
            let idx = if forward {
                (self.focus + step) % count
            } else {
                (self.focus + count - step) % count
            };
            if !self.fields[idx].locked {
                self.focus = idx;
                return;
            }
        }
    }

    /// Values ←/→ cycle through for the focused field, if it is a picker.
    fn cycle_values(&self) -> Option<Vec<String>> {
        let field = self.fields.get(self.focus)?;
        let mut values: Vec<String> = match field.spec.kind {
            FieldKind::Choice(options) => options.iter().map(|o| (*o).to_owned()).collect(),
            FieldKind::Reference(target) if !field.spec.multiple => self.options.get(&target)?.clone(),
            _ => return None,
        };
        if values.is_empty() {
            return None;
        }
        if !field.spec.required {
            values.insert(0, String::new());
        }
        Some(values)
    }

    fn cycle(&mut self, forward: bool) -> bool {
        let Some(values) = self.cycle_values() else {
            return false;
        };
        let Some(field) = self.fields.get_mut(self.focus) else {
            return false;
        };
        let count = values.len();
        let next = match values.iter().position(|v| v == field.input.value()) {
            Some(i) if forward => (i + 1) % count,
            Some(i) => (i + count - 1) % count,
            None => 0,
        };
        field.input = Input::new(values[next].clone());
        true
    }

    fn hint_for(&self, field: &FieldInput) -> String {
        let mut hint = String::new();
        match field.spec.kind {
            FieldKind::Choice(options) => hint = format!("←/→ {}", options.join(" | ")),
            FieldKind::Reference(target) => match self.options.get(&target) {
                Some(keys) if keys.is_empty() => hint = format!("No {} yet", target.title()),
                Some(keys) if field.spec.multiple => hint = format!("Comma separated: {}", keys.join(", ")),
                Some(_) => hint = format!("←/→ pick a {}", target.label()),
                None => hint = format!("Loading {}…", target.title()),
            },
            FieldKind::Integer { min, max } => {
                if let (Some(min), Some(max)) = (min, max) {
                    hint = format!("Whole number {min}-{max}");
                }
            }
            FieldKind::Lines => hint = "Comma separated".into(),
            FieldKind::Text => {}
        }
        if let Some(help) = field.spec.help {
            if !hint.is_empty() {
                hint.push_str(". ");
            }
            hint.push_str(help);
        }
        hint
    }
}

impl Component for FormScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Option<Action> {
        if self.saving {
            return None;
        }
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('s')) => return Some(Action::SubmitForm(self.values())),
            (_, KeyCode::Esc) => return Some(Action::CancelForm),
            (_, KeyCode::Tab | KeyCode::Down | KeyCode::Enter) => self.move_focus(true),
            (_, KeyCode::BackTab | KeyCode::Up) => self.move_focus(false),
            (_, KeyCode::Left) if self.cycle(false) => {}
            (_, KeyCode::Right) if self.cycle(true) => {}
            _ => {
                if let Some(field) = self.fields.get_mut(self.focus) {
                    if !field.locked {
                        field.input.handle_event(&CrosstermEvent::Key(key));
                    }
                }
            }
        }
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let title = match &self.editing {
            Some(key) => format!(" Edit {}: {key} ", self.kind.label()),
            None => format!(" New {} ", self.kind.label()),
        };
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let field_rows = u16::try_from(self.fields.len()).unwrap_or(u16::MAX);
        let [fields_area, hint_area, errors_area] = Layout::vertical([
            Constraint::Length(field_rows.saturating_add(1)),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .areas(inner);

        let label_width = self.fields.iter().map(|f| f.spec.label.len()).max().unwrap_or(0) + 4;
        let label_cols = u16::try_from(label_width).unwrap_or(u16::MAX);

        for (idx, field) in self.fields.iter().enumerate() {
            let y = fields_area.y + 1 + u16::try_from(idx).unwrap_or(u16::MAX);
            if y >= fields_area.bottom() {
                break;
            }
            let row = Rect::new(fields_area.x, y, fields_area.width, 1);
            let [label_area, value_area] =
                Layout::horizontal([Constraint::Length(label_cols), Constraint::Min(1)]).areas(row);

            let focused = idx == self.focus && !field.locked;
            let marker = if field.spec.required && !field.locked { "*" } else { " " };
            let label_style = if focused { theme::tab_active() } else { theme::field_label() };
            frame.render_widget(
                Paragraph::new(Span::styled(format!(" {}{marker}", field.spec.label), label_style)),
                label_area,
            );

            let value = field.input.value();
            let width = usize::from(value_area.width.max(1) - 1);
            let scroll = field.input.visual_scroll(width);
            let paragraph = if field.locked {
                Paragraph::new(Span::styled(value.to_owned(), theme::field_locked()))
            } else if value.is_empty() && !focused {
                Paragraph::new(Span::styled(field.spec.placeholder, theme::placeholder()))
            } else {
                Paragraph::new(Span::styled(value.to_owned(), theme::table_row()))
                    .scroll((0, u16::try_from(scroll).unwrap_or(0)))
            };
            frame.render_widget(paragraph, value_area);

            if focused && !self.saving {
                let cursor = field.input.visual_cursor().saturating_sub(scroll);
                let x = value_area.x + u16::try_from(cursor).unwrap_or(0);
                frame.set_cursor_position(Position::new(x.min(value_area.right().saturating_sub(1)), y));
            }
        }

        if let Some(field) = self.fields.get(self.focus) {
            let hint = if self.saving {
                "Saving…".to_owned()
            } else {
                self.hint_for(field)
            };
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(format!("  {hint}"), theme::key_hint()))),
                hint_area,
            );
        }

        if !self.errors.is_empty() {
            let lines: Vec<Line> = self
                .errors
                .iter()
                .map(|e| Line::from(Span::styled(format!("  ✗ {e}"), theme::placeholder_text(true))))
                .collect();
            frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), errors_area);
        }
    }

    fn key_hints(&self) -> &'static [(&'static str, &'static str)] {
        &[("Tab", "next field"), ("←/→", "choose"), ("Ctrl-s", "save"), ("Esc", "cancel")]
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(form: &mut FormScreen, text: &str) {
        for c in text.chars() {
            form.handle_key_event(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn typed_values_land_in_field_order() {
        let mut form = FormScreen::create(ResourceKind::Gnb);
        assert_eq!(form.focused_id(), Some("name"));
        type_text(&mut form, "gnb1");
        form.handle_key_event(key(KeyCode::Tab));
        type_text(&mut form, "7");

        let values = form.values();
        assert_eq!(values.get("name"), "gnb1");
        assert_eq!(values.get("tac"), "7");
    }

    #[test]
    fn editing_locks_the_key_and_keeps_hidden_entries() {
        let base: FormValues = [
            ("slice_name", "slice-42"),
            ("sst", "1"),
            ("gnodebs", "gnb1:1\ngnb2:2"),
            ("application_filtering_rules", "[{\"rule-name\":\"allow\"}]"),
        ]
        .into_iter()
        .collect();
        let mut form = FormScreen::edit(ResourceKind::NetworkSlice, "slice-42", base);
        assert_eq!(form.focused_id(), Some("sst"));

        form.handle_key_event(key(KeyCode::BackTab));
        assert_ne!(form.focused_id(), Some("slice_name"));

        let values = form.values();
        assert_eq!(values.get("slice_name"), "slice-42");
        assert_eq!(values.lines("gnodebs"), ["gnb1:1", "gnb2:2"]);
        assert_eq!(values.get("application_filtering_rules"), "[{\"rule-name\":\"allow\"}]");
    }

    #[test]
    fn multi_valued_fields_split_on_commas() {
        let mut form = FormScreen::create(ResourceKind::DeviceGroup);
        type_text(&mut form, "site1");
        form.handle_key_event(key(KeyCode::Tab));
        type_text(&mut form, "001010000000001, 001010000000002,");
        assert_eq!(form.values().get("imsis"), "001010000000001\n001010000000002");
    }

    #[test]
    fn single_reference_cycles_through_loaded_keys() {
        let mut form = FormScreen::create(ResourceKind::Subscriber);
        assert_eq!(form.referenced_kinds(), [ResourceKind::K4Key]);
        while form.focused_id() != Some("k4_sno") {
            form.handle_key_event(key(KeyCode::Tab));
        }

        assert!(!form.cycle(true));
        form.set_options(ResourceKind::K4Key, vec!["1".into(), "5".into()]);
        form.handle_key_event(key(KeyCode::Right));
        assert_eq!(form.values().get("k4_sno"), "1");
        form.handle_key_event(key(KeyCode::Right));
        form.handle_key_event(key(KeyCode::Right));
        assert_eq!(form.values().get("k4_sno"), "1");
        form.handle_key_event(key(KeyCode::Left));
        assert_eq!(form.values().get("k4_sno"), "5");
    }

    #[test]
    fn save_and_cancel_keys() {
        let mut form = FormScreen::create(ResourceKind::Upf);
        let save = form.handle_key_event(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert!(matches!(save, Some(Action::SubmitForm(_))));
        assert!(matches!(form.handle_key_event(key(KeyCode::Esc)), Some(Action::CancelForm)));

        form.set_saving(true);
        assert!(form.handle_key_event(key(KeyCode::Esc)).is_none());
        form.set_errors(vec!["UPF port is required".into()]);
        assert!(form.handle_key_event(key(KeyCode::Esc)).is_some());
    }
}
