//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders core view models in the format selected by `--output`. Table
//! uses `tabled`, structured formats emit the records as the API returned
//! them, plain emits one key per line.

use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde_json::json;
use tabled::{builder::Builder, settings::Style};

use nfconsole_core::{DetailView, FieldKind, FieldSpec, ListView, Notification, NotificationLevel};

use crate::cli::{ColorMode, OutputFormat};

// ── Color helpers ────────────────────────────────────────────────────

fn color_enabled(mode: &ColorMode, is_terminal: bool) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => is_terminal && std::env::var("NO_COLOR").is_err(),
    }
}

/// Determine whether color output should be enabled on stdout.
pub fn should_color(mode: &ColorMode) -> bool {
    color_enabled(mode, io::stdout().is_terminal())
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list view.
///
/// An empty list renders its empty-state message in table mode and an
/// empty array in the structured formats.
pub fn render_list(format: &OutputFormat, view: &ListView, color: bool) -> String {
    match format {
        OutputFormat::Table => match view.placeholder() {
            Some(message) => message.to_owned(),
            None => render_table(&view.columns, view.rows.iter().map(|r| r.cells.clone()), color),
        },
        OutputFormat::Json => render_json_pretty(&view.records()),
        OutputFormat::JsonCompact => render_json_compact(&view.records()),
        OutputFormat::Yaml => render_yaml(&view.records()),
        OutputFormat::Plain => view.keys().join("\n"),
    }
}

/// Render one record.
pub fn render_detail(format: &OutputFormat, view: &DetailView, color: bool) -> String {
    match format {
        OutputFormat::Table => render_fields_block(&view.fields, color),
        OutputFormat::Json => render_json_pretty(&view.record),
        OutputFormat::JsonCompact => render_json_compact(&view.record),
        OutputFormat::Yaml => render_yaml(&view.record),
        OutputFormat::Plain => view.key.clone(),
    }
}

/// Render a resource's field descriptors.
pub fn render_field_specs(format: &OutputFormat, fields: &[FieldSpec], color: bool) -> String {
    let visible = fields.iter();
    match format {
        OutputFormat::Table => {
            let rows = visible.map(|f| {
                vec![
                    f.id.to_owned(),
                    f.label.to_owned(),
                    describe_kind(f.kind),
                    if f.key {
                        "key".into()
                    } else if f.required {
                        "yes".into()
                    } else {
                        String::new()
                    },
                    f.help.unwrap_or(f.placeholder).to_owned(),
                ]
            });
            render_table(&["Id", "Label", "Input", "Required", "Hint"], rows, color)
        }
        OutputFormat::Plain => visible.map(|f| f.id).collect::<Vec<_>>().join("\n"),
        OutputFormat::Json | OutputFormat::JsonCompact | OutputFormat::Yaml => {
            let specs: Vec<_> = visible
                .map(|f| {
                    json!({
                        "id": f.id,
                        "label": f.label,
                        "input": describe_kind(f.kind),
                        "required": f.required,
                        "key": f.key,
                        "hint": f.help.unwrap_or(f.placeholder),
                    })
                })
                .collect();
            match format {
                OutputFormat::Json => render_json_pretty(&specs),
                OutputFormat::Yaml => render_yaml(&specs),
                _ => render_json_compact(&specs),
            }
        }
    }
}

fn describe_kind(kind: FieldKind) -> String {
    match kind {
        FieldKind::Text => "text".into(),
        FieldKind::Integer { min, max } => match (min, max) {
            (Some(min), Some(max)) => format!("integer {min}..={max}"),
            (Some(min), None) => format!("integer >= {min}"),
            (None, Some(max)) => format!("integer <= {max}"),
            (None, None) => "integer".into(),
        },
        FieldKind::Lines => "list".into(),
        FieldKind::Choice(options) => format!("one of {}", options.join("|")),
        FieldKind::Reference(kind) => format!("{} names", kind.label()),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Print a notification on stderr. Errors are printed even when quiet.
pub fn notify(note: &Notification, mode: &ColorMode, quiet: bool) {
    if quiet && !note.is_error() {
        return;
    }
    let color = color_enabled(mode, io::stderr().is_terminal());
    let (mark, text) = match note.level {
        NotificationLevel::Success => ("✓", color.then(|| "✓".green().to_string())),
        NotificationLevel::Error => ("✗", color.then(|| "✗".red().to_string())),
        NotificationLevel::Info => ("•", color.then(|| "•".cyan().to_string())),
    };
    eprintln!("{} {}", text.as_deref().unwrap_or(mark), note.message);
}

// ── Progress ─────────────────────────────────────────────────────────

/// Spinner on stderr while a request is in flight; hidden when stderr is
/// not a terminal or output is quiet.
pub fn spinner(message: impl Into<String>, quiet: bool) -> ProgressBar {
    if quiet || !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table(headers: &[&str], rows: impl Iterator<Item = Vec<String>>, color: bool) -> String {
    let mut builder = Builder::default();
    builder.push_record(headers.iter().map(|h| {
        if color {
            h.bold().to_string()
        } else {
            (*h).to_owned()
        }
    }));
    for row in rows {
        builder.push_record(row);
    }
    builder.build().with(Style::rounded()).to_string()
}

/// Aligned `Label: value` lines.
fn render_fields_block(fields: &[(&'static str, String)], color: bool) -> String {
    let width = fields.iter().map(|(label, _)| label.len()).max().unwrap_or(0) + 1;
    fields
        .iter()
        .map(|(label, value)| {
            let label = format!("{label}:");
            let padded = format!("{label:<width$}");
            if color {
                format!("{}  {value}", padded.bold())
            } else {
                format!("{padded}  {value}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pretty-printed JSON.
pub(crate) fn render_json_pretty<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_default()
}

/// Compact single-line JSON.
pub(crate) fn render_json_compact<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string(data).unwrap_or_default()
}

/// YAML output.
pub(crate) fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use nfconsole_core::{ListRow, ResourceKind};

    use super::*;

    fn gnb_view() -> ListView {
        ListView {
            kind: ResourceKind::Gnb,
            columns: vec!["Name", "TAC"],
            rows: vec![ListRow {
                key: "gnb1".into(),
                cells: vec!["gnb1".into(), "1".into()],
                actions: vec![],
                record: json!({"name": "gnb1", "tac": 1}),
            }],
            error: None,
        }
    }

    #[test]
    fn table_has_headers_and_cells() {
        let out = render_list(&OutputFormat::Table, &gnb_view(), false);
        assert!(out.contains("Name"));
        assert!(out.contains("gnb1"));
    }

    #[test]
    fn structured_formats_emit_records() {
        let out = render_list(&OutputFormat::JsonCompact, &gnb_view(), false);
        assert_eq!(out, r#"[{"name":"gnb1","tac":1}]"#);
        assert_eq!(render_list(&OutputFormat::Plain, &gnb_view(), false), "gnb1");
    }

    #[test]
    fn empty_table_shows_empty_state() {
        let mut view = gnb_view();
        view.rows.clear();
        assert_eq!(render_list(&OutputFormat::Table, &view, false), "No gNBs found");
        assert_eq!(render_list(&OutputFormat::JsonCompact, &view, false), "[]");
    }

    #[test]
    fn detail_labels_align() {
        let view = DetailView {
            kind: ResourceKind::Gnb,
            key: "gnb1".into(),
            fields: vec![("Name", "gnb1".into()), ("TAC", "1".into())],
            record: json!({}),
        };
        assert_eq!(
            render_detail(&OutputFormat::Table, &view, false),
            "Name:  gnb1\nTAC:   1"
        );
    }

    #[test]
    fn integer_bounds_are_described() {
        assert_eq!(
            describe_kind(FieldKind::Integer {
                min: Some(1),
                max: Some(16_777_215)
            }),
            "integer 1..=16777215"
        );
    }
}
