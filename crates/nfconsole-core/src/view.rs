// ── List / detail view models ──
//
// Front-end neutral renderings of a resource list or a single record.
// The CLI turns these into tables or JSON; the TUI into ratatui widgets.

use serde::Serialize;

use crate::kind::ResourceKind;

/// What a manager's display area currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ListState<T> {
    /// Nothing fetched yet.
    Idle,
    Loaded(Vec<T>),
    /// The last fetch failed; the message is shown in place of the list.
    Failed(String),
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> ListState<T> {
    /// Records of the last successful fetch (empty otherwise).
    pub fn records(&self) -> &[T] {
        match self {
            Self::Loaded(records) => records,
            Self::Idle | Self::Failed(_) => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            Self::Idle | Self::Loaded(_) => None,
        }
    }
}

/// A per-row action trigger, carrying everything needed to dispatch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum RowAction {
    Edit { kind: ResourceKind, key: String },
    Delete { kind: ResourceKind, key: String },
}

impl RowAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Edit { .. } => "Edit",
            Self::Delete { .. } => "Delete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListRow {
    pub key: String,
    pub cells: Vec<String>,
    pub actions: Vec<RowAction>,
    /// The record as the API returned it.
    pub record: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListView {
    pub kind: ResourceKind,
    pub columns: Vec<&'static str>,
    pub rows: Vec<ListRow>,
    /// Set when the last fetch failed.
    pub error: Option<String>,
}

impl ListView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Text to show instead of rows: the failure, or the empty-state message.
    pub fn placeholder(&self) -> Option<&str> {
        if let Some(error) = &self.error {
            Some(error)
        } else if self.rows.is_empty() {
            Some(self.kind.empty_message())
        } else {
            None
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.key.clone()).collect()
    }

    pub fn row(&self, key: &str) -> Option<&ListRow> {
        self.rows.iter().find(|r| r.key == key)
    }

    /// The raw records, for JSON/YAML output.
    pub fn records(&self) -> Vec<&serde_json::Value> {
        self.rows.iter().map(|r| &r.record).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub kind: ResourceKind,
    pub key: String,
    /// Label → display value, in display order.
    pub fields: Vec<(&'static str, String)>,
    pub record: serde_json::Value,
}

/// Render an optional display value, `N/A` when absent or blank.
pub fn or_na(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_owned(),
        _ => "N/A".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(rows: Vec<ListRow>, error: Option<String>) -> ListView {
        ListView {
            kind: ResourceKind::Gnb,
            columns: vec!["Name", "TAC"],
            rows,
            error,
        }
    }

    #[test]
    fn empty_list_shows_empty_state() {
        assert_eq!(view(vec![], None).placeholder(), Some("No gNBs found"));
    }

    #[test]
    fn failure_wins_over_empty_state() {
        let v = view(vec![], Some("HTTP 500".into()));
        assert_eq!(v.placeholder(), Some("HTTP 500"));
    }

    #[test]
    fn loaded_rows_have_no_placeholder() {
        let row = ListRow {
            key: "gnb1".into(),
            cells: vec!["gnb1".into(), "1".into()],
            actions: vec![],
            record: serde_json::json!({"name": "gnb1"}),
        };
        let v = view(vec![row], None);
        assert_eq!(v.placeholder(), None);
        assert_eq!(v.keys(), ["gnb1"]);
    }

    #[test]
    fn na_for_blank() {
        assert_eq!(or_na(None), "N/A");
        assert_eq!(or_na(Some(" ")), "N/A");
        assert_eq!(or_na(Some("x")), "x");
    }
}
