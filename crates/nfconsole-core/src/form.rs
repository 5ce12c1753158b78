// ── Form descriptors and values ──
//
// Resources describe their editable fields with `FieldSpec`s; front ends
// turn those into prompts or input widgets without knowing anything else
// about the resource. Entered values travel back as `FormValues`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::kind::ResourceKind;

/// Input style of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line free text.
    Text,
    /// Whole number, with inclusive bounds when the field has them.
    Integer { min: Option<u64>, max: Option<u64> },
    /// One value per line (IMSI lists, gNodeB entries).
    Lines,
    /// Choice from a fixed set.
    Choice(&'static [&'static str]),
    /// Choice of existing keys of another resource.
    Reference(ResourceKind),
}

/// Descriptor of one editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Natural key of the entity: read-only once the entity exists.
    pub key: bool,
    /// Holds several values, one per line.
    pub multiple: bool,
    pub placeholder: &'static str,
    pub help: Option<&'static str>,
}

impl FieldSpec {
    pub const fn text(id: &'static str, label: &'static str) -> Self {
        Self {
            id,
            label,
            kind: FieldKind::Text,
            required: false,
            key: false,
            multiple: false,
            placeholder: "",
            help: None,
        }
    }

    pub const fn integer(id: &'static str, label: &'static str, min: Option<u64>, max: Option<u64>) -> Self {
        Self {
            kind: FieldKind::Integer { min, max },
            ..Self::text(id, label)
        }
    }

    pub const fn lines(id: &'static str, label: &'static str) -> Self {
        Self {
            kind: FieldKind::Lines,
            multiple: true,
            ..Self::text(id, label)
        }
    }

    pub const fn choice(id: &'static str, label: &'static str, options: &'static [&'static str]) -> Self {
        Self {
            kind: FieldKind::Choice(options),
            ..Self::text(id, label)
        }
    }

    /// Several keys of `target` may be picked.
    pub const fn reference(id: &'static str, label: &'static str, target: ResourceKind) -> Self {
        Self {
            kind: FieldKind::Reference(target),
            multiple: true,
            ..Self::text(id, label)
        }
    }

    /// Exactly one value.
    pub const fn single(self) -> Self {
        Self {
            multiple: false,
            ..self
        }
    }

    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    /// Mark as the entity's natural key (implies required).
    pub const fn key(self) -> Self {
        Self {
            key: true,
            required: true,
            ..self
        }
    }

    pub const fn placeholder(self, placeholder: &'static str) -> Self {
        Self { placeholder, ..self }
    }

    pub const fn help(self, help: &'static str) -> Self {
        Self {
            help: Some(help),
            ..self
        }
    }

    /// Whether the field may be edited in the given mode.
    pub fn editable(&self, editing_existing: bool) -> bool {
        !(self.key && editing_existing)
    }
}

/// Find the natural-key descriptor of a field set.
pub fn key_field(fields: &[FieldSpec]) -> Option<&FieldSpec> {
    fields.iter().find(|f| f.key)
}

// ── Values ───────────────────────────────────────────────────────────

/// Entered form values, field id → raw text, in field order.
///
/// Multi-valued fields hold one value per line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues(IndexMap<String, String>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trimmed value of `id`, or `""` when absent.
    pub fn get(&self, id: &str) -> &str {
        self.0.get(id).map_or("", |v| v.trim())
    }

    /// Non-blank value of `id`.
    pub fn opt(&self, id: &str) -> Option<&str> {
        Some(self.get(id)).filter(|v| !v.is_empty())
    }

    /// Non-blank lines of a multi-valued field, trimmed, in order.
    ///
    /// Commas separate values too, so `"a, b"` and `"a\nb"` read the same.
    pub fn lines(&self, id: &str) -> Vec<String> {
        self.get(id)
            .split(['\n', ','])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect()
    }

    pub fn set(&mut self, id: impl Into<String>, value: impl Into<String>) {
        self.0.insert(id.into(), value.into());
    }

    /// Set only when `value` is present; absent values leave the field out.
    pub fn set_opt(&mut self, id: impl Into<String>, value: Option<impl Into<String>>) {
        if let Some(value) = value {
            self.set(id, value);
        }
    }

    pub fn set_lines<I, S>(&mut self, id: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined: Vec<String> = values.into_iter().map(|s| s.as_ref().to_owned()).collect();
        self.set(id, joined.join("\n"));
    }

    /// Merge `other` on top of `self`; present values in `other` win.
    pub fn merge(&mut self, other: &Self) {
        for (k, v) in &other.0 {
            self.0.insert(k.clone(), v.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormValues {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_trim_and_split() {
        let form: FormValues = [("imsis", " 001010000000001\n\n001010000000002 , 001010000000003 "), ("name", " a ")]
            .into_iter()
            .collect();
        assert_eq!(form.get("name"), "a");
        assert_eq!(form.get("missing"), "");
        assert_eq!(form.opt("missing"), None);
        assert_eq!(
            form.lines("imsis"),
            ["001010000000001", "001010000000002", "001010000000003"]
        );
    }

    #[test]
    fn key_fields_are_read_only_when_editing() {
        let fields = [
            FieldSpec::text("name", "Name").key(),
            FieldSpec::integer("tac", "TAC", Some(1), None),
        ];
        let key = key_field(&fields).map(|f| f.id);
        assert_eq!(key, Some("name"));
        assert!(fields[0].required);
        assert!(fields[0].editable(false));
        assert!(!fields[0].editable(true));
        assert!(fields[1].editable(true));
    }

    #[test]
    fn merge_overrides() {
        let mut base: FormValues = [("a", "1"), ("b", "2")].into_iter().collect();
        let over: FormValues = [("b", "3")].into_iter().collect();
        base.merge(&over);
        assert_eq!(base.get("a"), "1");
        assert_eq!(base.get("b"), "3");
    }
}
