// ── Resource capability ──
//
// Each entity type implements `Resource` once: its field descriptors,
// validation rules, form <-> payload mapping, display columns and the
// API routes it uses. `Manager<R>` adds the shared list/mutate flow.

mod device_group;
mod gnb;
mod k4_key;
mod network_slice;
mod subscriber;
mod upf;

use std::fmt::Debug;
use std::future::Future;

use serde::Serialize;
use serde::de::DeserializeOwned;

use nfconsole_api::ApiClient;

pub use device_group::DeviceGroups;
pub use gnb::Gnbs;
pub use k4_key::K4Keys;
pub use network_slice::NetworkSlices;
pub use subscriber::Subscribers;
pub use upf::Upfs;

use crate::error::CoreError;
use crate::form::{FieldSpec, FormValues, key_field};
use crate::kind::ResourceKind;
use crate::validate::Validation;
use crate::view::{DetailView, ListRow, ListView, RowAction};

/// Per-entity behavior. Implementors are zero-sized marker types.
pub trait Resource: Send + Sync + 'static {
    /// The wire record exchanged with the API.
    type Record: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static;

    const KIND: ResourceKind;

    /// Editable fields, in display order. Exactly one is the key.
    fn fields() -> &'static [FieldSpec];

    /// Natural key of a record.
    fn key(record: &Self::Record) -> String;

    /// Check a form without touching the network.
    fn validate(form: &FormValues) -> Validation;

    /// Flat form fields → nested wire record. Expects a validated form.
    fn to_payload(form: &FormValues) -> Result<Self::Record, CoreError>;

    /// Wire record → flat form fields, for pre-filling an edit form.
    fn from_payload(record: &Self::Record) -> FormValues;

    /// Column headers of the list view.
    fn columns() -> &'static [&'static str];

    /// One cell per column.
    fn row(record: &Self::Record) -> Vec<String>;

    /// Label/value pairs of the detail view.
    fn detail(record: &Self::Record) -> Vec<(&'static str, String)>;

    // ── Routes ───────────────────────────────────────────────────────

    fn fetch_all(api: &ApiClient) -> impl Future<Output = Result<Vec<Self::Record>, CoreError>> + Send;

    fn fetch_one(api: &ApiClient, key: &str) -> impl Future<Output = Result<Self::Record, CoreError>> + Send;

    fn create(api: &ApiClient, record: &Self::Record) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn update(
        api: &ApiClient,
        key: &str,
        record: &Self::Record,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn delete(api: &ApiClient, key: &str) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// Id of the key field of `R`.
pub fn key_field_id<R: Resource>() -> &'static str {
    key_field(R::fields()).map_or("name", |f| f.id)
}

// ── Rendering ────────────────────────────────────────────────────────

fn to_json<T: Serialize>(record: &T) -> serde_json::Value {
    serde_json::to_value(record).unwrap_or(serde_json::Value::Null)
}

/// Build the list view of `records`.
pub fn list_view<R: Resource>(records: &[R::Record], error: Option<&str>) -> ListView {
    let rows = records
        .iter()
        .map(|record| {
            let key = R::key(record);
            ListRow {
                cells: R::row(record),
                actions: vec![
                    RowAction::Edit {
                        kind: R::KIND,
                        key: key.clone(),
                    },
                    RowAction::Delete {
                        kind: R::KIND,
                        key: key.clone(),
                    },
                ],
                record: to_json(record),
                key,
            }
        })
        .collect();

    ListView {
        kind: R::KIND,
        columns: R::columns().to_vec(),
        rows,
        error: error.map(str::to_owned),
    }
}

/// Build the detail view of one record.
pub fn detail_view<R: Resource>(record: &R::Record) -> DetailView {
    DetailView {
        kind: R::KIND,
        key: R::key(record),
        fields: R::detail(record),
        record: to_json(record),
    }
}

// ── Shared mapping helpers ───────────────────────────────────────────

/// Parse a validated integer field.
pub(crate) fn parse_field<T: std::str::FromStr>(form: &FormValues, id: &str, label: &str) -> Result<T, CoreError> {
    form.get(id)
        .parse()
        .map_err(|_| CoreError::invalid(format!("{label} must be a number")))
}

/// Parse an optional integer field; blank means absent.
pub(crate) fn parse_opt_field<T: std::str::FromStr>(
    form: &FormValues,
    id: &str,
    label: &str,
) -> Result<Option<T>, CoreError> {
    match form.opt(id) {
        None => Ok(None),
        Some(_) => parse_field(form, id, label).map(Some),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::form::FormValues;

    pub fn form(pairs: &[(&str, &str)]) -> FormValues {
        pairs.iter().copied().collect()
    }
}
