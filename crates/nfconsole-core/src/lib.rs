//! Console logic between `nfconsole-api` and the front ends (CLI / TUI).
//!
//! - **[`Resource`]**: per-entity field descriptors, validation,
//!   form ↔ payload mapping, display columns and API routes.
//! - **[`Manager<R>`]**: the shared list / create / update / delete flow with
//!   a cache of the last list.
//! - **[`Console`]**: one manager per [`ResourceKind`]; routes [`Command`]s.
//!   [`Console::spawn`] runs it behind a cloneable [`ConsoleHandle`].
//! - **[`Shell`]**: front-end neutral navigation state (section, detail
//!   view/edit toggle, delete confirmation) producing [`Notification`]s.

pub mod command;
pub mod config;
pub mod console;
pub mod error;
pub mod form;
pub mod kind;
pub mod manager;
pub mod notification;
pub mod resource;
pub mod shell;
pub mod validate;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::{Command, CommandResult};
pub use config::ConsoleConfig;
pub use console::{Console, ConsoleHandle};
pub use error::CoreError;
pub use form::{FieldKind, FieldSpec, FormValues};
pub use kind::ResourceKind;
pub use manager::Manager;
pub use notification::{Notification, NotificationLevel};
pub use resource::{DeviceGroups, Gnbs, K4Keys, NetworkSlices, Resource, Subscribers, Upfs};
pub use shell::{DetailMode, OpenDetail, PendingDelete, Shell};
pub use validate::Validation;
pub use view::{DetailView, ListRow, ListState, ListView, RowAction};

pub use nfconsole_api::{BasePaths, TlsMode};

/// Field descriptors of `kind`.
pub fn fields_of(kind: ResourceKind) -> &'static [FieldSpec] {
    match kind {
        ResourceKind::DeviceGroup => DeviceGroups::fields(),
        ResourceKind::NetworkSlice => NetworkSlices::fields(),
        ResourceKind::Gnb => Gnbs::fields(),
        ResourceKind::Upf => Upfs::fields(),
        ResourceKind::K4Key => K4Keys::fields(),
        ResourceKind::Subscriber => Subscribers::fields(),
    }
}

/// Validate a form for `kind` without touching the network.
pub fn validate_form(kind: ResourceKind, form: &FormValues) -> Validation {
    match kind {
        ResourceKind::DeviceGroup => DeviceGroups::validate(form),
        ResourceKind::NetworkSlice => NetworkSlices::validate(form),
        ResourceKind::Gnb => Gnbs::validate(form),
        ResourceKind::Upf => Upfs::validate(form),
        ResourceKind::K4Key => K4Keys::validate(form),
        ResourceKind::Subscriber => Subscribers::validate(form),
    }
}

/// Convert a raw JSON payload of `kind` into form values.
///
/// Used for `--from-file` input: the payload is decoded into the wire
/// record first, so unknown shapes are rejected before anything is sent.
pub fn form_from_json(kind: ResourceKind, payload: serde_json::Value) -> Result<FormValues, CoreError> {
    fn decode<R: Resource>(payload: serde_json::Value) -> Result<FormValues, CoreError> {
        let record: R::Record = serde_json::from_value(payload).map_err(|e| CoreError::Payload {
            message: e.to_string(),
        })?;
        Ok(R::from_payload(&record))
    }

    match kind {
        ResourceKind::DeviceGroup => decode::<DeviceGroups>(payload),
        ResourceKind::NetworkSlice => decode::<NetworkSlices>(payload),
        ResourceKind::Gnb => decode::<Gnbs>(payload),
        ResourceKind::Upf => decode::<Upfs>(payload),
        ResourceKind::K4Key => decode::<K4Keys>(payload),
        ResourceKind::Subscriber => decode::<Subscribers>(payload),
    }
}
