// ── Command API ──
//
// Every console operation is a `Command` tagged with the resource kind it
// targets. The console routes each one to the matching manager.

use serde::Serialize;

use crate::error::CoreError;
use crate::form::FormValues;
use crate::kind::ResourceKind;
use crate::view::{DetailView, ListView};

/// A command envelope sent through the console channel.
/// Contains the command and a oneshot response channel.
pub(crate) struct CommandEnvelope {
    pub command: Command,
    pub response_tx: tokio::sync::oneshot::Sender<Result<CommandResult, CoreError>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List(ResourceKind),
    /// List, failing with the error instead of showing it in the list.
    Fetch(ResourceKind),
    Get { kind: ResourceKind, key: String },
    Create { kind: ResourceKind, form: FormValues },
    Update {
        kind: ResourceKind,
        key: String,
        form: FormValues,
    },
    Delete { kind: ResourceKind, key: String },
    /// Keys of `kind`, for selector fields that reference it.
    Options(ResourceKind),
}

impl Command {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::List(kind) | Self::Fetch(kind) | Self::Options(kind) => *kind,
            Self::Get { kind, .. }
            | Self::Create { kind, .. }
            | Self::Update { kind, .. }
            | Self::Delete { kind, .. } => *kind,
        }
    }

    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::Create { .. } | Self::Update { .. } | Self::Delete { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "kebab-case")]
pub enum CommandResult {
    List(ListView),
    /// One record, rendered and as edit-form values.
    Detail { view: DetailView, form: FormValues },
    Saved {
        kind: ResourceKind,
        key: String,
        created: bool,
        list: ListView,
    },
    Deleted {
        kind: ResourceKind,
        key: String,
        list: ListView,
    },
    Options { kind: ResourceKind, keys: Vec<String> },
}

impl CommandResult {
    /// The refreshed list carried by this result, if any.
    pub fn list(&self) -> Option<&ListView> {
        match self {
            Self::List(list) | Self::Saved { list, .. } | Self::Deleted { list, .. } => Some(list),
            Self::Detail { .. } | Self::Options { .. } => None,
        }
    }
}
