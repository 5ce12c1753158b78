//! All UI actions. Actions are the sole mechanism for state mutation.

use nfconsole_core::{Command, CommandResult, CoreError, FormValues, ResourceKind};

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    /// Periodic housekeeping (notification expiry).
    Tick,

    // ── Navigation ────────────────────────────────────────────────
    SwitchSection(ResourceKind),
    /// Re-fetch the open detail, or the current section's list.
    Refresh,
    OpenDetail(String),
    /// Open a record straight into its edit form.
    EditRecord(String),
    CloseDetail,

    // ── Forms ─────────────────────────────────────────────────────
    NewForm,
    EditForm,
    CancelForm,
    SubmitForm(FormValues),

    // ── Delete confirmation ───────────────────────────────────────
    RequestDelete(String),
    ConfirmYes,
    ConfirmNo,

    // ── Results ───────────────────────────────────────────────────
    /// A console command finished on a background task.
    CommandDone {
        command: Command,
        result: Result<CommandResult, CoreError>,
    },
    DismissNotification,
}
