//! Shared helpers for command handlers.

use std::io::{self, IsTerminal};
use std::path::Path;

use nfconsole_core::ResourceKind;

use crate::error::CliError;

/// CLI subcommand name of a resource kind.
pub fn command_name(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::DeviceGroup => "device-groups",
        ResourceKind::NetworkSlice => "slices",
        ResourceKind::Gnb => "gnbs",
        ResourceKind::Upf => "upfs",
        ResourceKind::K4Key => "k4-keys",
        ResourceKind::Subscriber => "subscribers",
    }
}

/// Whether prompts can be shown.
pub fn interactive() -> bool {
    io::stdin().is_terminal() && io::stderr().is_terminal()
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Prompt(e.to_string())
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal to ask on, the operation is refused.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !interactive() {
        return Err(CliError::NonInteractiveRequiresYes { action: action.into() });
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(prompt_err)
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file(path: &Path) -> Result<serde_json::Value, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid JSON: {e}"),
    })
}
