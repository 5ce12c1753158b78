//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a stable exit code.

use miette::Diagnostic;
use thiserror::Error;

use nfconsole_config::ConfigError;
use nfconsole_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONNECTION: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const REJECTED: i32 = 5;
    pub const TIMEOUT: i32 = 6;
    pub const CONFIG: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the configuration service")]
    #[diagnostic(
        code(nfconsole::connection_failed),
        help(
            "{message}\n\
             Check that the service is running and the profile's server URL is right.\n\
             Try: nfconsole config show"
        )
    )]
    ConnectionFailed { message: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(nfconsole::timeout),
        help("Increase the timeout with --timeout or check the service's responsiveness.")
    )]
    Timeout,

    // ── Server answers ───────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(nfconsole::not_found),
        help("Run: nfconsole {list_command} to see the existing records")
    )]
    NotFound { message: String, list_command: String },

    /// Server text is shown verbatim.
    #[error("{message}")]
    #[diagnostic(code(nfconsole::rejected), help("The server answered HTTP {status}."))]
    Rejected { status: u16, message: String },

    #[error("Unexpected response from server: {message}")]
    #[diagnostic(code(nfconsole::unexpected_response))]
    UnexpectedResponse { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid input:\n{}", format_errors(.errors))]
    #[diagnostic(
        code(nfconsole::validation),
        help("Nothing was sent. Run `nfconsole <resource> fields` for field ids and formats.")
    )]
    InvalidForm { errors: Vec<String> },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(nfconsole::usage))]
    Validation { field: String, reason: String },

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(nfconsole::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(nfconsole::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(nfconsole::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: nfconsole config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No server configured")]
    #[diagnostic(
        code(nfconsole::no_config),
        help(
            "Create a profile with: nfconsole config init\n\
             Or pass --server / set NFCONSOLE_SERVER.\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error("Invalid configuration value for {field}: {reason}")]
    #[diagnostic(code(nfconsole::config))]
    InvalidConfig { field: String, reason: String },

    #[error("{0}")]
    #[diagnostic(code(nfconsole::config))]
    Config(String),

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Prompt failed: {0}")]
    #[diagnostic(code(nfconsole::prompt))]
    Prompt(String),
}

fn format_errors(errors: &[String]) -> String {
    errors.iter().map(|e| format!("  - {e}")).collect::<Vec<_>>().join("\n")
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Rejected { .. } => exit_code::REJECTED,
            Self::InvalidForm { .. }
            | Self::Validation { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::Json(_) => exit_code::USAGE,
            Self::ProfileNotFound { .. } | Self::NoConfig { .. } | Self::InvalidConfig { .. } | Self::Config(_) => {
                exit_code::CONFIG
            }
            Self::UnexpectedResponse { .. } | Self::Io(_) | Self::Prompt(_) => exit_code::GENERAL,
        }
    }

    /// Convert a core error raised while working on `list_command`'s records.
    pub fn from_core(err: CoreError, list_command: &str) -> Self {
        match err {
            CoreError::Api { status: 404, message } => Self::NotFound {
                message,
                list_command: list_command.into(),
            },
            other => other.into(),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation { errors } => Self::InvalidForm { errors },
            CoreError::Connection { message } => Self::ConnectionFailed { message },
            CoreError::Timeout { .. } => Self::Timeout,
            CoreError::Api { status: 404, message } => Self::NotFound {
                message,
                list_command: "<resource> list".into(),
            },
            CoreError::Api { status, message } => Self::Rejected { status, message },
            CoreError::Payload { message } => Self::UnexpectedResponse { message },
            CoreError::Config { message } => Self::Config(message),
            CoreError::ConsoleClosed => Self::UnexpectedResponse {
                message: "console stopped before answering".into(),
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::InvalidConfig { field, reason },
            ConfigError::UnknownProfile { name } => Self::ProfileNotFound {
                name,
                available: "(none)".into(),
            },
            ConfigError::Io(e) => Self::Io(e),
            other => Self::Config(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_rejections_keep_their_text() {
        let err = CliError::from(CoreError::Api {
            status: 409,
            message: "device group site1 already exists".into(),
        });
        assert_eq!(err.to_string(), "device group site1 already exists");
        assert_eq!(err.exit_code(), exit_code::REJECTED);
    }

    #[test]
    fn not_found_names_the_list_command() {
        let err = CliError::from_core(
            CoreError::Api {
                status: 404,
                message: "gnb not found".into(),
            },
            "gnbs list",
        );
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
        assert!(matches!(err, CliError::NotFound { ref list_command, .. } if list_command == "gnbs list"));
    }

    #[test]
    fn validation_lists_every_message() {
        let err = CliError::from(CoreError::Validation {
            errors: vec!["IMSI must be exactly 15 digits".into(), "MCC must be exactly 3 digits".into()],
        });
        assert_eq!(err.exit_code(), exit_code::USAGE);
        assert_eq!(
            err.to_string(),
            "Invalid input:\n  - IMSI must be exactly 15 digits\n  - MCC must be exactly 3 digits"
        );
    }

    #[test]
    fn config_failures_exit_seven() {
        let err = CliError::from(ConfigError::Validation {
            field: "server".into(),
            reason: "invalid URL: x".into(),
        });
        assert_eq!(err.exit_code(), exit_code::CONFIG);
        assert_eq!(CliError::from(CoreError::Timeout { timeout_secs: 5 }).exit_code(), exit_code::TIMEOUT);
    }
}
