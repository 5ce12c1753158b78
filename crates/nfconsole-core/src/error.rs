// ── Core error types ──
//
// User-facing errors from nfconsole-core. The three failure classes the
// console distinguishes are kept apart: local validation (blocking, listed),
// transport trouble (generic failure), and server rejections (raw text).

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Local validation ─────────────────────────────────────────────
    /// One or more fields failed validation; nothing was sent.
    #[error("Validation failed: {}", .errors.join("; "))]
    Validation { errors: Vec<String> },

    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the configuration service: {message}")]
    Connection { message: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Server answers ───────────────────────────────────────────────
    /// The server rejected the request; `message` is its raw text.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The server answered 2xx with a body the console cannot read.
    #[error("Unexpected response from server: {message}")]
    Payload { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Console stopped before answering")]
    ConsoleClosed,
}

impl CoreError {
    /// Convenience constructor for a single validation message.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Validation {
            errors: vec![message.into()],
        }
    }

    /// Returns `true` for failures caught before any network call.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Returns `true` if the server said the entity does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<nfconsole_api::Error> for CoreError {
    fn from(err: nfconsole_api::Error) -> Self {
        use nfconsole_api::Error as ApiError;

        match err {
            ApiError::Transport(ref e) if e.is_timeout() => Self::Timeout { timeout_secs: 0 },
            ApiError::Transport(e) => match e.status() {
                Some(status) => Self::Api {
                    status: status.as_u16(),
                    message: e.to_string(),
                },
                None => Self::Connection {
                    message: e.to_string(),
                },
            },
            ApiError::InvalidUrl(e) => Self::Config {
                message: format!("Invalid URL: {e}"),
            },
            ApiError::InvalidBaseUrl(url) => Self::Config {
                message: format!("Invalid server URL: {url}"),
            },
            ApiError::Timeout { timeout_secs } => Self::Timeout { timeout_secs },
            ApiError::Tls(message) => Self::Connection {
                message: format!("TLS error: {message}"),
            },
            ApiError::Api { status, message } => Self::Api { status, message },
            ApiError::Deserialization { message, body: _ } => Self::Payload { message },
        }
    }
}
