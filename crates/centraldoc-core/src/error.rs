// ── Core error types ──
//
// Errors surfaced by the aggregation pipeline. Remote error *statuses* never
// show up here: the fetch layer degrades them into partial payloads. What
// remains are failures that abort a single report, plus the few that abort
// the whole batch (see `CoreError::is_fatal`).

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to Central at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Malformed payload from {endpoint}: {reason}")]
    MalformedPayload { endpoint: String, reason: String },

    // ── Output errors ────────────────────────────────────────────────
    #[error("Cannot write document {}: {message}", path.display())]
    Document { path: PathBuf, message: String },

    #[error("Conversion of {} failed: {message}", path.display())]
    Conversion { path: PathBuf, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Returns `true` for errors that must stop the whole batch rather
    /// than a single report.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::AuthenticationFailed { .. } | Self::Config { .. })
    }

    pub(crate) fn malformed(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<centraldoc_api::Error> for CoreError {
    fn from(err: centraldoc_api::Error) -> Self {
        match err {
            centraldoc_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            centraldoc_api::Error::TokenRefresh { status, message } => {
                CoreError::AuthenticationFailed {
                    message: format!("token refresh rejected (HTTP {status}): {message}"),
                }
            }
            centraldoc_api::Error::Transport(ref e) => CoreError::ConnectionFailed {
                url: e
                    .url()
                    .map_or_else(|| "<unknown>".into(), ToString::to_string),
                reason: e.to_string(),
            },
            centraldoc_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            centraldoc_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            centraldoc_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
