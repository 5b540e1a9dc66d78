use thiserror::Error;

/// Top-level error type for the `centraldoc-api` crate.
///
/// Error *statuses* from the Central API are not errors at this layer:
/// they come back as an [`ApiResponse`](crate::ApiResponse) with the status
/// code attached, so callers can decide whether to retry. Only failures that
/// prevent a response from existing at all end up here.
/// `centraldoc-core` maps these into batch-level diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The access token was rejected and could not be refreshed.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Token refresh was attempted but the OAuth endpoint refused it.
    #[error("Token refresh failed (HTTP {status}): {message}")]
    TokenRefresh { status: u16, message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error means the session is no longer usable.
    pub fn is_auth_expired(&self) -> bool {
        matches!(
            self,
            Self::Authentication { .. } | Self::TokenRefresh { .. }
        )
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            _ => false,
        }
    }
}
