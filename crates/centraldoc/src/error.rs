//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use centraldoc_config::ConfigError;
use centraldoc_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const CONFIG: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach Aruba Central at {url}")]
    #[diagnostic(
        code(centraldoc::connection_failed),
        help(
            "Check base_url in your central.json and your network connection.\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(centraldoc::auth_failed),
        help(
            "The access token was rejected. Generate a new token in Central\n\
             (API Gateway > System Apps & Tokens) or configure client_id,\n\
             client_secret and token.refresh_token for automatic refresh."
        )
    )]
    AuthFailed { message: String },

    #[error("No access token configured for customer '{customer}'")]
    #[diagnostic(
        code(centraldoc::no_credentials),
        help(
            "Set CENTRALDOC_ACCESS_TOKEN, store the token in the system keyring\n\
             (service 'centraldoc', entry '{customer}/access-token'), or add\n\
             token.access_token to central.json."
        )
    )]
    NoCredentials { customer: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(centraldoc::no_config),
        help("Pass --json-central <FILE> or place central.json in the working directory.")
    )]
    NoConfig { path: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(centraldoc::validation))]
    Validation { field: String, reason: String },

    #[error("{0}")]
    #[diagnostic(code(centraldoc::config))]
    Config(String),

    // ── Internal ─────────────────────────────────────────────────────

    #[error("{0}")]
    #[diagnostic(code(centraldoc::internal))]
    Internal(String),

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not render summary: {0}")]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NoConfig { .. } | Self::Validation { .. } | Self::Config(_) => exit_code::CONFIG,
            _ => exit_code::GENERAL,
        }
    }
}

// ── Conversions ──────────────────────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },
            CoreError::Config { message } => Self::Config(message),
            CoreError::Io(e) => Self::Io(e),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::NoCredentials { customer } => Self::NoCredentials { customer },
            ConfigError::Missing { path } => Self::NoConfig {
                path: path.display().to_string(),
            },
            ConfigError::Figment(e) => Self::Config(e.to_string()),
            ConfigError::Io(e) => Self::Io(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_class() {
        let auth = CliError::from(CoreError::AuthenticationFailed {
            message: "expired".into(),
        });
        assert_eq!(auth.exit_code(), exit_code::AUTH);

        let missing = CliError::from(ConfigError::Missing {
            path: "central.json".into(),
        });
        assert_eq!(missing.exit_code(), exit_code::CONFIG);

        let conn = CliError::from(CoreError::ConnectionFailed {
            url: "https://central.example.com".into(),
            reason: "timed out".into(),
        });
        assert_eq!(conn.exit_code(), exit_code::CONNECTION);

        let internal = CliError::from(CoreError::Internal("boom".into()));
        assert_eq!(internal.exit_code(), exit_code::GENERAL);
    }
}
