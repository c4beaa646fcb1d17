//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use pulsewatch_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to the monitoring service at {url}")]
    #[diagnostic(
        code(pulsewatch::connection_failed),
        help(
            "Check that the service is running and accessible.\n\
             URL: {url}\n\
             Try: pulsewatch monitoring status --url <URL>"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(pulsewatch::timeout),
        help("Increase the timeout with --timeout or check service responsiveness.")
    )]
    Timeout,

    // ── Resources ────────────────────────────────────────────────────
    #[error("Not found: {identifier}")]
    #[diagnostic(
        code(pulsewatch::not_found),
        help("Run: pulsewatch manual list to see available entries")
    )]
    NotFound { identifier: String },

    // ── Service ──────────────────────────────────────────────────────
    #[error("Service error: {message}")]
    #[diagnostic(code(pulsewatch::api_error))]
    Api {
        message: String,
        status: Option<u16>,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(pulsewatch::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(pulsewatch::config),
        help("Check the config file or pass --url explicitly.")
    )]
    Config { message: String },

    // ── Queries ──────────────────────────────────────────────────────
    #[error("Query failed: {message}")]
    #[diagnostic(code(pulsewatch::query))]
    Query { message: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config {
            message: err.to_string(),
        }
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ValidationFailed { field, reason } => CliError::Validation { field, reason },

            CoreError::ConnectionFailed { url, reason } => {
                CliError::ConnectionFailed { url, reason }
            }

            CoreError::Timeout => CliError::Timeout,

            CoreError::Api { message, status } => CliError::Api { message, status },

            CoreError::NotFound { identifier } => CliError::NotFound { identifier },

            CoreError::Config { message } => CliError::Config { message },

            CoreError::Internal(message) => CliError::Api {
                message,
                status: None,
            },
        }
    }
}
