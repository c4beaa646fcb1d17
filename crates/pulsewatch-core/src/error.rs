// ── Core error types ──
//
// User-facing errors from pulsewatch-core. Consumers never see raw
// reqwest errors or JSON parse failures directly; the
// `From<pulsewatch_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Local validation (pre-network) ───────────────────────────────
    #[error("Validation failed for {field}: {reason}")]
    ValidationFailed { field: String, reason: String },

    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to service at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    Timeout,

    // ── Service errors ───────────────────────────────────────────────
    #[error("Service error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    #[error("Not found: {identifier}")]
    NotFound { identifier: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub(crate) fn validation(field: &str, reason: impl Into<String>) -> Self {
        Self::ValidationFailed {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<pulsewatch_api::Error> for CoreError {
    fn from(err: pulsewatch_api::Error) -> Self {
        match err {
            pulsewatch_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            pulsewatch_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            pulsewatch_api::Error::Api { status: 404, message } => CoreError::NotFound {
                identifier: message,
            },
            pulsewatch_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            pulsewatch_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
