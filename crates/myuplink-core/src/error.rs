// ── Core error types ──
//
// Refresh-cycle errors follow a strict two-way split: authentication
// failures are terminal until the owning session re-authenticates,
// everything else on the transport is transient and retried on the
// next scheduled tick. The `From<myuplink_api::Error>` impl performs
// that classification; no retry or backoff happens at this layer.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Refresh cycle ────────────────────────────────────────────────
    /// Credentials no longer accepted. Terminal: the coordinator stops
    /// its periodic refresh and the owner must re-authenticate.
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    /// Transient transport failure. The caller controls retry
    /// scheduling (the periodic task simply waits for the next tick).
    #[error("Data not ready: {reason}")]
    NotReady { reason: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Device not found: {identifier}")]
    DeviceNotFound { identifier: String },

    #[error("Point {parameter_id} not found on device {device_id}")]
    PointNotFound {
        device_id: String,
        parameter_id: String,
    },

    #[error("Point {parameter_id} is not writable")]
    NotWritable { parameter_id: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Returns `true` for the terminal auth failure that requires the
    /// owning session to re-authenticate.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::AuthenticationFailed { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<myuplink_api::Error> for CoreError {
    fn from(err: myuplink_api::Error) -> Self {
        if err.is_auth() {
            return CoreError::AuthenticationFailed {
                message: err.to_string(),
            };
        }
        match err {
            myuplink_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            other => CoreError::NotReady {
                reason: other.to_string(),
            },
        }
    }
}
