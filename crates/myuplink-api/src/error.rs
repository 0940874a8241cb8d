use thiserror::Error;

/// Top-level error type for the `myuplink-api` crate.
///
/// Covers every failure mode across the API surface: token acquisition,
/// HTTP transport, structured API errors, and payload decoding.
/// `myuplink-core` maps these into its own refresh-cycle taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Token rejected or token acquisition failed (bad client id/secret,
    /// revoked grant, insufficient scope).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── API ─────────────────────────────────────────────────────────
    /// Non-success status from the myUplink API.
    #[error("myUplink API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error means the session's credentials are
    /// no longer accepted and re-authentication is required.
    pub fn is_auth(&self) -> bool {
        match self {
            Self::Authentication { .. } => true,
            Self::Api { status, .. } => matches!(status, 401 | 403),
            Self::Transport(e) => {
                matches!(e.status().map(|s| s.as_u16()), Some(401 | 403))
            }
            _ => false,
        }
    }

    /// Returns `true` if this is a transient error worth retrying on the
    /// next scheduled refresh.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
