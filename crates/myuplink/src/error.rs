//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and config errors into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use myuplink_core::CoreError;

/// Exit codes per error class.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const NOT_READY: i32 = 5;
}

#[derive(Debug, Error, Diagnostic)]
#[allow(dead_code)]
pub enum CliError {
    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed")]
    #[diagnostic(
        code(myuplink::auth_failed),
        help(
            "Verify your client id/secret at https://dev.myuplink.com.\n\
             Credentials come from the profile, MYUPLINK_CLIENT_ID /\n\
             MYUPLINK_CLIENT_SECRET, or the system keyring."
        )
    )]
    AuthFailed { message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(myuplink::no_credentials),
        help(
            "Add client_id/client_secret to your profile, or set\n\
             MYUPLINK_CLIENT_ID and MYUPLINK_CLIENT_SECRET."
        )
    )]
    NoCredentials { profile: String },

    // ── Transient ────────────────────────────────────────────────────
    #[error("myUplink cloud not reachable")]
    #[diagnostic(
        code(myuplink::not_ready),
        help("The cloud did not answer: {reason}\nTry again shortly.")
    )]
    NotReady { reason: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(myuplink::not_found),
        help("Run: myuplink {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("Point '{parameter}' is not writable")]
    #[diagnostic(
        code(myuplink::not_writable),
        help("Run: myuplink points <device> --writable to list writable points")
    )]
    NotWritable { parameter: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error: {message}")]
    #[diagnostic(code(myuplink::api_error))]
    ApiError {
        message: String,
        status: Option<u16>,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(myuplink::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(myuplink::config))]
    Config(Box<figment::Error>),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(myuplink::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    #[diagnostic(code(myuplink::json))]
    Json(#[from] serde_json::Error),

    #[error("Serialization failed: {0}")]
    #[diagnostic(code(myuplink::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotReady { .. } => exit_code::NOT_READY,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. }
            | Self::NotWritable { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::NotReady { reason } => CliError::NotReady { reason },

            CoreError::DeviceNotFound { identifier } => CliError::NotFound {
                resource_type: "device".into(),
                identifier,
                list_command: "devices".into(),
            },

            CoreError::PointNotFound {
                device_id,
                parameter_id,
            } => CliError::NotFound {
                resource_type: "point".into(),
                identifier: parameter_id,
                list_command: format!("points {device_id}"),
            },

            CoreError::NotWritable { parameter_id } => CliError::NotWritable {
                parameter: parameter_id,
            },

            CoreError::Api { message, status } => CliError::ApiError { message, status },

            CoreError::Internal(message) => CliError::ApiError {
                message,
                status: None,
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<myuplink_config::ConfigError> for CliError {
    fn from(err: myuplink_config::ConfigError) -> Self {
        match err {
            myuplink_config::ConfigError::NoCredentials { profile } => {
                CliError::NoCredentials { profile }
            }
            myuplink_config::ConfigError::Validation { field, reason } => {
                CliError::Validation { field, reason }
            }
            myuplink_config::ConfigError::Figment(e) => CliError::Config(e),
            myuplink_config::ConfigError::Io(e) => CliError::Io(e),
            myuplink_config::ConfigError::Serialization(e) => CliError::Validation {
                field: "config".into(),
                reason: e.to_string(),
            },
        }
    }
}
