//! Shared configuration for the myUplink CLI.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `myuplink_api` credentials. The CLI adds
//! flag-aware overrides on top.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use myuplink_api::{Credentials, DEFAULT_BASE_URL, TransportConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named account profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Seconds between periodic refreshes in watch mode.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            refresh_interval: default_refresh_interval(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}
fn default_refresh_interval() -> u64 {
    60
}

/// A named account profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// API base URL override (defaults to the production cloud).
    pub api_url: Option<String>,

    /// OAuth2 application client id (from dev.myuplink.com).
    pub client_id: Option<String>,

    /// Client secret (plaintext -- prefer keyring or env var).
    pub client_secret: Option<String>,

    /// Environment variable name containing the client secret.
    pub client_secret_env: Option<String>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Override refresh interval (seconds).
    pub refresh_interval: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "uplinkers", "myuplink").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("myuplink");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the full Config from an explicit file path + environment.
pub fn load_config_from(path: &std::path::Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("MYUPLINK_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the client secret from the credential chain.
pub fn resolve_client_secret(
    profile: &Profile,
    profile_name: &str,
) -> Result<SecretString, ConfigError> {
    // 1. Profile's client_secret_env → env var lookup
    if let Some(ref env_name) = profile.client_secret_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. Well-known env var
    if let Ok(val) = std::env::var("MYUPLINK_CLIENT_SECRET") {
        return Ok(SecretString::from(val));
    }

    // 3. System keyring
    if let Ok(entry) = keyring::Entry::new("myuplink", &format!("{profile_name}/client-secret")) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    // 4. Plaintext in config
    if let Some(ref secret) = profile.client_secret {
        return Ok(SecretString::from(secret.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Resolve full [`Credentials`] from a profile.
pub fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
) -> Result<Credentials, ConfigError> {
    // A pre-acquired token short-circuits the client-credentials flow.
    if let Ok(token) = std::env::var("MYUPLINK_ACCESS_TOKEN") {
        return Ok(Credentials::AccessToken(SecretString::from(token)));
    }

    let client_id = profile
        .client_id
        .clone()
        .or_else(|| std::env::var("MYUPLINK_CLIENT_ID").ok())
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })?;

    let client_secret = resolve_client_secret(profile, profile_name)?;

    Ok(Credentials::ClientCredentials {
        client_id,
        client_secret,
    })
}

// ── Connection settings ─────────────────────────────────────────────

/// Everything needed to build a client from a profile.
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    pub api_url: String,
    pub credentials: Credentials,
    pub transport: TransportConfig,
    pub refresh_interval: Duration,
}

/// Build [`ConnectionSettings`] from a profile, with config defaults
/// filling the gaps.
pub fn profile_to_settings(
    config: &Config,
    profile: &Profile,
    profile_name: &str,
) -> Result<ConnectionSettings, ConfigError> {
    let credentials = resolve_credentials(profile, profile_name)?;

    let api_url = profile
        .api_url
        .clone()
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());

    let timeout = profile.timeout.unwrap_or(config.defaults.timeout);
    let refresh_interval = profile
        .refresh_interval
        .unwrap_or(config.defaults.refresh_interval);

    Ok(ConnectionSettings {
        api_url,
        credentials,
        transport: TransportConfig {
            timeout: Duration::from_secs(timeout),
        },
        refresh_interval: Duration::from_secs(refresh_interval),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_config_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
default_profile = "home"

[defaults]
timeout = 10

[profiles.home]
client_id = "abc"
client_secret = "shh"
refresh_interval = 120
"#
        )
        .unwrap();

        let config = load_config_from(file.path()).unwrap();
        assert_eq!(config.default_profile.as_deref(), Some("home"));
        assert_eq!(config.defaults.timeout, 10);
        assert_eq!(config.defaults.refresh_interval, 60);

        let profile = config.profiles.get("home").unwrap();
        assert_eq!(profile.client_id.as_deref(), Some("abc"));
        assert_eq!(profile.refresh_interval, Some(120));
    }

    #[test]
    fn profile_overrides_defaults_in_settings() {
        let config = Config::default();
        let profile = Profile {
            client_id: Some("abc".into()),
            client_secret: Some("shh".into()),
            refresh_interval: Some(120),
            ..Profile::default()
        };

        let settings = profile_to_settings(&config, &profile, "home").unwrap();
        assert_eq!(settings.api_url, DEFAULT_BASE_URL);
        assert_eq!(settings.refresh_interval, Duration::from_secs(120));
        assert_eq!(settings.transport.timeout, Duration::from_secs(30));
        assert!(matches!(
            settings.credentials,
            Credentials::ClientCredentials { .. }
        ));
    }

    #[test]
    fn missing_credentials_is_an_error() {
        let profile = Profile::default();
        let err = resolve_credentials(&profile, "empty").unwrap_err();
        assert!(matches!(err, ConfigError::NoCredentials { .. }));
    }
}
