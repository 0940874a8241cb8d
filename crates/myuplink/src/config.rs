//! Profile resolution with CLI flag overrides.

use myuplink_config::{Config, ConnectionSettings, Profile, profile_to_settings};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// The profile name to use: flag, then config default, then "default".
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Resolve connection settings from config + CLI flag overrides.
pub fn resolve_settings(global: &GlobalOpts) -> Result<ConnectionSettings, CliError> {
    let config = myuplink_config::load_config_or_default();
    let profile_name = active_profile_name(global, &config);

    let mut profile = config
        .profiles
        .get(&profile_name)
        .cloned()
        .unwrap_or_else(Profile::default);

    // CLI flags win over the profile.
    if let Some(ref api_url) = global.api_url {
        profile.api_url = Some(api_url.clone());
    }
    if let Some(ref client_id) = global.client_id {
        profile.client_id = Some(client_id.clone());
    }
    if let Some(ref client_secret) = global.client_secret {
        profile.client_secret = Some(client_secret.clone());
    }
    profile.timeout = Some(global.timeout);

    Ok(profile_to_settings(&config, &profile, &profile_name)?)
}
