//! `myuplink config` handlers.

use myuplink_config::Profile;

use crate::cli::{ConfigArgs, ConfigCommand};
use crate::error::CliError;

pub fn handle(args: &ConfigArgs) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init {
            ref profile,
            ref client_id,
            ref client_secret,
        } => init(profile, client_id, client_secret.as_deref()),

        ConfigCommand::Path => {
            println!("{}", myuplink_config::config_path().display());
            Ok(())
        }

        ConfigCommand::Show => {
            let mut config = myuplink_config::load_config_or_default();
            for profile in config.profiles.values_mut() {
                if profile.client_secret.is_some() {
                    profile.client_secret = Some("********".into());
                }
            }
            let rendered = toml::to_string_pretty(&config).map_err(|e| CliError::Validation {
                field: "config".into(),
                reason: e.to_string(),
            })?;
            print!("{rendered}");
            Ok(())
        }
    }
}

fn init(profile_name: &str, client_id: &str, client_secret: Option<&str>) -> Result<(), CliError> {
    let mut config = myuplink_config::load_config_or_default();

    let profile = config
        .profiles
        .entry(profile_name.to_owned())
        .or_insert_with(Profile::default);
    profile.client_id = Some(client_id.to_owned());
    if let Some(secret) = client_secret {
        profile.client_secret = Some(secret.to_owned());
    }

    if config.default_profile.is_none() {
        config.default_profile = Some(profile_name.to_owned());
    }

    myuplink_config::save_config(&config)?;
    eprintln!(
        "Profile '{profile_name}' written to {}",
        myuplink_config::config_path().display()
    );
    Ok(())
}
