//! Argument definitions for the `myuplink` binary.

use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "myuplink",
    version,
    about = "Inspect and control myUplink heat-pump systems from the terminal",
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config profile to use.
    #[arg(long, short = 'p', global = true, env = "MYUPLINK_PROFILE")]
    pub profile: Option<String>,

    /// API base URL override.
    #[arg(long, global = true, env = "MYUPLINK_API_URL")]
    pub api_url: Option<String>,

    /// OAuth2 application client id.
    #[arg(long, global = true, env = "MYUPLINK_CLIENT_ID")]
    pub client_id: Option<String>,

    /// OAuth2 application client secret.
    #[arg(long, global = true, env = "MYUPLINK_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Output format.
    #[arg(long, short = 'o', global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Request timeout in seconds.
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout: u64,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output.
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Assume "yes" for confirmation prompts.
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List systems and their member devices
    Systems,

    /// List devices, optionally restricted to one system
    Devices {
        /// System id to restrict to.
        system: Option<String>,
    },

    /// List data points reported by a device
    Points {
        /// Device id.
        device: String,

        /// Only show writable points.
        #[arg(long)]
        writable: bool,
    },

    /// Show the classified entity set for the whole account
    Entities {
        /// Restrict to one entity kind.
        #[arg(long, value_enum)]
        kind: Option<KindFilter>,
    },

    /// Show device registry records (synthetic system parents included)
    Records,

    /// Write a value to a writable point
    Set {
        /// Device id.
        device: String,
        /// Parameter id.
        parameter: String,
        /// New value (number or enum value string).
        value: String,
    },

    /// Poll continuously and print a summary per refresh
    Watch {
        /// Refresh interval (e.g. "30s", "2m"). Defaults to the profile
        /// setting.
        #[arg(long, value_parser = humantime::parse_duration)]
        interval: Option<Duration>,
    },

    /// Configuration helpers
    Config(ConfigArgs),

    /// Generate shell completions
    Completions {
        /// Target shell.
        shell: clap_complete::Shell,
    },
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or update a profile in the config file
    Init {
        /// Profile name to create or update.
        #[arg(long, default_value = "default")]
        profile: String,

        /// OAuth2 application client id.
        #[arg(long)]
        client_id: String,

        /// Store the client secret in the config file in plaintext.
        /// Prefer MYUPLINK_CLIENT_SECRET or the system keyring.
        #[arg(long)]
        client_secret: Option<String>,
    },
    /// Print the config file path
    Path,
    /// Print the loaded configuration (secrets masked)
    Show,
}

/// CLI-facing mirror of [`myuplink_core::EntityKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum KindFilter {
    Sensor,
    BinarySensor,
    Number,
    Switch,
}

impl KindFilter {
    pub fn matches(self, kind: myuplink_core::EntityKind) -> bool {
        matches!(
            (self, kind),
            (Self::Sensor, myuplink_core::EntityKind::Sensor)
                | (Self::BinarySensor, myuplink_core::EntityKind::BinarySensor)
                | (Self::Number, myuplink_core::EntityKind::Number)
                | (Self::Switch, myuplink_core::EntityKind::Switch)
        )
    }
}
