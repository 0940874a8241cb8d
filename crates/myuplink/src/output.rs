//! Output helpers shared by all commands.

use serde::Serialize;
use tabled::Tabled;
use tabled::settings::Style;

use crate::error::CliError;

/// Output format selected with `--output`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

/// Print rows as a table, or the serializable value as JSON/YAML.
pub fn emit<T, R>(format: OutputFormat, value: &T, rows: &[R]) -> Result<(), CliError>
where
    T: Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            if rows.is_empty() {
                eprintln!("(no results)");
            } else {
                let mut table = tabled::Table::new(rows);
                table.with(Style::sharp());
                println!("{table}");
            }
            Ok(())
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(value)?);
            Ok(())
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(value)?);
            Ok(())
        }
    }
}

/// Render an optional string cell.
pub fn cell(value: Option<&str>) -> String {
    value.unwrap_or("-").to_owned()
}
