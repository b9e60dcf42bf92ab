use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Select, Text};
use meteo_core::{Config, Coordinate, SettlePolicy};
use std::process::ExitCode;

use crate::session;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "meteo", version, about = "Current weather for a coordinate, from Open-Meteo")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive form: edit the coordinate and search as often as you like (default).
    Form,

    /// Fetch the weather once and print it.
    Show {
        /// Latitude in decimal degrees; the configured default if absent.
        #[arg(long, allow_hyphen_values = true)]
        latitude: Option<String>,

        /// Longitude in decimal degrees; the configured default if absent.
        #[arg(long, allow_hyphen_values = true)]
        longitude: Option<String>,
    },

    /// Store the default coordinate and request settings.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let config = Config::load()?;

        match self.command.unwrap_or(Command::Form) {
            Command::Form => {
                session::interactive(&config).await?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Show { latitude, longitude } => {
                let mut coordinate = config.default_coordinate();
                if let Some(latitude) = latitude {
                    coordinate.latitude = latitude;
                }
                if let Some(longitude) = longitude {
                    coordinate.longitude = longitude;
                }
                session::show_once(&config, coordinate).await
            }
            Command::Configure => {
                configure(config)?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PolicyChoice(SettlePolicy);

impl std::fmt::Display for PolicyChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            SettlePolicy::LatestRequestOnly => f.write_str("latest request only (discard stale responses)"),
            SettlePolicy::LastWriteWins => f.write_str("last write wins (whichever response settles last)"),
        }
    }
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let current = config.default_coordinate();

    let latitude = Text::new("Default latitude:").with_default(&current.latitude).prompt()?;
    let longitude = Text::new("Default longitude:").with_default(&current.longitude).prompt()?;
    config.set_default_coordinate(Coordinate::new(latitude, longitude));

    let endpoint = Text::new("Forecast endpoint:").with_default(config.endpoint()).prompt()?;
    config.endpoint = Some(endpoint);

    let timeout_default = config.timeout_secs.map(|s| s.to_string()).unwrap_or_default();
    let timeout = Text::new("Request timeout in seconds (empty for none):")
        .with_initial_value(&timeout_default)
        .prompt()?;
    config.timeout_secs = parse_timeout(&timeout)?;

    let options = vec![
        PolicyChoice(SettlePolicy::LatestRequestOnly),
        PolicyChoice(SettlePolicy::LastWriteWins),
    ];
    let start = options.iter().position(|o| o.0 == config.settle_policy).unwrap_or(0);
    let policy = Select::new("When an older request finishes late:", options)
        .with_starting_cursor(start)
        .prompt()?;
    config.settle_policy = policy.0;

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}

fn parse_timeout(input: &str) -> anyhow::Result<Option<u64>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let secs = trimmed
        .parse()
        .with_context(|| format!("Invalid timeout '{trimmed}': expected whole seconds"))?;
    Ok(Some(secs))
}
