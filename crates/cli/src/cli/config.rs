use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use hookwarden_core::Config;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the config file location
    Path,

    /// Write the commented default config if none exists
    Init,

    /// Print the effective config
    Show,
}

pub fn run(args: ConfigArgs, config: &Config) -> Result<()> {
    match args.command {
        ConfigCommands::Path => {
            let path = Config::config_path().context("No config directory available")?;
            println!("{}", path.display());
        }
        ConfigCommands::Init => {
            let path = Config::config_path().context("No config directory available")?;
            if Config::write_template(&path)? {
                println!("Created {}", path.display());
            } else {
                println!("Config already exists at {}", path.display());
            }
        }
        ConfigCommands::Show => {
            println!("{}", toml::to_string_pretty(config)?);
        }
    }
    Ok(())
}
