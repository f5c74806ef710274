use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use hookwarden_core::hooks::registration::{self, DEFAULT_COMMAND};

#[derive(Args)]
pub struct RegisterArgs {
    /// Plugin whose hooks to register
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    pub plugin: Option<String>,

    /// Register every built-in hook
    #[arg(long)]
    pub all: bool,

    /// Command that invokes this binary from the host
    #[arg(long, default_value = DEFAULT_COMMAND)]
    pub command: String,

    /// Merge into this settings file instead of printing
    #[arg(long, value_name = "SETTINGS_JSON")]
    pub install: Option<PathBuf>,
}

pub fn run(args: RegisterArgs) -> Result<()> {
    let fragment = match &args.plugin {
        Some(plugin) => registration::plugin_hooks(plugin, &args.command)?,
        None => registration::all_hooks(&args.command),
    };

    match args.install {
        Some(path) => {
            let added = registration::install(&path, &fragment)
                .with_context(|| format!("Failed to update {}", path.display()))?;
            println!("Registered {} hook(s) in {}", added, path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&fragment)?),
    }
    Ok(())
}
