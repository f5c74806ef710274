use anyhow::Result;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use hookwarden_core::Config;
use hookwarden_core::env::HOOKWARDEN_LOG;

mod cli;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Caught hook panics resolve to a silent allow and must not reach stderr
    std::panic::set_hook(Box::new(|info| tracing::debug!("panic: {}", info)));

    // argv[0] dispatch: a binary installed or linked as `api-key-guard` runs
    // that hook directly, without any argument parsing.
    if let Some(arg0) = std::env::args_os().next()
        && let Some(name) = crate::cli::run::hook_name_from_argv0(&arg0.to_string_lossy())
    {
        let config = load_config(false);
        std::process::exit(crate::cli::run::run_hook(name, config));
    }

    let cli = Cli::parse();
    let config = load_config(cli.verbose);

    match cli.command {
        Commands::Run(args) => std::process::exit(crate::cli::run::run(args, config)),
        Commands::List(args) => crate::cli::list::run(args),
        Commands::Register(args) => crate::cli::register::run(args),
        Commands::Config(args) => crate::cli::config::run(args, &config),
    }
}

/// Load the config and install the stderr logger.
///
/// The filter comes from HOOKWARDEN_LOG, then RUST_LOG, then the config file.
/// `--verbose` forces "debug".
fn load_config(verbose: bool) -> Config {
    let loaded = Config::try_load();
    let level = match (&loaded, verbose) {
        (_, true) => "debug".to_string(),
        (Ok(config), false) => config.logging.level.clone(),
        (Err(_), false) => "warn".to_string(),
    };

    let filter = if verbose {
        EnvFilter::new(&level)
    } else {
        EnvFilter::try_from_env(HOOKWARDEN_LOG)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new(&level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    loaded.unwrap_or_else(|e| {
        warn!("Ignoring config: {}", e);
        Config::default()
    })
}
