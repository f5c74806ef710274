pub mod config;
pub mod list;
pub mod register;
pub mod run;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hookwarden")]
#[command(author, version, about = "Write/Edit inspection hooks for coding-assistant plugins")]
#[command(
    long_about = "Reads one hook payload on stdin and warns about or blocks the proposed file write.\n\
                  Exit code 0 allows the write; exit code 1 blocks it."
)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one hook against the payload on stdin
    Run(run::RunArgs),

    /// List built-in hooks
    List(list::ListArgs),

    /// Print or install the host registration for a plugin's hooks
    Register(register::RegisterArgs),

    /// Show or initialize the config file
    Config(config::ConfigArgs),
}
