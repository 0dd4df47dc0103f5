//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use cwala_core::config::Config;

mod commands;

#[derive(Parser)]
#[command(name = "cwala")]
#[command(version)]
#[command(about = "Campaignwala terminal dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Show the cached session without starting the dashboard
    Whoami {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sign out: delete the local session and invalidate the server token
    Logout,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print where config.toml lives
    Path,
    /// Write the commented default config (refuses to overwrite)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // One runtime serves both the dashboard and the one-shot commands.
    let rt = tokio::runtime::Runtime::new().context("start async runtime")?;
    rt.block_on(dispatch(cli))
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load().context("load config")?;

    // default to the dashboard
    let Some(command) = cli.command else {
        return commands::dashboard::run(&config).await;
    };

    match command {
        Commands::Whoami { json } => commands::session::whoami(&config, json),
        Commands::Logout => commands::session::logout(&config).await,

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
