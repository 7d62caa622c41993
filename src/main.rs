// ABOUTME: Entry point for the runlift CLI application.
// ABOUTME: Parses arguments, sets up logging, and dispatches to command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use runlift::config::{self, Config};
use runlift::error::Result;
use runlift::output::{Output, OutputMode};
use std::env;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };

    if let Err(e) = run(cli, Output::new(mode)).await {
        Output::new(mode).error(&e.to_string());
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli, output: Output) -> Result<()> {
    match cli.command.unwrap_or(Commands::Deploy) {
        Commands::Deploy => {
            let config = load_config(cli.config.as_deref(), cli.destination.as_deref())?;
            commands::deploy(config, output).await
        }
        Commands::Rollback { revision } => {
            let config = load_config(cli.config.as_deref(), cli.destination.as_deref())?;
            commands::rollback(config, revision, output).await
        }
        Commands::Status => {
            let config = load_config(cli.config.as_deref(), cli.destination.as_deref())?;
            commands::status(config, output).await
        }
        Commands::Init {
            service,
            region,
            force,
        } => {
            let cwd = env::current_dir()?;
            config::init_config(&cwd, service.as_deref(), region.as_deref(), force)?;
            output.success(&format!("Created {}", config::CONFIG_FILENAME));
            Ok(())
        }
    }
}

/// Load the explicit config file, or discover one in the working directory.
fn load_config(path: Option<&Path>, destination: Option<&str>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load(path)?,
        None => Config::discover(&env::current_dir()?)?,
    };

    // Apply destination overrides if specified
    match destination {
        Some(dest) => config.for_destination(dest),
        None => Ok(config),
    }
}
