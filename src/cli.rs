// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Running without a subcommand deploys; rollback, status and init are explicit.

use clap::{Parser, Subcommand};
use runlift::types::RevisionName;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "runlift")]
#[command(about = "Deploy to Cloud Run through gcloud after checking it is ready")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print the final result
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Print JSON lines instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (default: runlift.yml in the current directory, if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Target destination (defined in config)
    #[arg(short, long, global = true)]
    pub destination: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Deploy the service from source (the default)
    Deploy,

    /// Route all traffic back to an earlier revision
    Rollback {
        /// Revision to restore (default: the one before the newest)
        #[arg(short, long)]
        revision: Option<RevisionName>,
    },

    /// Show the service URL and its revisions
    Status,

    /// Initialize a new runlift.yml configuration file
    Init {
        /// Service name
        #[arg(short, long)]
        service: Option<String>,

        /// Region
        #[arg(short, long)]
        region: Option<String>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
