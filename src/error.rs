// ABOUTME: Application-wide error types for runlift.
// ABOUTME: Uses thiserror; maps each failure to the process exit code.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{tool} not found on PATH; install the Google Cloud SDK: https://cloud.google.com/sdk/docs/install")]
    ToolMissing { tool: String },

    #[error("not authenticated with gcloud; run `gcloud auth login` first")]
    NotAuthenticated,

    #[error("no gcloud project configured; run `gcloud config set project <PROJECT_ID>` first")]
    NoProjectConfigured,

    #[error("deployment failed ({})", describe_status(.code))]
    DeploymentCallFailed { code: Option<i32> },

    #[error("rollback failed ({})", describe_status(.code))]
    RollbackCallFailed { code: Option<i32> },

    #[error("no previous revision of {service} to roll back to")]
    NoPreviousRevision { service: String },

    #[error("`gcloud {command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("unknown destination: {0}")]
    UnknownDestination(String),

    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Process exit code for this error.
    ///
    /// Failed deploy and rollback calls pass through gcloud's own exit code.
    /// Everything else, including a gcloud killed by a signal, exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::DeploymentCallFailed { code: Some(code) }
            | Error::RollbackCallFailed { code: Some(code) }
                if *code != 0 =>
            {
                *code
            }
            _ => 1,
        }
    }
}

fn describe_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("gcloud exited with code {code}"),
        None => "gcloud was terminated by a signal".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;
