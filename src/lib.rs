// ABOUTME: Library root for runlift - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod deploy;
pub mod diagnostics;
pub mod error;
pub mod gcloud;
pub mod output;
pub mod types;
