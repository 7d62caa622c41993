// ABOUTME: Immutable parameters for a single Cloud Run deployment call.
// ABOUTME: Renders the exact `gcloud run deploy` argument list, with or without secrets.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::config::{Config, resolve_env_map};
use crate::error::{Error, Result};
use crate::types::{Platform, REDACTED, Region, SecretValue, ServiceName};

/// Delimiters tried, in order, when an env value contains a comma.
const ALT_DELIMITERS: [char; 6] = ['@', '#', '|', ';', '~', '\u{1f}'];

/// A Cloud Run service in a given region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceTarget {
    pub service: ServiceName,
    pub region: Region,
    pub platform: Platform,
}

impl ServiceTarget {
    pub fn from_config(config: &Config) -> Self {
        Self {
            service: config.service.clone(),
            region: config.region.clone(),
            platform: config.platform,
        }
    }

    /// `--platform <platform> --region <region>`
    pub fn location_args(&self) -> Vec<String> {
        vec![
            "--platform".to_string(),
            self.platform.to_string(),
            "--region".to_string(),
            self.region.to_string(),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct DeployRequest {
    pub target: ServiceTarget,
    pub source: PathBuf,
    pub allow_unauthenticated: bool,
    pub env: BTreeMap<String, SecretValue>,
}

impl DeployRequest {
    /// Build a request from config, reading env references from the process environment.
    pub fn from_config(config: &Config) -> Result<Self> {
        let request = Self {
            target: ServiceTarget::from_config(config),
            source: config.source.clone(),
            allow_unauthenticated: config.allow_unauthenticated,
            env: resolve_env_map(&config.env)?,
        };
        request.env_delimiter()?;
        Ok(request)
    }

    /// Arguments for gcloud, secrets included.
    pub fn to_args(&self) -> Result<Vec<String>> {
        self.render_args(true)
    }

    /// Arguments safe to log.
    pub fn redacted_args(&self) -> Result<Vec<String>> {
        self.render_args(false)
    }

    fn render_args(&self, reveal: bool) -> Result<Vec<String>> {
        let mut args = vec![
            "run".to_string(),
            "deploy".to_string(),
            self.target.service.to_string(),
            "--source".to_string(),
            self.source.display().to_string(),
        ];
        args.extend(self.target.location_args());

        args.push(if self.allow_unauthenticated {
            "--allow-unauthenticated".to_string()
        } else {
            "--no-allow-unauthenticated".to_string()
        });

        if !self.env.is_empty() {
            args.push("--set-env-vars".to_string());
            args.push(self.env_assignments(reveal)?);
        }

        Ok(args)
    }

    /// `K=V,K2=V2`, switching to gcloud's `^D^K=VDK2=V2` form when a value holds a comma.
    fn env_assignments(&self, reveal: bool) -> Result<String> {
        let delimiter = self.env_delimiter()?;

        let joined = self
            .env
            .iter()
            .map(|(k, v)| format!("{k}={}", if reveal { v.expose() } else { REDACTED }))
            .collect::<Vec<_>>()
            .join(delimiter.to_string().as_str());

        Ok(if delimiter == ',' {
            joined
        } else {
            format!("^{delimiter}^{joined}")
        })
    }

    /// `,` unless a value holds one, else the first alternate no value contains.
    fn env_delimiter(&self) -> Result<char> {
        let used = |d: char| self.env.values().any(|v| v.expose().contains(d));
        if !used(',') {
            return Ok(',');
        }
        ALT_DELIMITERS
            .into_iter()
            .find(|d| !used(*d))
            .ok_or_else(|| {
                Error::InvalidConfig(
                    "environment values contain every delimiter gcloud accepts".to_string(),
                )
            })
    }
}
