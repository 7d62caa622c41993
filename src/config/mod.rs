// ABOUTME: Configuration types and parsing for runlift.yml.
// ABOUTME: Handles YAML parsing, built-in defaults, env references and destination merging.

mod deserialize;
mod env_value;
mod init;

pub use env_value::{EnvValue, resolve_env_map};
pub use init::init_config;

use crate::error::{Error, Result};
use crate::types::{Platform, Region, ServiceName};
use deserialize::{
    deserialize_region, deserialize_region_option, deserialize_service_name,
    deserialize_service_name_option,
};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "runlift.yml";
pub const CONFIG_FILENAME_ALT: &str = "runlift.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".runlift/config.yml";

pub const DEFAULT_SERVICE: &str = "jcps-gis-api";
pub const DEFAULT_REGION: &str = "us-central1";
pub const DEFAULT_SOURCE: &str = ".";
/// The secret handed to the deployed service, read from the caller's environment.
pub const API_KEY_VAR: &str = "GOOGLE_MAPS_API_KEY";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(
        default = "default_service",
        deserialize_with = "deserialize_service_name"
    )]
    pub service: ServiceName,

    #[serde(default = "default_region", deserialize_with = "deserialize_region")]
    pub region: Region,

    #[serde(default = "default_source")]
    pub source: PathBuf,

    #[serde(default)]
    pub platform: Platform,

    #[serde(default = "default_allow_unauthenticated")]
    pub allow_unauthenticated: bool,

    #[serde(default = "default_env")]
    pub env: BTreeMap<String, EnvValue>,

    #[serde(default)]
    pub destinations: HashMap<String, Destination>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Destination {
    #[serde(default, deserialize_with = "deserialize_service_name_option")]
    pub service: Option<ServiceName>,

    #[serde(default, deserialize_with = "deserialize_region_option")]
    pub region: Option<Region>,

    #[serde(default)]
    pub allow_unauthenticated: Option<bool>,

    #[serde(default)]
    pub env: BTreeMap<String, EnvValue>,
}

fn default_service() -> ServiceName {
    ServiceName::new(DEFAULT_SERVICE).expect("default service name is valid")
}

fn default_region() -> Region {
    Region::new(DEFAULT_REGION).expect("default region is valid")
}

fn default_source() -> PathBuf {
    PathBuf::from(DEFAULT_SOURCE)
}

fn default_allow_unauthenticated() -> bool {
    true
}

/// An unset API key deploys with an empty value, as the shell would expand it.
fn default_env() -> BTreeMap<String, EnvValue> {
    BTreeMap::from([(
        API_KEY_VAR.to_string(),
        EnvValue::from_env(API_KEY_VAR, Some("")),
    )])
}

impl Default for Config {
    fn default() -> Self {
        Config {
            service: default_service(),
            region: default_region(),
            source: default_source(),
            platform: Platform::default(),
            allow_unauthenticated: default_allow_unauthenticated(),
            env: default_env(),
            destinations: HashMap::new(),
        }
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty file means "all defaults".
        let config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Self::from_yaml(&content)
    }

    /// Load the first config file found in `dir`, or the built-in defaults if there is none.
    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        match candidates.iter().find(|path| path.is_file()) {
            Some(path) => Self::load(path),
            None => {
                tracing::debug!(
                    "No configuration file in {}, using built-in defaults",
                    dir.display()
                );
                Ok(Config::default())
            }
        }
    }

    pub fn for_destination(&self, name: &str) -> Result<Config> {
        let dest = self
            .destinations
            .get(name)
            .ok_or_else(|| Error::UnknownDestination(name.to_string()))?;

        let mut merged = self.clone();

        if let Some(ref service) = dest.service {
            merged.service = service.clone();
        }

        if let Some(ref region) = dest.region {
            merged.region = region.clone();
        }

        if let Some(allow) = dest.allow_unauthenticated {
            merged.allow_unauthenticated = allow;
        }

        // Deep merge env
        for (k, v) in &dest.env {
            merged.env.insert(k.clone(), v.clone());
        }

        merged.validate()?;
        Ok(merged)
    }

    fn validate(&self) -> Result<()> {
        let env_keys = self
            .env
            .keys()
            .chain(self.destinations.values().flat_map(|d| d.env.keys()));

        for key in env_keys {
            validate_env_key(key)?;
        }
        Ok(())
    }
}

fn validate_env_key(key: &str) -> Result<()> {
    let mut chars = key.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(Error::InvalidConfig(format!(
            "invalid environment variable name: {key:?}"
        )));
    }
    Ok(())
}
