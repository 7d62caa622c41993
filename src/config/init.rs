// ABOUTME: Config scaffolding for new projects.
// ABOUTME: Creates runlift.yml template files.

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::{Region, ServiceName};

use super::{API_KEY_VAR, CONFIG_FILENAME, Config};

pub fn init_config(
    dir: &Path,
    service: Option<&str>,
    region: Option<&str>,
    force: bool,
) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let mut config = Config::default();

    if let Some(s) = service {
        config.service = ServiceName::new(s).map_err(|e| Error::InvalidConfig(e.to_string()))?;
    }

    if let Some(r) = region {
        config.region = Region::new(r).map_err(|e| Error::InvalidConfig(e.to_string()))?;
    }

    let yaml = generate_template_yaml(&config);
    std::fs::write(&config_path, yaml)?;

    Ok(())
}

fn generate_template_yaml(config: &Config) -> String {
    format!(
        r#"service: {service}
region: {region}
source: {source}
allow_unauthenticated: {allow}
env:
  {API_KEY_VAR}:
    env: {API_KEY_VAR}
    default: ""
# destinations:
#   staging:
#     service: {service}-staging
"#,
        service = config.service,
        region = config.region,
        source = config.source.display(),
        allow = config.allow_unauthenticated,
    )
}
