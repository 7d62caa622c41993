// ABOUTME: Environment variable value types with interpolation support.
// ABOUTME: Handles literal values and references to the caller's environment.

use crate::error::{Error, Result};
use crate::types::SecretValue;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env::VarError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EnvValue {
    Literal(String),
    FromEnv {
        #[serde(rename = "env")]
        var: String,
        #[serde(default)]
        default: Option<String>,
    },
}

impl EnvValue {
    /// Reference `var` in the caller's environment, with an optional fallback.
    pub fn from_env(var: impl Into<String>, default: Option<&str>) -> Self {
        EnvValue::FromEnv {
            var: var.into(),
            default: default.map(str::to_string),
        }
    }

    pub fn resolve(&self) -> Result<SecretValue> {
        match self {
            EnvValue::Literal(s) => Ok(SecretValue::new(s.clone())),
            EnvValue::FromEnv { var, default } => match std::env::var(var) {
                Ok(val) => Ok(SecretValue::new(val)),
                Err(VarError::NotUnicode(_)) => Err(Error::InvalidConfig(format!(
                    "environment variable {var} is not valid UTF-8"
                ))),
                Err(VarError::NotPresent) => default
                    .clone()
                    .map(SecretValue::new)
                    .ok_or_else(|| Error::MissingEnvVar(var.clone())),
            },
        }
    }

    /// The referenced variable, if it is unset and this value falls back to its default.
    pub fn unset_var(&self) -> Option<&str> {
        match self {
            EnvValue::FromEnv {
                var,
                default: Some(_),
            } if std::env::var_os(var).is_none() => Some(var.as_str()),
            _ => None,
        }
    }
}

pub fn resolve_env_map(map: &BTreeMap<String, EnvValue>) -> Result<BTreeMap<String, SecretValue>> {
    map.iter()
        .map(|(k, v)| v.resolve().map(|resolved| (k.clone(), resolved)))
        .collect()
}
