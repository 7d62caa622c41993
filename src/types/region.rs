// ABOUTME: Google Cloud region identifier, e.g. "us-central1".
// ABOUTME: Only checks the character set; gcloud decides whether the region exists.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegionError {
    #[error("region cannot be empty")]
    Empty,

    #[error("region must start with a lowercase letter")]
    MustStartWithLetter,

    #[error("invalid character in region: '{0}'")]
    InvalidChar(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Region(String);

impl Region {
    pub fn new(value: &str) -> Result<Self, RegionError> {
        let value = value.trim();
        let first = value.chars().next().ok_or(RegionError::Empty)?;

        if !first.is_ascii_lowercase() {
            return Err(RegionError::MustStartWithLetter);
        }

        if let Some(c) = value
            .chars()
            .find(|c| !c.is_ascii_lowercase() && !c.is_ascii_digit() && *c != '-')
        {
            return Err(RegionError::InvalidChar(c));
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
