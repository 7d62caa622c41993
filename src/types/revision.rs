// ABOUTME: Cloud Run revision name, e.g. "jcps-gis-api-00042-xyz".
// ABOUTME: Revisions are the targets of traffic rollbacks.

use std::fmt;
use thiserror::Error;

const MAX_REVISION_NAME_LEN: usize = 63;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RevisionNameError {
    #[error("revision name cannot be empty")]
    Empty,

    #[error("revision name exceeds maximum length of {MAX_REVISION_NAME_LEN} characters")]
    TooLong,

    #[error("revision name must start with a lowercase letter")]
    MustStartWithLetter,

    #[error("invalid character in revision name: '{0}'")]
    InvalidChar(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RevisionName(String);

impl RevisionName {
    pub fn new(value: &str) -> Result<Self, RevisionNameError> {
        let value = value.trim();
        let first = value.chars().next().ok_or(RevisionNameError::Empty)?;

        if value.len() > MAX_REVISION_NAME_LEN {
            return Err(RevisionNameError::TooLong);
        }
        if !first.is_ascii_lowercase() {
            return Err(RevisionNameError::MustStartWithLetter);
        }
        if let Some(c) = value
            .chars()
            .find(|c| !c.is_ascii_lowercase() && !c.is_ascii_digit() && *c != '-')
        {
            return Err(RevisionNameError::InvalidChar(c));
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RevisionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RevisionName {
    type Err = RevisionNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
