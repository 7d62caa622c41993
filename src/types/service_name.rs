// ABOUTME: Cloud Run service name validation.
// ABOUTME: Lowercase letters, digits and hyphens, starting with a letter, at most 49 characters.

use std::fmt;
use thiserror::Error;

/// Cloud Run rejects service names longer than this.
pub const MAX_SERVICE_NAME_LEN: usize = 49;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceNameError {
    #[error("service name cannot be empty")]
    Empty,

    #[error("service name exceeds maximum length of {MAX_SERVICE_NAME_LEN} characters")]
    TooLong,

    #[error("service name must start with a lowercase letter")]
    MustStartWithLetter,

    #[error("service name cannot end with a hyphen")]
    EndsWithHyphen,

    #[error("service name must be lowercase")]
    NotLowercase,

    #[error("invalid character in service name: '{0}'")]
    InvalidChar(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceName(String);

impl ServiceName {
    pub fn new(value: &str) -> Result<Self, ServiceNameError> {
        let value = value.trim();
        let first = value.chars().next().ok_or(ServiceNameError::Empty)?;

        if value.len() > MAX_SERVICE_NAME_LEN {
            return Err(ServiceNameError::TooLong);
        }

        if !first.is_ascii_lowercase() {
            return Err(if first.is_ascii_uppercase() {
                ServiceNameError::NotLowercase
            } else {
                ServiceNameError::MustStartWithLetter
            });
        }

        if value.ends_with('-') {
            return Err(ServiceNameError::EndsWithHyphen);
        }

        for c in value.chars() {
            if c.is_ascii_uppercase() {
                return Err(ServiceNameError::NotLowercase);
            }
            if !c.is_ascii_lowercase() && !c.is_ascii_digit() && c != '-' {
                return Err(ServiceNameError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_first_is_rejected() {
        assert_eq!(
            ServiceName::new("1api"),
            Err(ServiceNameError::MustStartWithLetter)
        );
    }

    #[test]
    fn uppercase_first_reports_case() {
        assert_eq!(ServiceName::new("Api"), Err(ServiceNameError::NotLowercase));
    }

    #[test]
    fn underscore_is_invalid() {
        assert_eq!(
            ServiceName::new("gis_api"),
            Err(ServiceNameError::InvalidChar('_'))
        );
    }
}
