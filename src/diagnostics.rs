// ABOUTME: Diagnostics accumulator for non-fatal warnings during a run.
// ABOUTME: Collects warnings that shouldn't fail a deployment but should be shown to users.

/// Collects non-fatal warnings during deploy, rollback and status operations.
#[derive(Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if any warnings were collected.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A non-fatal warning.
#[derive(Debug, Clone)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// An env reference whose variable is unset and falls back to its default.
    pub fn unset_env_var(var: &str) -> Self {
        Self {
            kind: WarningKind::UnsetEnvVar,
            message: format!("{var} is not set; deploying with its default value"),
        }
    }

    /// The deployed service URL could not be determined.
    pub fn url_lookup(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::UrlLookup,
            message: message.into(),
        }
    }
}

/// Categories of warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// An environment variable passed to the service was missing locally.
    UnsetEnvVar,
    /// Deploy succeeded but the service URL is unknown.
    UrlLookup,
}
