// ABOUTME: Validated domain types for Cloud Run deployments.
// ABOUTME: Service, region and revision names, plus a redacting secret wrapper.

mod region;
mod revision;
mod secret;
mod service_name;

pub use region::{Region, RegionError};
pub use revision::{RevisionName, RevisionNameError};
pub use secret::{REDACTED, SecretValue};
pub use service_name::{MAX_SERVICE_NAME_LEN, ServiceName, ServiceNameError};

use serde::Deserialize;
use std::fmt;

/// Cloud Run platform targeted by gcloud. Only fully managed Cloud Run is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Managed,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Managed => "managed",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
