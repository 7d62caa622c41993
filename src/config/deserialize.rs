// ABOUTME: Custom serde deserializers for config types.
// ABOUTME: Validates service names and regions while parsing.

use serde::Deserialize;

use crate::types::{Region, ServiceName};

pub fn deserialize_service_name<'de, D>(deserializer: D) -> Result<ServiceName, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    ServiceName::new(&s).map_err(serde::de::Error::custom)
}

pub fn deserialize_service_name_option<'de, D>(
    deserializer: D,
) -> Result<Option<ServiceName>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|s| ServiceName::new(&s).map_err(serde::de::Error::custom))
        .transpose()
}

pub fn deserialize_region<'de, D>(deserializer: D) -> Result<Region, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Region::new(&s).map_err(serde::de::Error::custom)
}

pub fn deserialize_region_option<'de, D>(deserializer: D) -> Result<Option<Region>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|s| Region::new(&s).map_err(serde::de::Error::custom))
        .transpose()
}
